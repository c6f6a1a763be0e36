#![deny(unsafe_code)]

//! Deterministic lead-qualification dialogue.
//!
//! A fixed table of steps, a keyword interpreter over normalized replies and
//! a session that turns user input into exactly one reply per turn. Turn
//! engines are interchangeable so a host can swap the scripted flow for a
//! delegated one without touching the session.

pub mod contact;
pub mod delay;
pub mod engine;
pub mod error;
pub mod interpret;
pub mod message;
pub mod normalize;
pub mod script;
pub mod session;
pub mod step;

pub use contact::ContactLink;
pub use delay::TypingDelay;
pub use engine::{Advance, BoxFuture, ScriptedEngine, TurnEngine, TurnReply};
pub use error::{FlowError, FlowResult, SessionError, SessionResult};
pub use interpret::interpret_answer;
pub use message::{Message, MessageId, Role, Transcript};
pub use normalize::normalize_text;
pub use script::{CLARIFICATION_MESSAGE, STANDARD_STEPS};
pub use session::ConversationSession;
pub use step::{Choice, ChoiceKeywords, Step, StepId, StepTable, Transitions};
