use std::future::Future;
use std::pin::Pin;

use snafu::ensure;

use crate::error::{ConversationFinishedSnafu, FlowResult};
use crate::interpret::interpret_answer;
use crate::message::Message;
use crate::script::CLARIFICATION_MESSAGE;
use crate::step::{Choice, StepId, StepTable};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What a turn engine produces for one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub text: String,
    pub finished: bool,
    pub show_contact_link: bool,
}

impl TurnReply {
    pub fn ongoing(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finished: false,
            show_contact_link: false,
        }
    }

    pub fn finished(text: impl Into<String>, show_contact_link: bool) -> Self {
        Self {
            text: text.into(),
            finished: true,
            show_contact_link,
        }
    }
}

/// Strategy that decides the next system turn.
///
/// `history` holds every message so far, including the user message for the
/// turn being answered.
pub trait TurnEngine: Send {
    fn name(&self) -> &str;
    fn opening(&self) -> TurnReply;
    fn next_turn<'a>(
        &'a mut self,
        history: &'a [Message],
        input: &'a str,
    ) -> BoxFuture<'a, FlowResult<TurnReply>>;
}

/// Result of feeding one reply to the scripted state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved { choice: Choice, from: StepId, to: StepId },
    Clarify { step: StepId },
}

/// Deterministic engine: a cursor over a [`StepTable`].
#[derive(Debug, Clone)]
pub struct ScriptedEngine {
    table: StepTable,
    current: StepId,
    finished: bool,
    show_contact_link: bool,
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new(StepTable::standard())
    }
}

impl ScriptedEngine {
    pub fn new(table: StepTable) -> Self {
        Self {
            table,
            current: StepId::INITIAL,
            finished: false,
            show_contact_link: false,
        }
    }

    pub fn current(&self) -> StepId {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn show_contact_link(&self) -> bool {
        self.show_contact_link
    }

    /// Interprets `input` against the current step and moves the cursor.
    pub fn advance(&mut self, input: &str) -> FlowResult<Advance> {
        ensure!(
            !self.finished,
            ConversationFinishedSnafu {
                stage: "advance",
                step: self.current,
            }
        );

        let step = self.table.get(self.current, "advance-lookup")?;
        let from = self.current;

        let Some(choice) = interpret_answer(&self.table, from, input) else {
            if let Some(fallback) = step.transitions.and_then(|next| next.unrecognized) {
                self.current = fallback;
            }
            tracing::debug!(
                step = %from,
                input_chars = input.chars().count(),
                "reply did not match any option"
            );
            return Ok(Advance::Clarify { step: self.current });
        };

        let Some(transitions) = step.transitions else {
            // Only terminals lack transitions and those never resolve a choice.
            return ConversationFinishedSnafu {
                stage: "advance-transitions",
                step: from,
            }
            .fail();
        };

        let to = transitions.target(choice);
        self.current = to;
        match to {
            StepId::Success => {
                self.finished = true;
                self.show_contact_link = true;
            }
            StepId::Declined => self.finished = true,
            _ => {}
        }

        tracing::debug!(%from, %to, %choice, "advanced qualification step");
        Ok(Advance::Moved { choice, from, to })
    }

    fn reply_for(&self, advance: Advance) -> FlowResult<TurnReply> {
        let text = match advance {
            Advance::Clarify { .. } => CLARIFICATION_MESSAGE,
            Advance::Moved { to, .. } => self.table.get(to, "reply-message")?.message,
        };

        Ok(TurnReply {
            text: text.to_string(),
            finished: self.finished,
            show_contact_link: self.show_contact_link,
        })
    }
}

impl TurnEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    fn opening(&self) -> TurnReply {
        let text = self
            .table
            .lookup(StepId::INITIAL)
            .map(|step| step.message)
            .unwrap_or_default();
        TurnReply::ongoing(text)
    }

    fn next_turn<'a>(
        &'a mut self,
        _history: &'a [Message],
        input: &'a str,
    ) -> BoxFuture<'a, FlowResult<TurnReply>> {
        Box::pin(async move {
            let advance = self.advance(input)?;
            self.reply_for(advance)
        })
    }
}
