use snafu::Snafu;

use crate::step::{Choice, StepId};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FlowError {
    #[snafu(display("conversation already finished at step {step}"))]
    ConversationFinished { stage: &'static str, step: StepId },
    #[snafu(display("step {step} is not defined in the step table"))]
    UnknownStep { stage: &'static str, step: StepId },
    #[snafu(display("step {step} is declared more than once"))]
    DuplicateStep { stage: &'static str, step: StepId },
    #[snafu(display("step {from} routes {choice} to undeclared step {to}"))]
    DanglingTransition {
        stage: &'static str,
        from: StepId,
        choice: Choice,
        to: StepId,
    },
    #[snafu(display("step {from} falls back to undeclared step {to}"))]
    DanglingFallback {
        stage: &'static str,
        from: StepId,
        to: StepId,
    },
    #[snafu(display("non-terminal step {step} has no keyword lists or transitions"))]
    MissingTransitions { stage: &'static str, step: StepId },
    #[snafu(display("terminal step {step} must not declare transitions"))]
    TerminalHasTransitions { stage: &'static str, step: StepId },
    #[snafu(display("terminal step {step} cannot be reached from {start}"))]
    UnreachableTerminal {
        stage: &'static str,
        start: StepId,
        step: StepId,
    },
}

pub type FlowResult<T> = Result<T, FlowError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SessionError {
    #[snafu(display("refusing to send an empty message"))]
    EmptyInput { stage: &'static str },
    #[snafu(display("conversation is finished, input is closed"))]
    ConversationClosed { stage: &'static str },
    #[snafu(display("a reply is still being generated"))]
    ReplyPending { stage: &'static str },
    #[snafu(display("turn engine failed on `{stage}`, {source}"))]
    Engine {
        stage: &'static str,
        source: FlowError,
    },
}

pub type SessionResult<T> = Result<T, SessionError>;
