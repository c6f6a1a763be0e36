use snafu::{ResultExt, ensure};

use crate::delay::TypingDelay;
use crate::engine::TurnEngine;
use crate::error::{
    ConversationClosedSnafu, EmptyInputSnafu, EngineSnafu, ReplyPendingSnafu, SessionResult,
};
use crate::message::{Message, Role, Transcript};

/// Drives one conversation: gates input, appends messages, asks the engine
/// for the next turn and tracks the terminal and contact-link flags.
///
/// Each accepted user turn appends exactly one user message and exactly one
/// assistant message, and the reply is handed back after the typing delay.
/// Nothing is appended once the conversation is finished.
pub struct ConversationSession {
    engine: Box<dyn TurnEngine>,
    transcript: Transcript,
    delay: TypingDelay,
    finished: bool,
    show_contact_link: bool,
    awaiting_reply: bool,
}

impl ConversationSession {
    pub fn new(engine: Box<dyn TurnEngine>, delay: TypingDelay) -> Self {
        Self {
            engine,
            transcript: Transcript::new(),
            delay,
            finished: false,
            show_contact_link: false,
            awaiting_reply: false,
        }
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn show_contact_link(&self) -> bool {
        self.show_contact_link
    }

    /// True while a turn has been accepted but its reply is not yet appended.
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Emits the engine's opening message. Only the first call appends.
    pub async fn open(&mut self) -> Option<&Message> {
        if !self.transcript.is_empty() {
            return None;
        }

        let opening = self.engine.opening();
        {
            let _pending = PendingReply::begin(&mut self.awaiting_reply);
            self.delay.wait_for(&opening.text).await;
        }

        tracing::debug!(engine = %self.engine.name(), "conversation opened");
        Some(self.transcript.append(Role::Assistant, opening.text))
    }

    /// Processes one user turn and returns the assistant reply.
    ///
    /// The user message and its reply are recorded together once the engine
    /// answers, so a failed or cancelled turn leaves the transcript as it was.
    pub async fn send(&mut self, input: &str) -> SessionResult<&Message> {
        let text = input.trim();
        ensure!(!text.is_empty(), EmptyInputSnafu { stage: "send" });
        ensure!(!self.finished, ConversationClosedSnafu { stage: "send" });
        ensure!(!self.awaiting_reply, ReplyPendingSnafu { stage: "send" });

        let _pending = PendingReply::begin(&mut self.awaiting_reply);

        let mut history = self.transcript.messages().to_vec();
        history.push(self.transcript.next_message(Role::User, text));

        let outcome = self.engine.next_turn(&history, text).await;
        let reply = match outcome.context(EngineSnafu { stage: "next-turn" }) {
            Ok(reply) => reply,
            Err(error) => {
                tracing::error!(error = %error, "turn engine rejected the turn");
                return Err(error);
            }
        };

        // The engine has already advanced, so the turn is recorded before the delay.
        self.transcript.append(Role::User, text);
        self.transcript.append(Role::Assistant, reply.text.as_str());
        let reply_index = self.transcript.len() - 1;
        self.finished = reply.finished || reply.show_contact_link;
        self.show_contact_link = reply.show_contact_link;

        if self.finished {
            tracing::info!(
                engine = %self.engine.name(),
                show_contact_link = self.show_contact_link,
                messages = self.transcript.len(),
                "conversation finished"
            );
        }

        self.delay.wait_for(&reply.text).await;
        Ok(&self.transcript.messages()[reply_index])
    }
}

/// Holds the awaiting-reply flag for the length of a turn and clears it on
/// drop, including when the turn future is cancelled.
struct PendingReply<'a> {
    flag: &'a mut bool,
}

impl<'a> PendingReply<'a> {
    fn begin(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for PendingReply<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::engine::{BoxFuture, ScriptedEngine, TurnReply};
    use crate::error::{FlowError, FlowResult, SessionError};
    use crate::message::MessageId;
    use crate::step::StepId;

    struct EchoEngine {
        seen_history: Vec<usize>,
    }

    impl TurnEngine for EchoEngine {
        fn name(&self) -> &str {
            "echo"
        }

        fn opening(&self) -> TurnReply {
            TurnReply::ongoing("hello")
        }

        fn next_turn<'a>(
            &'a mut self,
            history: &'a [Message],
            input: &'a str,
        ) -> BoxFuture<'a, FlowResult<TurnReply>> {
            Box::pin(async move {
                self.seen_history.push(history.len());
                if input == "bye" {
                    Ok(TurnReply::finished("see you", false))
                } else {
                    Ok(TurnReply::ongoing(format!("echo: {input}")))
                }
            })
        }
    }

    fn echo_session() -> ConversationSession {
        ConversationSession::new(
            Box::new(EchoEngine {
                seen_history: Vec::new(),
            }),
            TypingDelay::none(),
        )
    }

    #[tokio::test]
    async fn open_appends_greeting_once() {
        let mut session = echo_session();
        assert_eq!(session.open().await.map(|m| m.text.clone()), Some("hello".to_string()));
        assert!(session.open().await.is_none());
        assert_eq!(session.transcript().len(), 1);
    }

    #[tokio::test]
    async fn each_turn_appends_one_user_and_one_assistant_message() {
        let mut session = echo_session();
        session.open().await;

        let reply = session.send("  oi  ").await.map(|m| m.text.clone());
        assert_eq!(reply.ok(), Some("echo: oi".to_string()));

        let roles = session
            .transcript()
            .messages()
            .iter()
            .map(|message| message.role)
            .collect::<Vec<_>>();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(session.transcript().messages()[1].text, "oi");
        assert!(!session.is_awaiting_reply());
    }

    #[tokio::test]
    async fn empty_input_is_rejected_without_appending() {
        let mut session = echo_session();
        session.open().await;

        let result = session.send("   ").await.map(|_| ());
        assert!(matches!(result, Err(SessionError::EmptyInput { .. })));
        assert_eq!(session.transcript().len(), 1);
    }

    #[tokio::test]
    async fn finished_session_rejects_input() {
        let mut session = echo_session();
        session.open().await;
        assert!(session.send("bye").await.is_ok());
        assert!(session.is_finished());
        assert!(!session.show_contact_link());

        let before = session.transcript().clone();
        let result = session.send("again").await.map(|_| ());
        assert!(matches!(result, Err(SessionError::ConversationClosed { .. })));
        assert_eq!(session.transcript(), &before);
    }

    /// Fails its first `failures` turns, stalls forever while `stall` is set,
    /// and echoes otherwise.
    struct FlakyEngine {
        failures: usize,
        stall: bool,
    }

    impl TurnEngine for FlakyEngine {
        fn name(&self) -> &str {
            "flaky"
        }

        fn opening(&self) -> TurnReply {
            TurnReply::ongoing("hello")
        }

        fn next_turn<'a>(
            &'a mut self,
            _history: &'a [Message],
            input: &'a str,
        ) -> BoxFuture<'a, FlowResult<TurnReply>> {
            Box::pin(async move {
                if self.stall {
                    self.stall = false;
                    std::future::pending::<()>().await;
                }
                if self.failures > 0 {
                    self.failures -= 1;
                    return Err(FlowError::UnknownStep {
                        stage: "flaky",
                        step: StepId::Question2,
                    });
                }
                Ok(TurnReply::ongoing(format!("echo: {input}")))
            })
        }
    }

    fn roles(session: &ConversationSession) -> Vec<Role> {
        session
            .transcript()
            .messages()
            .iter()
            .map(|message| message.role)
            .collect()
    }

    #[tokio::test]
    async fn failed_turns_leave_transcript_untouched() {
        let mut session = ConversationSession::new(
            Box::new(FlakyEngine {
                failures: 2,
                stall: false,
            }),
            TypingDelay::none(),
        );
        session.open().await;

        for _ in 0..2 {
            let result = session.send("sim").await.map(|_| ());
            assert!(matches!(result, Err(SessionError::Engine { .. })));
            assert_eq!(roles(&session), vec![Role::Assistant]);
            assert!(!session.is_awaiting_reply());
        }

        assert!(session.send("sim").await.is_ok());
        assert_eq!(roles(&session), vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(session.transcript().messages()[1].id, MessageId::new(2));
    }

    #[tokio::test]
    async fn cancelled_engine_call_releases_the_session() {
        let mut session = ConversationSession::new(
            Box::new(FlakyEngine {
                failures: 0,
                stall: true,
            }),
            TypingDelay::none(),
        );
        session.open().await;

        let stalled = tokio::time::timeout(Duration::from_millis(20), session.send("sim")).await;
        assert!(stalled.is_err());
        assert!(!session.is_awaiting_reply());
        assert_eq!(session.transcript().len(), 1);

        let reply = session.send("sim").await.map(|m| m.text.clone());
        assert_eq!(reply.ok(), Some("echo: sim".to_string()));
    }

    #[tokio::test]
    async fn cancelled_typing_delay_keeps_the_turn() {
        let mut session = ConversationSession::new(
            Box::new(ScriptedEngine::default()),
            TypingDelay::fixed(Duration::from_secs(60)),
        );

        let interrupted =
            tokio::time::timeout(Duration::from_millis(20), session.send("sim")).await;
        assert!(interrupted.is_err());
        assert!(!session.is_awaiting_reply());
        assert_eq!(roles(&session), vec![Role::User, Role::Assistant]);
        assert!(
            session.transcript().messages()[1]
                .text
                .starts_with("Hoje você está buscando")
        );
    }

    #[tokio::test]
    async fn scripted_engine_drives_session() {
        let mut session =
            ConversationSession::new(Box::new(ScriptedEngine::default()), TypingDelay::none());
        assert_eq!(session.engine_name(), "scripted");
        session.open().await;

        let reply = session.send("não").await.map(|m| m.text.clone());
        assert!(matches!(reply, Ok(text) if text.starts_with("Entendo perfeitamente")));
        assert!(session.is_finished());
        assert!(!session.show_contact_link());
    }
}
