use qualifier_flow::{ContactLink, ConversationSession, Message, Role, SessionError};
use snafu::ResultExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{AppResult, ReadInputSnafu, TurnSnafu, WriteOutputSnafu};

const USER_LABEL: &str = "Você";
const CLOSED_NOTICE: &str = "Conversa encerrada.";

pub fn render_bubble(message: &Message, agent_name: &str) -> String {
    let speaker = match message.role {
        Role::Assistant => agent_name,
        Role::User => USER_LABEL,
    };
    format!("[{}] {}: {}", message.timestamp, speaker, message.text)
}

async fn write_line<W>(output: &mut W, line: &str, stage: &'static str) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    output
        .write_all(format!("{line}\n").as_bytes())
        .await
        .context(WriteOutputSnafu { stage })?;
    output.flush().await.context(WriteOutputSnafu { stage })
}

/// Plays one conversation over a line-oriented terminal.
///
/// Stops when the session finishes or input reaches end of file. A turn the
/// session rejects ends the chat with [`crate::error::AppError::Turn`].
pub async fn run_chat<R, W>(
    session: &mut ConversationSession,
    agent_name: &str,
    contact: &ContactLink,
    input: R,
    mut output: W,
) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Some(opening) = session.open().await {
        let line = render_bubble(opening, agent_name);
        write_line(&mut output, &line, "write-opening").await?;
    }

    let mut lines = input.lines();
    while !session.is_finished() {
        let Some(line) = lines
            .next_line()
            .await
            .context(ReadInputSnafu { stage: "next-line" })?
        else {
            tracing::info!("input closed before the conversation finished");
            return Ok(());
        };

        match session.send(&line).await {
            Ok(reply) => {
                let bubble = render_bubble(reply, agent_name);
                write_line(&mut output, &bubble, "write-reply").await?;
            }
            Err(SessionError::EmptyInput { .. }) => continue,
            Err(error) => return Err(error).context(TurnSnafu { stage: "send" }),
        }
    }

    if session.show_contact_link() {
        let line = format!("👉 Falar com o {agent_name} no WhatsApp: {}", contact.url());
        write_line(&mut output, &line, "write-contact-link").await?;
    }
    write_line(&mut output, CLOSED_NOTICE, "write-closed-notice").await
}
