use std::sync::Arc;

use qualifier_flow::{
    BoxFuture, FlowResult, Message, StepId, StepTable, TurnEngine, TurnReply,
};
use serde::Deserialize;
use snafu::ResultExt;

use super::instruction::FLOW_INSTRUCTION;
use super::provider::{
    CompletionRequest, LlmProvider, ProviderMessage, ProviderResult, ReplyParseSnafu,
};

pub const APOLOGY_MESSAGE: &str =
    "Desculpe, tive um probleminha por aqui. 😊 Pode repetir sua resposta?";

/// Shape the instruction asks the service to answer with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StructuredReply {
    #[serde(rename = "response")]
    pub text: String,
    #[serde(rename = "isFinished")]
    pub finished: bool,
    #[serde(rename = "showButton")]
    pub show_button: bool,
}

impl From<StructuredReply> for TurnReply {
    fn from(reply: StructuredReply) -> Self {
        TurnReply {
            text: reply.text,
            finished: reply.finished,
            show_contact_link: reply.show_button,
        }
    }
}

/// Parses the service output, tolerating Markdown fences and stray prose
/// around the JSON object. Only the first object is read.
pub fn parse_structured_reply(raw: &str) -> ProviderResult<StructuredReply> {
    let trimmed = raw.trim();
    let payload = trimmed.find('{').map_or(trimmed, |start| &trimmed[start..]);

    let first = serde_json::Deserializer::from_str(payload)
        .into_iter::<StructuredReply>()
        .next();
    let parsed = match first {
        Some(parsed) => parsed,
        None => serde_json::from_str(payload),
    };

    parsed.context(ReplyParseSnafu {
        stage: "parse-structured-reply",
        raw: raw.to_string(),
    })
}

/// Turn engine that hands the whole flow to an external generation service.
///
/// Every turn sends the full history plus [`FLOW_INSTRUCTION`]. Provider or
/// parse failures never escape the turn: they become [`APOLOGY_MESSAGE`]
/// with both flags cleared.
pub struct DelegatedEngine {
    provider: Arc<dyn LlmProvider>,
    instruction: String,
    opening: String,
}

impl DelegatedEngine {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        let opening = StepTable::standard()
            .lookup(StepId::INITIAL)
            .map(|step| step.message.to_string())
            .unwrap_or_default();

        Self {
            provider,
            instruction: FLOW_INSTRUCTION.to_string(),
            opening,
        }
    }

    fn build_request(&self, history: &[Message]) -> CompletionRequest {
        let messages = history
            .iter()
            .map(|message| ProviderMessage::new(message.role, message.text.clone()))
            .collect();

        CompletionRequest::new(messages).with_preamble(self.instruction.clone())
    }

    async fn request_reply(&self, history: &[Message]) -> ProviderResult<StructuredReply> {
        let raw = self.provider.complete(self.build_request(history)).await?;
        parse_structured_reply(&raw)
    }
}

impl TurnEngine for DelegatedEngine {
    fn name(&self) -> &str {
        "delegated"
    }

    fn opening(&self) -> TurnReply {
        TurnReply::ongoing(self.opening.clone())
    }

    fn next_turn<'a>(
        &'a mut self,
        history: &'a [Message],
        _input: &'a str,
    ) -> BoxFuture<'a, FlowResult<TurnReply>> {
        Box::pin(async move {
            match self.request_reply(history).await {
                Ok(reply) => Ok(reply.into()),
                Err(error) => {
                    tracing::warn!(
                        provider_id = %self.provider.id(),
                        model = %self.provider.model(),
                        error = %error,
                        "delegated turn failed; answering with apology"
                    );
                    Ok(TurnReply::ongoing(APOLOGY_MESSAGE))
                }
            }
        })
    }
}
