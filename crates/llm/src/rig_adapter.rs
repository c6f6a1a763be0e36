use futures::StreamExt;
use qualifier_flow::{BoxFuture, Role};
use rig::completion::{CompletionModel, Message as RigMessage};
use rig::prelude::CompletionClient;
use rig::providers::openai;
use rig::streaming::StreamedAssistantContent;
use snafu::{ResultExt, ensure};

use super::provider::{
    CompletionRequest, CompletionsFailedSnafu, EmptyCompletionSnafu, EmptyMessageSetSnafu,
    HttpClientSnafu, LlmProvider, MissingApiKeySnafu, ProviderConfig, ProviderMessage,
    ProviderResult,
};

pub const RIG_OPENAI_PROVIDER_ID: &str = "openai";

/// OpenAI-compatible completion backend built on rig.
pub struct RigProviderAdapter {
    config: ProviderConfig,
}

impl RigProviderAdapter {
    /// Fails before any network activity when the API key is blank.
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        ensure!(
            !config.api_key.is_empty(),
            MissingApiKeySnafu {
                stage: "rig-adapter-new",
                provider_id: config.provider_id.clone(),
            }
        );

        Ok(Self { config })
    }

    fn build_client(config: &ProviderConfig) -> ProviderResult<openai::Client> {
        let mut builder = openai::Client::builder().api_key(config.api_key.as_str());
        if !config.endpoint.is_empty() {
            builder = builder.base_url(config.endpoint.as_str());
        }
        builder.build().context(HttpClientSnafu {
            stage: "build-client",
        })
    }

    fn to_rig_message(message: &ProviderMessage) -> RigMessage {
        match message.role {
            Role::User => RigMessage::user(message.content.clone()),
            Role::Assistant => RigMessage::assistant(message.content.clone()),
        }
    }

    fn text_chunk<R>(item: StreamedAssistantContent<R>) -> Option<String>
    where
        R: Clone + Unpin,
    {
        match item {
            StreamedAssistantContent::Text(text) => Some(text.text),
            _ => None,
        }
    }

    async fn run_completion(
        config: &ProviderConfig,
        request: CompletionRequest,
    ) -> ProviderResult<String> {
        let client = Self::build_client(config)?;
        let model = client.completion_model(config.model.clone());

        let mut messages = request
            .messages
            .iter()
            .map(Self::to_rig_message)
            .collect::<Vec<_>>();

        let Some(prompt) = messages.pop() else {
            return EmptyMessageSetSnafu {
                stage: "run-completion-pop-prompt",
            }
            .fail();
        };

        let mut builder = model.completion_request(prompt).messages(messages);
        if let Some(preamble) = request.preamble {
            builder = builder.preamble(preamble);
        }

        let mut stream = builder.stream().await.context(CompletionsFailedSnafu {
            stage: "open-stream",
        })?;

        let mut text = String::new();
        while let Some(item) = stream.next().await {
            let item = item.context(CompletionsFailedSnafu {
                stage: "stream-chunk",
            })?;
            if let Some(chunk) = Self::text_chunk(item) {
                text.push_str(&chunk);
            }
        }

        ensure!(
            !text.trim().is_empty(),
            EmptyCompletionSnafu {
                stage: "collect-stream",
            }
        );

        tracing::debug!(
            provider_id = %config.provider_id,
            model = %config.model,
            reply_chars = text.chars().count(),
            "completion collected"
        );
        Ok(text)
    }
}

impl LlmProvider for RigProviderAdapter {
    fn id(&self) -> &str {
        &self.config.provider_id
    }

    fn name(&self) -> &str {
        "Rig OpenAI"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn complete<'a>(&'a self, request: CompletionRequest) -> BoxFuture<'a, ProviderResult<String>> {
        Box::pin(async move {
            ensure!(
                !request.messages.is_empty(),
                EmptyMessageSetSnafu { stage: "complete" }
            );
            Self::run_completion(&self.config, request).await
        })
    }
}
