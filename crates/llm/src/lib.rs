//! Delegated turn engine: the qualification flow expressed as an instruction
//! for an external text-generation service.

use std::sync::Arc;

mod delegate;
mod instruction;
mod provider;
mod rig_adapter;

pub use delegate::{APOLOGY_MESSAGE, DelegatedEngine, StructuredReply, parse_structured_reply};
pub use instruction::FLOW_INSTRUCTION;
pub use provider::{
    CompletionRequest, DEFAULT_ENDPOINT, DEFAULT_OPENAI_MODEL, DEFAULT_PROVIDER_ID, LlmProvider,
    ProviderConfig, ProviderError, ProviderMessage, ProviderResult,
};
pub use rig_adapter::{RIG_OPENAI_PROVIDER_ID, RigProviderAdapter};

pub fn create_provider(mut config: ProviderConfig) -> ProviderResult<Arc<dyn LlmProvider>> {
    if config.provider_id.trim().is_empty() {
        config.provider_id = RIG_OPENAI_PROVIDER_ID.to_string();
    }

    match config.provider_id.as_str() {
        "openai" | "rig-openai" => {
            config.provider_id = RIG_OPENAI_PROVIDER_ID.to_string();
            Ok(Arc::new(RigProviderAdapter::new(config)?))
        }
        _ => Err(ProviderError::UnsupportedProvider {
            stage: "create-provider",
            provider_id: config.provider_id,
        }),
    }
}
