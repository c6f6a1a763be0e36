#![deny(unsafe_code)]

//! Terminal host for the qualification chat.

pub mod error;
pub mod settings;
pub mod terminal;

use qualifier_flow::{ScriptedEngine, TurnEngine};
use qualifier_llm::{DelegatedEngine, create_provider};
use snafu::ResultExt;

use crate::error::{AppResult, BuildProviderSnafu};
use crate::settings::{AppSettings, EngineKind};

/// Picks the turn engine named in settings.
pub fn build_engine(settings: &AppSettings) -> AppResult<Box<dyn TurnEngine>> {
    match settings.engine {
        EngineKind::Scripted => Ok(Box::new(ScriptedEngine::default())),
        EngineKind::Delegated => {
            let provider = create_provider(settings.provider.to_provider_config())
                .context(BuildProviderSnafu {
                    stage: "build-delegated-engine",
                })?;
            tracing::info!(
                provider_id = %provider.id(),
                model = %provider.model(),
                "delegated engine ready"
            );
            Ok(Box::new(DelegatedEngine::new(provider)))
        }
    }
}
