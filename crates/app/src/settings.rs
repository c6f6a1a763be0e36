use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use qualifier_flow::{ContactLink, TypingDelay};
use qualifier_llm::{DEFAULT_ENDPOINT, DEFAULT_OPENAI_MODEL, DEFAULT_PROVIDER_ID, ProviderConfig};
use serde::{Deserialize, Serialize};

pub const SETTINGS_DIRECTORY_NAME: &str = "qualifier";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const ENV_PREFIX: &str = "QUALIFIER_";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const DEFAULT_CONTACT_PHONE: &str = "5511994760149";
pub const DEFAULT_CONTACT_MESSAGE: &str =
    "Oi William, acabei de passar pela triagem e quero saber como começar";
pub const DEFAULT_AGENT_NAME: &str = "William";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Scripted,
    Delegated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingSettings {
    pub base_ms: u64,
    pub per_char_ms: u64,
    pub max_ms: u64,
}

impl Default for TypingSettings {
    fn default() -> Self {
        Self {
            base_ms: 1000,
            per_char_ms: 0,
            max_ms: 4000,
        }
    }
}

impl TypingSettings {
    pub fn to_delay(&self) -> TypingDelay {
        TypingDelay {
            base: Duration::from_millis(self.base_ms),
            per_char: Duration::from_millis(self.per_char_ms),
            max: Duration::from_millis(self.max_ms.max(self.base_ms)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub provider_id: String,
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider_id: DEFAULT_PROVIDER_ID.to_string(),
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }
}

impl ProviderSettings {
    pub fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig::new(
            &self.provider_id,
            &self.api_key,
            &self.endpoint,
            &self.model,
        )
    }

    fn normalized(mut self) -> Self {
        let defaults = Self::default();
        self.provider_id = or_default(self.provider_id, defaults.provider_id);
        self.api_key = self.api_key.trim().to_string();
        self.endpoint = or_default(self.endpoint, defaults.endpoint);
        self.model = or_default(self.model, defaults.model);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub phone: String,
    pub message: String,
    pub agent_name: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            phone: DEFAULT_CONTACT_PHONE.to_string(),
            message: DEFAULT_CONTACT_MESSAGE.to_string(),
            agent_name: DEFAULT_AGENT_NAME.to_string(),
        }
    }
}

impl ContactSettings {
    pub fn link(&self) -> ContactLink {
        ContactLink::new(&self.phone, &self.message)
    }

    fn normalized(mut self) -> Self {
        let defaults = Self::default();
        self.phone = or_default(self.phone, defaults.phone);
        self.message = self.message.trim().to_string();
        self.agent_name = or_default(self.agent_name, defaults.agent_name);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub engine: EngineKind,
    pub typing: TypingSettings,
    pub provider: ProviderSettings,
    pub contact: ContactSettings,
}

impl AppSettings {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".qualifier"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    /// Defaults, then the JSON file, then `QUALIFIER_*` variables, then the
    /// bare provider key variable. Unreadable settings fall back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        match Self::figment(&path).extract::<AppSettings>() {
            Ok(settings) => settings.normalized(),
            Err(error) => {
                tracing::warn!(
                    "failed to load settings from {:?}: {}. using defaults",
                    path,
                    error
                );
                AppSettings::default()
            }
        }
    }

    fn figment(path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(AppSettings::default()));
        if path.exists() {
            figment = figment.merge(Json::file(path));
        } else {
            tracing::info!("settings file not found at {:?}, using defaults", path);
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[API_KEY_ENV])
                    .map(|_| "provider.api_key".into()),
            )
    }

    pub fn normalized(mut self) -> Self {
        self.provider = self.provider.normalized();
        self.contact = self.contact.normalized();
        self
    }
}

fn or_default(value: String, default: String) -> String {
    let value = value.trim();
    if value.is_empty() {
        default
    } else {
        value.to_string()
    }
}
