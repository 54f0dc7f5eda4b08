use std::path::Path;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::IcebreakerError;
use crate::providers::{ProviderKind, anthropic, openai};

const MAX_SETTINGS_FILE_SIZE: u64 = 64 * 1024; // 64 KiB

pub const SETTINGS_PATH_ENV: &str = "ICEBREAKER_SETTINGS";
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

pub const DEFAULT_LANGUAGE: &str = "Russian";
pub const DEFAULT_TEMPERATURE: f64 = 0.8;
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// API keys, one per provider. Unset and empty values are both "missing".
#[derive(Debug, Default)]
pub struct Credentials {
    openai: Option<SecretString>,
    anthropic: Option<SecretString>,
}

impl Credentials {
    pub fn new(openai: Option<String>, anthropic: Option<String>) -> Self {
        Self {
            openai: openai.and_then(non_empty_secret),
            anthropic: anthropic.and_then(non_empty_secret),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            std::env::var(ProviderKind::OpenAi.env_key()).ok(),
            std::env::var(ProviderKind::Anthropic.env_key()).ok(),
        )
    }

    /// A copy of the key for `provider`, or a `Configuration` error naming
    /// the variable to set.
    pub fn require(&self, provider: ProviderKind) -> Result<SecretString, IcebreakerError> {
        let key = match provider {
            ProviderKind::OpenAi => self.openai.as_ref(),
            ProviderKind::Anthropic => self.anthropic.as_ref(),
        };
        key.map(|k| SecretString::from(k.expose_secret().to_owned())).ok_or_else(|| {
            IcebreakerError::Configuration(format!(
                "{} is not set in the environment",
                provider.env_key()
            ))
        })
    }
}

fn non_empty_secret(value: String) -> Option<SecretString> {
    if value.trim().is_empty() {
        None
    } else {
        Some(SecretString::from(value))
    }
}

// --- TOML settings (optional file, every key defaults) ---

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Human language the messages are written in.
    pub language: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub openai: EndpointSettings,
    pub anthropic: EndpointSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointSettings {
    pub model: String,
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            openai: EndpointSettings {
                model: openai::DEFAULT_MODEL.to_owned(),
                base_url: openai::DEFAULT_BASE_URL.to_owned(),
            },
            anthropic: EndpointSettings {
                model: anthropic::DEFAULT_MODEL.to_owned(),
                base_url: anthropic::DEFAULT_BASE_URL.to_owned(),
            },
        }
    }
}

impl FromStr for Settings {
    type Err = IcebreakerError;

    fn from_str(content: &str) -> Result<Self, IcebreakerError> {
        let settings: Settings = toml::from_str(content)
            .map_err(|e| IcebreakerError::Configuration(format!("invalid settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }
}

impl Settings {
    /// Load settings from a TOML file. Checks file size before reading.
    pub fn load(path: &Path) -> Result<Self, IcebreakerError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            IcebreakerError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;

        if metadata.len() > MAX_SETTINGS_FILE_SIZE {
            return Err(IcebreakerError::Configuration(format!(
                "settings file exceeds {MAX_SETTINGS_FILE_SIZE} byte limit"
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            IcebreakerError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;

        content.parse()
    }

    pub fn endpoint(&self, provider: ProviderKind) -> &EndpointSettings {
        match provider {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
        }
    }

    fn validate(&self) -> Result<(), IcebreakerError> {
        if self.language.trim().is_empty() {
            return Err(IcebreakerError::Configuration(
                "language must not be empty".to_owned(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(IcebreakerError::Configuration(format!(
                "temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(IcebreakerError::Configuration(
                "max_tokens must be positive".to_owned(),
            ));
        }
        for provider in ProviderKind::ALL {
            let endpoint = self.endpoint(provider);
            if endpoint.model.trim().is_empty() || endpoint.base_url.trim().is_empty() {
                return Err(IcebreakerError::Configuration(format!(
                    "[{provider}] model and base_url must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Everything the generator needs, resolved from the process environment.
#[derive(Debug)]
pub struct Config {
    pub credentials: Credentials,
    pub settings: Settings,
}

impl Config {
    /// Load `.env` if present, read API keys, and apply the settings file
    /// named by `ICEBREAKER_SETTINGS` (defaults when unset).
    pub fn from_env() -> Result<Self, IcebreakerError> {
        dotenvy::dotenv().ok();

        let settings = match std::env::var(SETTINGS_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Settings::load(Path::new(&path))?,
            _ => Settings::default(),
        };

        Ok(Self {
            credentials: Credentials::from_env(),
            settings,
        })
    }
}

/// Bot token for the Telegram front end. Missing token is fatal at startup.
pub fn telegram_token() -> Result<SecretString, IcebreakerError> {
    dotenvy::dotenv().ok();
    std::env::var(TELEGRAM_TOKEN_ENV)
        .ok()
        .and_then(non_empty_secret)
        .ok_or_else(|| {
            IcebreakerError::Configuration(format!(
                "{TELEGRAM_TOKEN_ENV} is not set in the environment"
            ))
        })
}
