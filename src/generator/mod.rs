pub mod batch;
pub mod prompt;

use reqwest::Client;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use batch::MessageBatch;
use crate::config::{Config, Credentials, Settings};
use crate::error::IcebreakerError;
use crate::providers::anthropic::AnthropicProvider;
use crate::providers::openai::OpenAiProvider;
use crate::providers::{CompletionRequest, Provider, ProviderKind};

/// Biography text. Arbitrary length, must not be blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BioText(String);

impl BioText {
    pub fn new(text: impl Into<String>) -> Result<Self, IcebreakerError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(IcebreakerError::InvalidArgument(
                "bio text must not be empty".to_owned(),
            ));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Turns a bio into up to three outreach messages through a hosted backend.
///
/// Holds no mutable state: every call builds a fresh prompt and makes exactly
/// one backend request. Nothing is cached or retried.
pub struct MessageGenerator {
    client: Client,
    credentials: Credentials,
    settings: Settings,
}

impl std::fmt::Debug for MessageGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageGenerator")
            .field("language", &self.settings.language)
            .finish()
    }
}

impl MessageGenerator {
    pub fn new(credentials: Credentials, settings: Settings) -> Result<Self, IcebreakerError> {
        let client = Client::builder().build().map_err(|e| {
            IcebreakerError::Configuration(format!("cannot build HTTP client: {e}"))
        })?;
        Ok(Self {
            client,
            credentials,
            settings,
        })
    }

    pub fn from_config(config: Config) -> Result<Self, IcebreakerError> {
        Self::new(config.credentials, config.settings)
    }

    /// Parse the provider name first, then the bio, then generate.
    /// An unknown provider fails before credentials or network are touched.
    pub async fn generate_from_str(
        &self,
        bio: &str,
        provider: &str,
    ) -> Result<MessageBatch, IcebreakerError> {
        let provider: ProviderKind = provider.parse()?;
        let bio = BioText::new(bio)?;
        self.generate(&bio, provider).await
    }

    pub async fn generate(
        &self,
        bio: &BioText,
        provider: ProviderKind,
    ) -> Result<MessageBatch, IcebreakerError> {
        let api_key = self.credentials.require(provider)?;
        let endpoint = self.settings.endpoint(provider);

        let span = info_span!("generate", request_id = %Uuid::now_v7(), %provider);
        async move {
            match provider {
                ProviderKind::OpenAi => {
                    let backend = OpenAiProvider::new(
                        self.client.clone(),
                        api_key,
                        &endpoint.model,
                        &endpoint.base_url,
                    );
                    self.run(&backend, provider, bio, Some(prompt::SYSTEM_PROMPT)).await
                }
                ProviderKind::Anthropic => {
                    let backend = AnthropicProvider::new(
                        self.client.clone(),
                        api_key,
                        &endpoint.model,
                        &endpoint.base_url,
                    );
                    self.run(&backend, provider, bio, None).await
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run<P: Provider>(
        &self,
        backend: &P,
        provider: ProviderKind,
        bio: &BioText,
        system: Option<&str>,
    ) -> Result<MessageBatch, IcebreakerError> {
        let prompt = prompt::build_prompt(bio.as_str(), &self.settings.language);
        let request = CompletionRequest {
            system,
            prompt: &prompt,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        debug!(
            backend = backend.name(),
            prompt_chars = prompt.chars().count(),
            "dispatching prompt"
        );
        let raw = backend.complete(&request).await.map_err(|source| {
            warn!(backend = backend.name(), error = %source, "backend call failed");
            IcebreakerError::Backend { provider, source }
        })?;

        let batch = MessageBatch::from_response(&raw);
        let candidate_lines = raw.lines().filter(|l| !l.trim().is_empty()).count();
        if candidate_lines > batch.len() {
            debug!(
                kept = batch.len(),
                dropped = candidate_lines - batch.len(),
                "filtered backend lines"
            );
        }
        Ok(batch)
    }
}
