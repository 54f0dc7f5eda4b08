use thiserror::Error;

use crate::providers::{ProviderError, ProviderKind};

#[derive(Debug, Error)]
pub enum IcebreakerError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{provider} backend error: {source}")]
    Backend {
        provider: ProviderKind,
        #[source]
        source: ProviderError,
    },
}
