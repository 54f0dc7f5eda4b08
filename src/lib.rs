pub mod config;
pub mod error;
pub mod frontend;
pub mod generator;
pub mod logging;
pub mod providers;
#[cfg(feature = "telegram")]
pub mod telegram;

pub use error::IcebreakerError;
pub use generator::batch::{CandidateMessage, MessageBatch};
pub use generator::{BioText, MessageGenerator};
pub use providers::ProviderKind;
