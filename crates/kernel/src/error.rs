//! Kernel error types.

use site_counts_sdk::provider::ProviderError;
use thiserror::Error;

/// Kernel errors.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("unknown block: {0}")]
    UnknownBlock(String),

    #[error("block already registered: {0}")]
    DuplicateBlock(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("invalid fixture: {0}")]
    Fixture(String),

    #[error("invalid plural forms: {0}")]
    PluralForms(String),

    #[error("i/o error")]
    Io(#[from] std::io::Error),

    #[error("yaml error")]
    Yaml(#[from] serde_yml::Error),
}

/// Result type alias using KernelError.
pub type KernelResult<T> = Result<T, KernelError>;
