//! Collaborator traits implemented by the host.
//!
//! Blocks read content through these traits and never construct the
//! errors themselves; a provider failure is returned to the caller as-is.

use thiserror::Error;

use crate::types::{ContentTypeSummary, QueryCriteria, QueryResultItem, StatusCounts, TypeLabels};

/// Errors raised by host providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("unknown content type: {0}")]
    UnknownType(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("invalid query criteria: {0}")]
    InvalidCriteria(String),
}

/// Result type alias using ProviderError.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// The host's content type registry.
pub trait ContentTypeProvider {
    /// Slugs of all public content types, in registration order.
    fn list_public_types(&self) -> ProviderResult<Vec<String>>;

    /// Item totals per status for one type.
    fn count_by_status(&self, slug: &str) -> ProviderResult<StatusCounts>;

    /// Display labels for one type.
    fn labels(&self, slug: &str) -> ProviderResult<TypeLabels>;

    /// Labels plus the displayable count for one type.
    fn summary(&self, slug: &str) -> ProviderResult<ContentTypeSummary> {
        let counts = self.count_by_status(slug)?;
        let labels = self.labels(slug)?;
        Ok(ContentTypeSummary::from_parts(slug, labels, &counts))
    }
}

/// The host's content query engine.
pub trait QueryProvider {
    /// Items matching `criteria`, in the engine's result order.
    fn query(&self, criteria: &QueryCriteria) -> ProviderResult<Vec<QueryResultItem>>;
}
