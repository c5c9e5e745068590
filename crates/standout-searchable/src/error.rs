//! Error types for the searchable crate.

use thiserror::Error;

/// Errors that can occur when turning request parameters into predicates.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No grammar rule could classify the raw filter value.
    #[error("malformed filter value: {raw:?}")]
    MalformedFilter { raw: String },

    /// Neither an allow-list nor a deny-list of searchable fields was configured.
    #[error("searchable fields are not configured: provide an allow-list or a deny-list")]
    SearchabilityConfigurationMissing,

    /// The raw query string could not be decoded.
    #[error("invalid query string: {0}")]
    InvalidQueryString(#[from] serde_urlencoded::de::Error),

    /// Building the sub-query for a relation failed.
    #[error("failed to build scope for relation '{relation}': {source}")]
    Scope {
        relation: String,
        #[source]
        source: Box<SearchError>,
    },
}

impl SearchError {
    /// Creates a malformed filter error for the given raw value.
    pub fn malformed(raw: impl Into<String>) -> Self {
        Self::MalformedFilter { raw: raw.into() }
    }

    /// Wraps an error raised while building a relation scope.
    pub fn scope(relation: impl Into<String>, source: SearchError) -> Self {
        Self::Scope {
            relation: relation.into(),
            source: Box::new(source),
        }
    }
}

/// Result type for searchable operations.
pub type Result<T> = std::result::Result<T, SearchError>;
