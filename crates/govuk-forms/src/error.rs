//! Error types for form rendering.

use thiserror::Error;

/// Errors raised while collecting or rendering form markup.
#[derive(Debug, Error)]
pub enum FormError {
    /// A path fragment cannot be turned into an element id.
    ///
    /// Emitting the id anyway would produce a link that points nowhere, so
    /// this is always reported to the caller.
    #[error("malformed anchor path fragment {fragment:?}: {reason}")]
    MalformedAnchorPath { fragment: String, reason: String },

    /// The translation backend failed.
    #[error("translation lookup failed for {key}: {message}")]
    Translation { key: String, message: String },

    /// A nested entity could not be read during traversal.
    #[error("nested entity {field} is unavailable: {reason}")]
    EntityUnavailable { field: String, reason: String },

    /// Translations or theme JSON could not be parsed.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl FormError {
    pub(crate) fn malformed(fragment: &str, reason: impl Into<String>) -> Self {
        Self::MalformedAnchorPath {
            fragment: fragment.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
