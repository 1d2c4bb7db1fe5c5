//! Error taxonomy and failure classification.
//!
//! Every failure the clients can report is a [`ChefError`]. Non-success
//! responses of the generation function are sorted by [`classify_failure`]:
//! the function reports an exhausted model quota either as a plain 429 or
//! buried in the provider's error detail, so both shapes are checked.

use reqwest::StatusCode;
use thiserror::Error;

use crate::client::config::{BASE_URL_VAR, PUBLISHABLE_KEY_VAR};
use crate::client::types::ErrorEnvelope;

/// Error code the generation function uses when the model call failed.
pub const PROVIDER_FAILURE_CODE: &str = "openai_recipe_failed";
/// Marker in the provider detail text that means the quota is exhausted.
pub const QUOTA_DETAIL_MARKER: &str = "insufficient_quota";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChefError {
    #[error("missing required configuration: {}", .0.join(", "))]
    ConfigMissing(Vec<&'static str>),

    #[error("invalid configuration value for {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    #[error("generation quota exhausted (HTTP {status})")]
    QuotaExceeded { status: u16 },

    #[error("HTTP {status} {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("failed to load recipes: {0}")]
    Read(String),
}

impl ChefError {
    /// User-facing text for the blocking notice.
    pub fn notice(&self) -> String {
        match self {
            ChefError::ConfigMissing(_) => format!(
                "Environment variables ({} / {}) are not set.",
                BASE_URL_VAR, PUBLISHABLE_KEY_VAR
            ),
            ChefError::InvalidConfig { .. } => self.to_string(),
            ChefError::QuotaExceeded { .. } => {
                "The recipe generator is out of OpenAI credits. Top up billing and try again."
                    .to_string()
            }
            ChefError::Http { status, body } => format!("HTTP {} {}", status, body),
            ChefError::Transport(message) | ChefError::MalformedResponse(message) => {
                message.clone()
            }
            ChefError::Read(message) => format!("Error: {}", message),
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, ChefError::QuotaExceeded { .. })
    }
}

impl ErrorEnvelope {
    pub fn is_quota_exhausted(&self) -> bool {
        self.status_code() == Some(429.0)
            || (self.error_code() == Some(PROVIDER_FAILURE_CODE)
                && self.detail_text().contains(QUOTA_DETAIL_MARKER))
    }
}

/// Classifies a non-success response of the generation function.
///
/// `body` is the raw response text and is kept unmodified in
/// [`ChefError::Http`].
pub fn classify_failure(status: StatusCode, body: String) -> ChefError {
    let code = status.as_u16();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ChefError::QuotaExceeded { status: code };
    }

    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) if envelope.is_quota_exhausted() => {
            tracing::debug!(
                "Quota failure reported in error body: error={:?}",
                envelope.error_code()
            );
            ChefError::QuotaExceeded { status: code }
        }
        Ok(_) => ChefError::Http { status: code, body },
        Err(e) => {
            tracing::debug!("Error body is not a JSON envelope: {}", e);
            ChefError::Http { status: code, body }
        }
    }
}
