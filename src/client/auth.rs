//! Credential handling for the hosted project.
//!
//! The project is gated by a publishable key. It is safe to ship to clients but
//! is still kept out of logs: only a short preview is ever printed.

use std::fmt;

/// # Publishable Key
///
/// Sent on every request as `Authorization: Bearer <key>`. The REST layer
/// additionally expects the same key in an `apikey` header.
#[derive(Clone, PartialEq, Eq)]
pub struct PublishableKey(String);

impl PublishableKey {
    pub fn new(key: String) -> Self {
        Self(key)
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First 10 characters followed by `...`.
    pub fn preview(&self) -> String {
        let head: String = self.0.chars().take(10).collect();
        format!("{}...", head)
    }
}

impl fmt::Debug for PublishableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublishableKey").field(&self.preview()).finish()
    }
}
