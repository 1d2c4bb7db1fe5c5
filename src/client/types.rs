//! Type definitions for the recipe generation function and the recipes table.
//!
//! ## Key Types
//!
//! - [`GenerationRequest`] - Trimmed, non-blank dish title sent to the generation function
//! - [`RecipeResult`] - Generated recipe returned by the function
//! - [`ErrorEnvelope`] - Error body returned by the function on failure
//! - [`RecipeRecord`] - A persisted row of the `recipes` table
//!
//! ## API Compatibility
//!
//! - [`RecipeRecord`] accepts both integer and string ids, and `created_at` values
//!   with or without a UTC offset (see [`timestamp`])
//! - An empty `image_url` is treated the same as a missing one

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request body for the generation function.
///
/// Can only be built from a title that is non-blank after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    title: String,
}

impl GenerationRequest {
    /// Trims `title`, returning `None` when nothing is left.
    pub fn new(title: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title: title.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A generated recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeResult {
    /// Dish title as echoed by the generator
    pub title: String,
    /// Recipe body text
    pub recipe: String,
    /// Hosted image URL, when the generator produced one
    #[serde(default)]
    pub image_url: Option<String>,
}

impl RecipeResult {
    /// The image URL, if present and non-empty.
    pub fn image(&self) -> Option<&str> {
        non_empty(self.image_url.as_deref())
    }
}

/// Error body of a failed generation call.
///
/// Every field is optional and loosely typed; the function reports failures
/// inconsistently (`status` may be `429`, `429.0` or `"error"`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Numeric `status`, whether sent as an integer or a float.
    pub fn status_code(&self) -> Option<f64> {
        self.status.as_ref().and_then(serde_json::Value::as_f64)
    }

    /// `error` when it is a string.
    pub fn error_code(&self) -> Option<&str> {
        self.error.as_ref().and_then(serde_json::Value::as_str)
    }

    /// `detail` as text: strings verbatim, other values as JSON, absent as "".
    pub fn detail_text(&self) -> String {
        match &self.detail {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Row identifier; the table may use integer or text keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

/// A persisted recipe from the `recipes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    /// Unique row identifier
    pub id: RecordId,
    /// Dish title
    pub title: String,
    /// Recipe body, if generation stored one
    #[serde(default)]
    pub recipe: Option<String>,
    /// Hosted image URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Row creation time
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl RecipeRecord {
    pub fn image(&self) -> Option<&str> {
        non_empty(self.image_url.as_deref())
    }

    pub fn body(&self) -> &str {
        self.recipe.as_deref().unwrap_or("")
    }
}

/// Error body of the hosted REST layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Serde adapter for `created_at`.
///
/// `timestamptz` columns arrive as RFC 3339 (`2024-01-05T15:04:05.123+00:00`);
/// `timestamp` columns arrive without an offset and are read as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        // Postgres may emit a short "+00" offset
        if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%#z") {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}
