//! Runtime configuration.
//!
//! Everything the clients need is read once into a [`ChefConfig`] and passed to
//! constructors. [`ChefConfig::from_env`] reads the process environment;
//! [`ChefConfig::from_lookup`] accepts any key lookup so tests never have to
//! mutate the environment.

use chrono::Locale;
use std::time::Duration;

use crate::client::auth::PublishableKey;
use crate::client::error::ChefError;

pub const BASE_URL_VAR: &str = "SUPABASE_URL";
pub const PUBLISHABLE_KEY_VAR: &str = "SUPABASE_PUBLISHABLE_DEFAULT_KEY";
pub const RECENT_LIMIT_VAR: &str = "CHEF_RECENT_LIMIT";
pub const PREVIEW_CHARS_VAR: &str = "CHEF_PREVIEW_CHARS";
pub const LOCALE_VAR: &str = "CHEF_LOCALE";
pub const TIMEOUT_VAR: &str = "CHEF_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_RECENT_LIMIT: usize = 10;
pub const DEFAULT_PREVIEW_CHARS: usize = 120;
pub const DEFAULT_LOCALE: Locale = Locale::ko_KR;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Settings that only affect how records are rendered.
#[derive(Debug, Clone, Copy)]
pub struct DisplaySettings {
    pub locale: Locale,
    pub preview_chars: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChefConfig {
    /// Project base URL without a trailing slash
    pub base_url: String,
    pub key: PublishableKey,
    pub recent_limit: usize,
    pub request_timeout: Duration,
    pub display: DisplaySettings,
}

impl ChefConfig {
    /// Config with the required values and defaults for everything else.
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Result<Self, ChefError> {
        let base_url = base_url.into();
        let key = key.into();
        let mut missing = Vec::new();
        if base_url.trim().is_empty() {
            missing.push(BASE_URL_VAR);
        }
        if key.trim().is_empty() {
            missing.push(PUBLISHABLE_KEY_VAR);
        }
        if !missing.is_empty() {
            return Err(ChefError::ConfigMissing(missing));
        }

        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            key: PublishableKey::new(key.trim().to_string()),
            recent_limit: DEFAULT_RECENT_LIMIT,
            request_timeout: DEFAULT_TIMEOUT,
            display: DisplaySettings::default(),
        })
    }

    pub fn from_env() -> Result<Self, ChefError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChefError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(
            get(BASE_URL_VAR).unwrap_or_default(),
            get(PUBLISHABLE_KEY_VAR).unwrap_or_default(),
        )?;

        if let Some(raw) = get(RECENT_LIMIT_VAR) {
            config.recent_limit = parse_positive(RECENT_LIMIT_VAR, &raw)?;
        }
        if let Some(raw) = get(PREVIEW_CHARS_VAR) {
            config.display.preview_chars = parse_positive(PREVIEW_CHARS_VAR, &raw)?;
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = parse_positive(TIMEOUT_VAR, &raw)?;
            config.request_timeout = Duration::from_secs(secs as u64);
        }
        if let Some(raw) = get(LOCALE_VAR) {
            config.display.locale =
                Locale::try_from(raw.trim()).map_err(|_| ChefError::InvalidConfig {
                    key: LOCALE_VAR,
                    reason: format!("unknown locale '{}'", raw.trim()),
                })?;
        } else {
            tracing::debug!("{} not set, using default: ko_KR", LOCALE_VAR);
        }

        Ok(config)
    }

    pub fn function_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{}", self.base_url, name)
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<usize, ChefError> {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        Ok(_) => Err(ChefError::InvalidConfig {
            key,
            reason: "must be greater than zero".to_string(),
        }),
        Err(e) => Err(ChefError::InvalidConfig {
            key,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn required_values_and_defaults() {
        let config = ChefConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://abc.supabase.co/"),
            (PUBLISHABLE_KEY_VAR, "sb_publishable_123"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://abc.supabase.co");
        assert_eq!(config.key.expose(), "sb_publishable_123");
        assert_eq!(config.recent_limit, 10);
        assert_eq!(config.display.preview_chars, 120);
        assert!(matches!(config.display.locale, Locale::ko_KR));
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(
            config.function_url("recipe"),
            "https://abc.supabase.co/functions/v1/recipe"
        );
        assert_eq!(
            config.rest_url("recipes"),
            "https://abc.supabase.co/rest/v1/recipes"
        );
    }

    #[test]
    fn missing_values_are_all_reported() {
        let err = ChefConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(
            err,
            ChefError::ConfigMissing(vec![BASE_URL_VAR, PUBLISHABLE_KEY_VAR])
        );

        let err = ChefConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://abc.supabase.co"),
            (PUBLISHABLE_KEY_VAR, "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ChefError::ConfigMissing(vec![PUBLISHABLE_KEY_VAR]));
    }

    #[test]
    fn optional_overrides() {
        let config = ChefConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "http://localhost:54321"),
            (PUBLISHABLE_KEY_VAR, "key"),
            (RECENT_LIMIT_VAR, "5"),
            (PREVIEW_CHARS_VAR, "40"),
            (LOCALE_VAR, "en_US"),
            (TIMEOUT_VAR, "30"),
        ]))
        .unwrap();

        assert_eq!(config.recent_limit, 5);
        assert_eq!(config.display.preview_chars, 40);
        assert!(matches!(config.display.locale, Locale::en_US));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn invalid_overrides() {
        let base = [
            (BASE_URL_VAR, "http://localhost:54321"),
            (PUBLISHABLE_KEY_VAR, "key"),
        ];

        let mut pairs = base.to_vec();
        pairs.push((RECENT_LIMIT_VAR, "0"));
        assert!(matches!(
            ChefConfig::from_lookup(lookup(&pairs)),
            Err(ChefError::InvalidConfig { key: RECENT_LIMIT_VAR, .. })
        ));

        let mut pairs = base.to_vec();
        pairs.push((LOCALE_VAR, "xx_NOPE"));
        assert!(matches!(
            ChefConfig::from_lookup(lookup(&pairs)),
            Err(ChefError::InvalidConfig { key: LOCALE_VAR, .. })
        ));
    }
}
