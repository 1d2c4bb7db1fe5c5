//! Read access to the `recipes` table.
//!
//! [`RecipeStore`] is the narrow seam to the hosted database: "give me at most
//! `limit` rows, newest first". [`SupabaseStore`] implements it over the hosted
//! REST layer. [`RecentReader`] sits on top and enforces ordering and the row
//! bound itself, whatever the store hands back.

use reqwest::Client;
use std::future::Future;

use crate::client::{
    auth::PublishableKey,
    config::ChefConfig,
    error::ChefError,
    types::{RecipeRecord, StoreErrorBody},
};

pub const RECIPES_TABLE: &str = "recipes";
pub const RECIPE_COLUMNS: &str = "id,title,recipe,image_url,created_at";

pub trait RecipeStore {
    /// Up to `limit` records ordered by `created_at` descending.
    fn latest(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RecipeRecord>, ChefError>> + Send;
}

pub struct SupabaseStore {
    table_url: String,
    client: Client,
    key: PublishableKey,
}

impl SupabaseStore {
    pub fn new(config: &ChefConfig) -> Result<Self, ChefError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ChefError::Read(e.to_string()))?;

        Ok(Self {
            table_url: config.rest_url(RECIPES_TABLE),
            client,
            key: config.key.clone(),
        })
    }

    pub fn query_url(&self, limit: usize) -> String {
        format!(
            "{}?select={}&order={}&limit={}",
            self.table_url,
            urlencoding::encode(RECIPE_COLUMNS),
            urlencoding::encode("created_at.desc"),
            limit
        )
    }
}

impl RecipeStore for SupabaseStore {
    async fn latest(&self, limit: usize) -> Result<Vec<RecipeRecord>, ChefError> {
        let url = self.query_url(limit);
        tracing::debug!("Making request to get recent recipes: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", self.key.expose())
            .header("Authorization", self.key.bearer())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error getting recent recipes: {}", e);
                ChefError::Read(e.to_string())
            })?;

        let status = response.status();
        tracing::debug!("Recent recipes response status: {}", status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            tracing::error!(
                "Failed to get recent recipes with status {}: {}",
                status,
                error_body
            );

            let message = serde_json::from_str::<StoreErrorBody>(&error_body)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("HTTP {} {}", status.as_u16(), error_body));
            return Err(ChefError::Read(message));
        }

        let records: Vec<RecipeRecord> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse recent recipes response: {}", e);
            ChefError::Read(format!("Invalid response format from recipes table: {}", e))
        })?;

        tracing::debug!("Successfully retrieved {} recipes", records.len());
        Ok(records)
    }
}

pub struct RecentReader<S> {
    store: S,
}

impl<S: RecipeStore> RecentReader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The `limit` most recently created records, newest first.
    pub async fn fetch_recent(&self, limit: usize) -> Result<Vec<RecipeRecord>, ChefError> {
        let mut records = self.store.latest(limit).await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }
}
