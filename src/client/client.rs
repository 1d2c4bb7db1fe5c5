use reqwest::Client;

use crate::client::{
    auth::PublishableKey,
    config::ChefConfig,
    error::{classify_failure, ChefError},
    types::*,
};

/// Name of the hosted function that generates recipes.
pub const RECIPE_FUNCTION: &str = "recipe";

pub struct RecipeClient {
    endpoint: String,
    client: Client,
    key: PublishableKey,
}

impl RecipeClient {
    pub fn new(config: &ChefConfig) -> Result<Self, ChefError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ChefError::Transport(e.to_string()))?;

        Ok(Self {
            endpoint: config.function_url(RECIPE_FUNCTION),
            client,
            key: config.key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one generation request.
    ///
    /// Nothing here prevents concurrent calls; each call is one POST.
    pub async fn generate_recipe(
        &self,
        request: &GenerationRequest,
    ) -> Result<RecipeResult, ChefError> {
        tracing::info!("Requesting recipe for: {}", request.title());
        tracing::debug!(
            "Making generation request to: {} (key {})",
            self.endpoint,
            self.key.preview()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", self.key.bearer())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error during generation: {}", e);
                ChefError::Transport(e.to_string())
            })?;

        let status = response.status();
        tracing::debug!("Generation response status: {}", status);

        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read generation response: {}", e);
            ChefError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            tracing::error!("Generation failed with status {}: {}", status, body);
            return Err(classify_failure(status, body));
        }

        let result: RecipeResult = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse generation response: {}", e);
            ChefError::MalformedResponse(format!("Invalid response from recipe function: {}", e))
        })?;

        tracing::info!(
            "Recipe generated: {} (image: {})",
            result.title,
            result.image().is_some()
        );
        Ok(result)
    }
}
