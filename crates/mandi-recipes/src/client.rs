//! HTTP client for the recipe-generation service.
//!
//! The service is an opaque text-generation collaborator: it takes a
//! free-text query ("something quick with paneer") and returns a title,
//! description, and ingredient list. This client only handles transport,
//! authentication, and typed error mapping.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::RecipesError;
use crate::retry::retry_with_backoff;
use crate::types::{GenerateResponse, GeneratedRecipe};

const DEFAULT_BASE_URL: &str = "https://generate.mandi.example/";

/// Retry/back-off knobs for [`RecipeClient::generate_with_retry`].
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base_ms: 1_000,
        }
    }
}

/// Client for the recipe-generation service.
///
/// Use [`RecipeClient::new`] for production or
/// [`RecipeClient::with_base_url`] to point at a mock server in tests.
pub struct RecipeClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl RecipeClient {
    /// Creates a client pointed at the production generation service.
    ///
    /// # Errors
    ///
    /// Returns [`RecipesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: Option<&str>, timeout_secs: u64) -> Result<Self, RecipesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`RecipesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`RecipesError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, RecipesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("mandi/0.1 (recipe-assistant)")
            .build()?;

        // Ensure the base URL ends with exactly one slash so join() appends
        // to the path instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| RecipesError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.map(ToOwned::to_owned),
            base_url,
        })
    }

    /// Generates a recipe for a free-text query.
    ///
    /// Calls `POST v1/generate` and returns the parsed [`GeneratedRecipe`].
    ///
    /// # Errors
    ///
    /// - [`RecipesError::ApiError`] if the service reports an error status
    ///   or returns an envelope without a recipe.
    /// - [`RecipesError::Http`] / [`RecipesError::UnexpectedStatus`] on
    ///   transport failure or a non-2xx response.
    /// - [`RecipesError::Deserialize`] if the body is not the expected shape.
    pub async fn generate(&self, query: &str) -> Result<GeneratedRecipe, RecipesError> {
        let url = self
            .base_url
            .join("v1/generate")
            .map_err(|e| RecipesError::ApiError(format!("invalid endpoint path: {e}")))?;

        let mut request = self
            .client
            .post(url.clone())
            .json(&serde_json::json!({ "query": query }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RecipesError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let envelope: GenerateResponse =
            serde_json::from_value(body).map_err(|e| RecipesError::Deserialize {
                context: format!("generate(query={query:?})"),
                source: e,
            })?;

        if !envelope.status.eq_ignore_ascii_case("ok") {
            return Err(RecipesError::ApiError(
                envelope
                    .error
                    .unwrap_or_else(|| format!("status '{}'", envelope.status)),
            ));
        }

        envelope
            .recipe
            .ok_or_else(|| RecipesError::ApiError("envelope has no recipe".to_owned()))
    }

    /// [`RecipeClient::generate`] wrapped in retry with back-off for
    /// transient failures.
    ///
    /// # Errors
    ///
    /// Same as [`RecipeClient::generate`], after retries are exhausted.
    pub async fn generate_with_retry(
        &self,
        query: &str,
        policy: RetryPolicy,
    ) -> Result<GeneratedRecipe, RecipesError> {
        retry_with_backoff(policy.max_retries, policy.backoff_base_ms, || {
            self.generate(query)
        })
        .await
    }
}
