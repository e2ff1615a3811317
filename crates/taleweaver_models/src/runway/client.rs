//! Provider HTTP client.

use super::dto::{CreateTaskResponse, ErrorEnvelope, ReferenceImageRef, TextToImageRequest};
use crate::ProviderConfig;
use reqwest::{Client, Response};
use taleweaver_core::{GenerationTask, ReferenceImage};
use taleweaver_error::{ProviderError, ProviderErrorKind, ProviderResult};
use tracing::{debug, instrument};

/// Environment variable holding the provider secret.
pub const API_SECRET_ENV: &str = "RUNWAYML_API_SECRET";

/// Thin client for the provider's task endpoints.
///
/// Each method performs exactly one HTTP exchange; retry and polling live in
/// [`TaskImageGenerator`](crate::TaskImageGenerator).
#[derive(Debug, Clone)]
pub struct RunwayClient {
    client: Client,
    api_key: String,
    base_url: String,
    api_version: String,
    model: String,
    ratio: String,
    reference_tag: String,
}

impl RunwayClient {
    /// Creates a client with the secret read from [`API_SECRET_ENV`].
    ///
    /// # Errors
    ///
    /// Returns [`ProviderErrorKind::MissingCredential`] if the variable is
    /// unset or empty.
    #[instrument(skip_all)]
    pub fn from_env(config: &ProviderConfig) -> ProviderResult<Self> {
        let api_key = std::env::var(API_SECRET_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::new(ProviderErrorKind::MissingCredential(
                    API_SECRET_ENV.to_string(),
                ))
            })?;

        Ok(Self::with_api_key(config, api_key))
    }

    /// Creates a client with an explicit secret.
    pub fn with_api_key(config: &ProviderConfig, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            model: config.model.clone(),
            ratio: config.ratio.clone(),
            reference_tag: config.reference_tag.clone(),
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a text-to-image task and return its id.
    #[instrument(skip(self, prompt, reference), fields(prompt_len = prompt.len(), image_bytes = reference.len()))]
    pub async fn create_task(&self, prompt: &str, reference: &ReferenceImage) -> ProviderResult<String> {
        let body = TextToImageRequest {
            model: self.model.clone(),
            ratio: self.ratio.clone(),
            prompt_text: prompt.to_string(),
            reference_images: vec![ReferenceImageRef {
                uri: reference.to_data_url(),
                tag: self.reference_tag.clone(),
            }],
        };

        let url = format!("{}/v1/text_to_image", self.base_url);
        debug!(url = %url, model = %self.model, "Creating image generation task");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("X-Runway-Version", &self.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Transport(format!("Request failed: {}", e)))
            })?;

        let created: CreateTaskResponse = Self::parse(response).await?;
        if created.id.is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::InvalidResponse(
                "Task id is empty".to_string(),
            )));
        }

        debug!(task_id = %created.id, "Task created");
        Ok(created.id)
    }

    /// Fetch the current state of a task.
    #[instrument(skip(self))]
    pub async fn get_task(&self, task_id: &str) -> ProviderResult<GenerationTask> {
        let url = format!("{}/v1/tasks/{}", self.base_url, task_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .header("X-Runway-Version", &self.api_version)
            .send()
            .await
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Transport(format!("Request failed: {}", e)))
            })?;

        let task: GenerationTask = Self::parse(response).await?;
        debug!(task_id, status = %task.status(), "Task status");
        Ok(task)
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> ProviderResult<T> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = ErrorEnvelope::message_from(&error_text);
            return Err(ProviderError::new(ProviderErrorKind::HttpStatus {
                status_code: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    message
                },
            }));
        }

        response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::InvalidResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }
}
