//! Multipart client for the image proxy.

use crate::{RetryPolicy, TaleweaverConfig};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use taleweaver_core::ReferenceImage;
use taleweaver_error::{ProviderError, ProviderErrorKind, ProviderResult};
use taleweaver_interface::ImageGenerator;
use tracing::{debug, error, instrument};

/// JSON envelope returned by the proxy endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    /// Generated image URL on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Error message on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Image generator that forwards each request to a Taleweaver proxy.
///
/// The proxy holds the provider secret, so this client needs no credential.
#[derive(Debug, Clone)]
pub struct ProxyImageGenerator {
    client: Client,
    url: String,
    style: Option<String>,
    retry: RetryPolicy,
}

impl ProxyImageGenerator {
    /// Create a proxy client for the endpoint at `url`.
    pub fn new(url: impl Into<String>, style: Option<String>, retry: RetryPolicy) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            style,
            retry,
        }
    }

    /// Build a proxy client from configuration, if a proxy URL is configured.
    pub fn from_config(config: &TaleweaverConfig) -> Option<Self> {
        config
            .proxy
            .url
            .as_ref()
            .map(|url| Self::new(url.clone(), config.proxy.style.clone(), config.retry.policy()))
    }

    /// Endpoint requests are sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self, prompt, reference), fields(url = %self.url))]
    async fn submit(&self, prompt: &str, reference: &ReferenceImage) -> ProviderResult<String> {
        let media_type = reference.media_type();
        let image = Part::bytes(reference.bytes().clone())
            .file_name(format!("child.{}", media_type.extension()))
            .mime_str(media_type.mime())
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Transport(format!(
                    "Invalid image part: {}",
                    e
                )))
            })?;

        let mut form = Form::new()
            .text("prompt", prompt.to_string())
            .part("childImage", image);
        if let Some(style) = &self.style {
            form = form.text("style", style.clone());
        }

        debug!("Sending proxy request");
        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Transport(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::Transport(format!(
                "Failed to read response: {}",
                e
            )))
        })?;
        let envelope = serde_json::from_str::<ProxyResponse>(&body).ok();

        if !status.is_success() {
            return Err(ProviderError::new(status_error(status, envelope.and_then(|e| e.error))));
        }

        envelope
            .and_then(|e| e.image_url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::EmptyOutput))
    }
}

/// Classify a non-success proxy response.
///
/// The proxy has already retried the provider before answering 500 with an
/// `error` envelope, so that answer is a finished generation failure. Other
/// statuses keep their code and retry classification.
fn status_error(status: StatusCode, error: Option<String>) -> ProviderErrorKind {
    match error {
        Some(message) if status == StatusCode::INTERNAL_SERVER_ERROR => {
            ProviderErrorKind::GenerationFailed(message)
        }
        error => ProviderErrorKind::HttpStatus {
            status_code: status.as_u16(),
            message: error
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string()),
        },
    }
}

#[async_trait]
impl ImageGenerator for ProxyImageGenerator {
    #[instrument(skip(self, prompt, reference), fields(provider = "proxy"))]
    async fn generate_image(&self, prompt: &str, reference: &ReferenceImage) -> ProviderResult<String> {
        self.retry
            .run("proxy_generate", || self.submit(prompt, reference))
            .await
            .inspect_err(|e| error!(error = %e, "Proxy image generation failed"))
    }

    fn provider_name(&self) -> &'static str {
        "proxy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_failure_envelope_is_permanent() {
        let kind = status_error(StatusCode::INTERNAL_SERVER_ERROR, Some("Moderation".to_string()));
        assert_eq!(kind, ProviderErrorKind::GenerationFailed("Moderation".to_string()));
        assert!(!kind.is_retryable());
    }

    #[test]
    fn test_gateway_errors_stay_retryable() {
        let kind = status_error(StatusCode::BAD_GATEWAY, Some("upstream down".to_string()));
        assert!(kind.is_retryable());
        let kind = status_error(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(
            kind,
            ProviderErrorKind::HttpStatus {
                status_code: 500,
                message: "Internal Server Error".to_string()
            }
        );
        assert!(kind.is_retryable());
    }
}
