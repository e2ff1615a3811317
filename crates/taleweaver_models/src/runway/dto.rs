//! Wire types for the provider API.

use serde::{Deserialize, Serialize};

/// Reference image attached to a text-to-image request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceImageRef {
    /// Image location; a `data:` URL for uploaded photos
    pub uri: String,
    /// Tag the prompt can refer to
    pub tag: String,
}

/// Body of `POST /v1/text_to_image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToImageRequest {
    /// Model identifier
    pub model: String,
    /// Output aspect ratio
    pub ratio: String,
    /// Text prompt
    pub prompt_text: String,
    /// Reference images
    pub reference_images: Vec<ReferenceImageRef>,
}

/// Response of `POST /v1/text_to_image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskResponse {
    /// Identifier of the created task
    pub id: String,
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorEnvelope {
    /// Best message from a response body, falling back to the raw text.
    pub(crate) fn message_from(body: &str) -> String {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error.or(envelope.message))
            .unwrap_or_else(|| body.trim().to_string())
    }
}
