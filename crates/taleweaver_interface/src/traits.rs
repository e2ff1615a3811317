//! Trait definitions for image-generation backends.

use async_trait::async_trait;
use std::sync::Arc;
use taleweaver_core::ReferenceImage;
use taleweaver_error::ProviderResult;

/// Core trait that every image backend implements.
///
/// Implementations turn a text prompt plus a reference photo into the URL of
/// a generated illustration. Transient failures are retried inside the
/// implementation; an `Err` returned from here is final for that request.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one illustration and return its URL.
    async fn generate_image(&self, prompt: &str, reference: &ReferenceImage) -> ProviderResult<String>;

    /// Backend name (e.g., "runway", "proxy").
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T: ImageGenerator + ?Sized> ImageGenerator for Arc<T> {
    async fn generate_image(&self, prompt: &str, reference: &ReferenceImage) -> ProviderResult<String> {
        (**self).generate_image(prompt, reference).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
