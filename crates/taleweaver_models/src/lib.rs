//! Image provider clients and configuration for Taleweaver.
//!
//! Two [`ImageGenerator`](taleweaver_interface::ImageGenerator) backends are
//! provided:
//!
//! - [`TaskImageGenerator`] submits a task to the provider and polls it to
//!   completion. It needs the secret in [`API_SECRET_ENV`].
//! - [`ProxyImageGenerator`] forwards each request to a Taleweaver proxy
//!   server as `multipart/form-data`.
//!
//! Both retry rate-limit (429) and server-side (5xx) failures under a
//! [`RetryPolicy`].
//!
//! # Example
//!
//! ```no_run
//! use taleweaver_core::{ImageMediaType, ReferenceImage};
//! use taleweaver_interface::ImageGenerator;
//! use taleweaver_models::{TaleweaverConfig, TaskImageGenerator};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TaleweaverConfig::load()?;
//! let generator = TaskImageGenerator::from_config(&config)?;
//! let photo = ReferenceImage::new(std::fs::read("child.jpg")?, ImageMediaType::Jpeg);
//! let url = generator.generate_image("A child riding a unicorn", &photo).await?;
//! println!("{url}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod proxy;
mod retry;
mod runway;

pub use config::{
    ExportConfig, MIN_POLL_INTERVAL_MS, ProviderConfig, ProxyConfig, RetryConfig, ServerConfig,
    TaleweaverConfig,
};
pub use proxy::{ProxyImageGenerator, ProxyResponse};
pub use retry::RetryPolicy;
pub use runway::{
    API_SECRET_ENV, CreateTaskResponse, ReferenceImageRef, RunwayClient, TaskImageGenerator,
    TextToImageRequest,
};
