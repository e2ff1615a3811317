//! HTTP proxy endpoint for Taleweaver image generation.
//!
//! The proxy keeps the provider credential on the server side. Clients post
//! a prompt and a reference photo as `multipart/form-data` and receive a JSON
//! envelope: `{"imageUrl": ...}` on success, `{"error": ...}` otherwise.
//!
//! # Routes
//!
//! - `POST /api/generate-image` forwards one request to the configured
//!   [`ImageGenerator`](taleweaver_interface::ImageGenerator)
//! - `GET /health` reports liveness
//!
//! Every response body is JSON, including 404s, oversized uploads and
//! handler panics.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taleweaver_models::{TaleweaverConfig, TaskImageGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TaleweaverConfig::load()?;
//!     let generator = Arc::new(TaskImageGenerator::from_config(&config)?);
//!     taleweaver_server::serve(&config.server, generator).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod routes;
mod server;

pub use error::AppError;
pub use routes::{AppState, GENERATE_IMAGE_PATH, create_router};
pub use server::{bind, serve, serve_on};
