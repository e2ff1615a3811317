//! Trait definitions for the Taleweaver storybook generator.
//!
//! This crate provides the image-generation seam shared by the provider
//! clients, the proxy server and the generation orchestrator, plus the
//! progress snapshot the orchestrator publishes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::ImageGenerator;
pub use types::GenerationSnapshot;
