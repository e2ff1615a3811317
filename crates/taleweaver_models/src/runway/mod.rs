//! Task-based image provider integration.

mod client;
mod dto;
mod generator;

pub use client::{API_SECRET_ENV, RunwayClient};
pub use dto::{CreateTaskResponse, ReferenceImageRef, TextToImageRequest};
pub use generator::TaskImageGenerator;
