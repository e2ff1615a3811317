//! Client side of the image proxy endpoint.

mod client;

pub use client::{ProxyImageGenerator, ProxyResponse};
