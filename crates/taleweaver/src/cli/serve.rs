//! Proxy server command handler.

use std::sync::Arc;
use taleweaver::{TaleweaverConfig, TaleweaverResult, TaskImageGenerator};

/// Handle the `serve` command
pub async fn handle_serve(bind: Option<String>, config: &TaleweaverConfig) -> TaleweaverResult<()> {
    let mut server = config.server.clone();
    if let Some(bind) = bind {
        server.bind = bind;
    }

    // The proxy always talks to the provider directly.
    let generator = TaskImageGenerator::from_config(config)?;

    tracing::info!(bind = %server.bind, "Starting image proxy. Press Ctrl+C to stop.");
    taleweaver_server::serve(&server, Arc::new(generator)).await?;
    Ok(())
}
