//! Listener lifecycle for the proxy.

use crate::{AppState, create_router};
use std::sync::Arc;
use taleweaver_error::{ServerError, ServerErrorKind};
use taleweaver_interface::ImageGenerator;
use taleweaver_models::ServerConfig;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Bind the address from `config.bind`.
///
/// # Errors
///
/// Returns [`ServerErrorKind::Bind`] if the address is invalid or in use.
#[instrument(skip(config), fields(bind = %config.bind))]
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    TcpListener::bind(config.bind.as_str()).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            address: config.bind.clone(),
            message: e.to_string(),
        })
    })
}

/// Serve the proxy on an already bound listener until Ctrl-C.
///
/// # Errors
///
/// Returns [`ServerErrorKind::Serve`] if the server loop fails.
pub async fn serve_on(
    listener: TcpListener,
    config: &ServerConfig,
    generator: Arc<dyn ImageGenerator>,
) -> Result<(), ServerError> {
    let address = listener
        .local_addr()
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;
    let provider = generator.provider_name();
    let router = create_router(AppState::new(generator), config);

    info!(%address, provider, max_upload_bytes = config.max_upload_bytes, "Image proxy listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;
    info!("Image proxy stopped");
    Ok(())
}

/// Bind `config.bind` and serve the proxy until Ctrl-C.
///
/// # Errors
///
/// Returns a [`ServerError`] if binding or serving fails.
pub async fn serve(config: &ServerConfig, generator: Arc<dyn ImageGenerator>) -> Result<(), ServerError> {
    let listener = bind(config).await?;
    serve_on(listener, config, generator).await
}

async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await
}

/// Resolve when `signal` fires. A signal that cannot be installed never resolves.
async fn wait_for_signal(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        warn!(error = %e, "Failed to listen for Ctrl-C, serving until stopped");
        std::future::pending::<()>().await;
    }
}
