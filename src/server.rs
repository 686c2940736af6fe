use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Res, api, errors::FinderError};

/// Routes of the local callback server.
pub fn router(state: Arc<Mutex<Option<String>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .route("/fragment", get(api::fragment))
        .layer(Extension(state))
}

/// Binds the callback server's listener.
///
/// Done before the browser opens, so a taken port fails the login at once.
pub async fn bind_callback_listener(address: &str) -> Result<TcpListener, FinderError> {
    let addr = SocketAddr::from_str(address).map_err(|e| {
        FinderError::Config(format!(
            "Failed to parse server address '{}': {}",
            address, e
        ))
    })?;

    TcpListener::bind(&addr)
        .await
        .map_err(|e| FinderError::Config(format!("Cannot listen on {}: {}", address, e)))
}

/// Serves the callback routes on `listener` until the process exits.
pub async fn start_api_server(listener: TcpListener, state: Arc<Mutex<Option<String>>>) -> Res<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}
