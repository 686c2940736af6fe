use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};
use tokio::sync::Mutex;

/// Liveness plus whether the login redirect has been received yet.
pub async fn health(
    Extension(shared_state): Extension<Arc<Mutex<Option<String>>>>,
) -> Json<Value> {
    let login_received = shared_state.lock().await.is_some();
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "login_received": login_received
    }))
}
