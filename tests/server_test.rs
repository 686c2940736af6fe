use std::sync::Arc;

use albumfinder::errors::FinderError;
use albumfinder::management::{MemoryTokenStore, TokenProvider};
use albumfinder::server::{bind_callback_listener, router};
use albumfinder::spotify::auth::{ImplicitGrant, Location};
use albumfinder::types::Token;
use tokio::sync::Mutex;

// Starts the callback server on a free port and returns its base URL
async fn spawn_callback_server(state: Arc<Mutex<Option<String>>>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_health() {
    let base = spawn_callback_server(Arc::new(Mutex::new(None))).await;

    let json: serde_json::Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["login_received"], false);
}

#[tokio::test]
async fn test_callback_page_forwards_fragment() {
    let base = spawn_callback_server(Arc::new(Mutex::new(None))).await;

    let body = reqwest::get(format!("{}/callback", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("window.location.hash"));
    assert!(body.contains("/fragment?"));
}

#[tokio::test]
async fn test_forwarded_fragment_completes_login() {
    let shared = Arc::new(Mutex::new(None));
    let base = spawn_callback_server(Arc::clone(&shared)).await;

    let res = reqwest::get(format!(
        "{}/fragment?access_token=ABC123&token_type=Bearer&state=s1",
        base
    ))
    .await
    .unwrap();
    assert!(res.status().is_success());

    let health: serde_json::Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["login_received"], true);

    let fragment = shared.lock().await.clone().unwrap();
    assert_eq!(fragment, "access_token=ABC123&token_type=Bearer&state=s1");

    // the recorded fragment feeds the implicit grant
    let location = Location::with_fragment("http://127.0.0.1:8000/callback", &fragment).unwrap();
    let provider = TokenProvider::new(MemoryTokenStore::new());
    let mut grant = ImplicitGrant::new(location).expecting_state("s1");
    let token = provider.initialize(&mut grant).await.unwrap();
    assert_eq!(token, Some(Token::new("ABC123")));
}

#[tokio::test]
async fn test_fragment_without_query_is_ignored() {
    let shared = Arc::new(Mutex::new(None));
    let base = spawn_callback_server(Arc::clone(&shared)).await;

    let body = reqwest::get(format!("{}/fragment", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Login failed"));
    assert!(shared.lock().await.is_none());
}

#[tokio::test]
async fn test_taken_port_fails_bind_immediately() {
    let occupant = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = occupant.local_addr().unwrap().to_string();

    let err = bind_callback_listener(&address).await.unwrap_err();
    assert!(matches!(err, FinderError::Config(_)));

    let err = bind_callback_listener("not an address").await.unwrap_err();
    assert!(matches!(err, FinderError::Config(_)));
}
