use std::path::PathBuf;

use albumfinder::errors::FinderError;
use albumfinder::management::{FileTokenStore, MemoryTokenStore, TokenProvider, TokenStore};
use albumfinder::spotify::auth::{ImplicitGrant, Location};
use albumfinder::types::Token;

const REDIRECT: &str = "http://127.0.0.1:8000/callback";

// Helper to build a redirect location with a fragment
fn location(fragment: &str) -> Location {
    Location::with_fragment(REDIRECT, fragment).unwrap()
}

// Helper for a token file path unique to one test
fn temp_token_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("albumfinder-test-{}", std::process::id()))
        .join(format!("{}.json", name))
}

#[test]
fn test_location_fragment_handling() {
    let mut loc = location("#access_token=ABC123&token_type=Bearer");
    assert_eq!(loc.fragment(), Some("access_token=ABC123&token_type=Bearer"));

    loc.clear_fragment();
    assert_eq!(loc.fragment(), None);
    assert_eq!(loc.as_str(), REDIRECT);

    let plain = Location::parse(REDIRECT).unwrap();
    assert_eq!(plain.fragment(), None);

    assert!(Location::parse("not a url").is_err());
}

#[test]
fn test_token_debug_is_redacted() {
    let token = Token::new("secret-value");
    assert!(!format!("{:?}", token).contains("secret-value"));
    assert_eq!(token.as_str(), "secret-value");
}

#[tokio::test]
async fn test_implicit_grant_parses_persists_and_clears_fragment() {
    let provider = TokenProvider::new(MemoryTokenStore::new());
    let mut grant = ImplicitGrant::new(location("access_token=ABC123&token_type=Bearer"));

    let token = provider.initialize(&mut grant).await.unwrap();

    assert_eq!(token, Some(Token::new("ABC123")));
    assert_eq!(provider.token(), Some(Token::new("ABC123")));
    assert_eq!(
        provider.store().load().await.unwrap(),
        Some(Token::new("ABC123"))
    );
    assert_eq!(grant.location().fragment(), None);
}

#[tokio::test]
async fn test_reload_uses_persisted_token_without_fragment() {
    let path = temp_token_path("reload");
    let _ = std::fs::remove_file(&path);

    // First load: token arrives in the fragment
    let provider = TokenProvider::new(FileTokenStore::new(path.clone()));
    let mut grant = ImplicitGrant::new(location("access_token=ABC123&token_type=Bearer"));
    provider.initialize(&mut grant).await.unwrap();

    // Reload: no fragment, token comes from the file
    let provider = TokenProvider::new(FileTokenStore::new(path.clone()));
    let mut grant = ImplicitGrant::new(Location::parse(REDIRECT).unwrap());
    let token = provider.initialize(&mut grant).await.unwrap();
    assert_eq!(token, Some(Token::new("ABC123")));

    let content = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["token"], "ABC123");
    assert!(json["saved_at"].is_string());

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_stored_token_wins_over_fragment() {
    let store = MemoryTokenStore::with_token(Token::new("STORED"));
    let provider = TokenProvider::new(store);
    let mut grant = ImplicitGrant::new(location("access_token=NEW"));

    let token = provider.initialize(&mut grant).await.unwrap();

    assert_eq!(token, Some(Token::new("STORED")));
    // fragment is left alone when it was not parsed
    assert!(grant.location().fragment().is_some());
}

#[tokio::test]
async fn test_logout_clears_memory_and_store() {
    let path = temp_token_path("logout");
    let _ = std::fs::remove_file(&path);

    let provider = TokenProvider::new(FileTokenStore::new(path.clone()));
    let mut grant = ImplicitGrant::new(location("access_token=ABC123"));
    provider.initialize(&mut grant).await.unwrap();
    let mut updates = provider.subscribe();
    assert!(provider.is_authenticated());

    provider.logout().await.unwrap();

    assert_eq!(provider.token(), None);
    assert!(updates.has_changed().unwrap());
    assert_eq!(*updates.borrow_and_update(), None);
    assert!(!path.exists());

    // Reload with no fragment stays logged out
    let provider = TokenProvider::new(FileTokenStore::new(path.clone()));
    let mut grant = ImplicitGrant::new(Location::parse(REDIRECT).unwrap());
    assert_eq!(provider.initialize(&mut grant).await.unwrap(), None);

    // Logging out twice is fine
    provider.logout().await.unwrap();
}

#[tokio::test]
async fn test_no_token_anywhere_is_unauthenticated() {
    let provider = TokenProvider::new(MemoryTokenStore::new());
    let mut grant = ImplicitGrant::new(Location::parse(REDIRECT).unwrap());

    assert_eq!(provider.initialize(&mut grant).await.unwrap(), None);
    assert!(!provider.is_authenticated());

    // fragment without a token
    let mut grant = ImplicitGrant::new(location("token_type=Bearer"));
    assert_eq!(provider.initialize(&mut grant).await.unwrap(), None);
}

#[tokio::test]
async fn test_denied_authorization_is_auth_failure() {
    let provider = TokenProvider::new(MemoryTokenStore::new());
    let mut grant = ImplicitGrant::new(location("error=access_denied&state=s1"));

    let result = provider.initialize(&mut grant).await;

    assert!(matches!(result, Err(FinderError::AuthFailure(_))));
    assert_eq!(provider.token(), None);
    assert_eq!(grant.location().fragment(), None);
}

#[tokio::test]
async fn test_state_mismatch_persists_nothing() {
    let provider = TokenProvider::new(MemoryTokenStore::new());
    let mut grant =
        ImplicitGrant::new(location("access_token=ABC123&state=forged")).expecting_state("s1");

    let result = provider.initialize(&mut grant).await;

    assert!(matches!(result, Err(FinderError::AuthFailure(_))));
    assert_eq!(provider.store().load().await.unwrap(), None);

    // the failure sticks for this session
    let mut retry = ImplicitGrant::new(location("access_token=ABC123&state=s1")).expecting_state("s1");
    assert!(matches!(
        provider.initialize(&mut retry).await,
        Err(FinderError::AuthFailure(_))
    ));
}

#[tokio::test]
async fn test_matching_state_is_accepted() {
    let provider = TokenProvider::new(MemoryTokenStore::new());
    let mut grant =
        ImplicitGrant::new(location("access_token=ABC123&state=s1")).expecting_state("s1");

    let token = provider.initialize(&mut grant).await.unwrap();
    assert_eq!(token, Some(Token::new("ABC123")));
}

#[tokio::test]
async fn test_file_store_missing_file_is_empty() {
    let store = FileTokenStore::new(temp_token_path("missing"));
    assert_eq!(store.load().await.unwrap(), None);
    store.clear().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_token_file_is_replaced_by_fragment_token() {
    let path = temp_token_path("corrupt-login");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    let provider = TokenProvider::new(FileTokenStore::new(path.clone()));
    let mut grant = ImplicitGrant::new(location("access_token=ABC123&token_type=Bearer"));

    let token = provider.initialize(&mut grant).await.unwrap();

    assert_eq!(token, Some(Token::new("ABC123")));
    assert_eq!(grant.location().fragment(), None);
    let reloaded = FileTokenStore::new(path.clone()).load().await.unwrap();
    assert_eq!(reloaded, Some(Token::new("ABC123")));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_file_store_corrupt_file_is_storage_error() {
    let path = temp_token_path("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileTokenStore::new(path.clone());
    assert!(matches!(store.load().await, Err(FinderError::Storage(_))));

    let _ = std::fs::remove_file(&path);
}
