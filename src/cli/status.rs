use crate::{
    config::Settings,
    info,
    management::{FileTokenStore, TokenStore},
    success, warning,
};

/// Prints the configured auth flow and whether a token is stored.
pub async fn status(settings: &Settings) {
    let store = FileTokenStore::default_location();
    info!("Auth flow: {}", settings.auth_flow);
    info!("Token file: {}", store.path().display());

    match store.load().await {
        Ok(Some(_)) => success!("Logged in."),
        Ok(None) => warning!("Not logged in. Run `albumfinder auth`."),
        Err(e) => warning!("Token file is unreadable: {}", e),
    }
}
