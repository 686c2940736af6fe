use std::time::Duration;

use reqwest::Client;

use crate::{
    config::{AuthFlow, Settings},
    error,
    management::{FileTokenStore, TokenProvider, TokenStore},
    spotify::auth::{ClientCredentials, ImplicitGrant, Location, login},
    success,
};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// Obtains a session token with the chosen flow.
///
/// For the implicit grant the token is persisted; `redirect_url` lets the user
/// paste the address the browser landed on instead of running the local
/// callback server. The client-credentials flow only verifies that the
/// credentials are accepted, since its token lives for one process.
pub async fn auth(settings: &Settings, flow: AuthFlow, redirect_url: Option<String>) {
    match flow {
        AuthFlow::Implicit => implicit(settings, redirect_url).await,
        AuthFlow::ClientCredentials => client_credentials(settings).await,
    }
}

async fn implicit(settings: &Settings, redirect_url: Option<String>) {
    let store = FileTokenStore::default_location();
    match store.load().await {
        Ok(Some(_)) => {
            success!("Already logged in. Run `albumfinder logout` to switch accounts.");
            return;
        }
        // an unreadable file is reported and replaced by the grant below
        Ok(None) | Err(_) => {}
    }

    let mut grant = match redirect_url {
        Some(url) => match Location::parse(&url) {
            Ok(location) => ImplicitGrant::new(location),
            Err(e) => error!("{}", e),
        },
        None => match login(settings, LOGIN_TIMEOUT).await {
            Ok(grant) => grant,
            Err(e) => error!("{}", e),
        },
    };

    let provider = TokenProvider::new(store);
    match provider.initialize(&mut grant).await {
        Ok(Some(_)) => success!("Authentication successful!"),
        Ok(None) => error!("The redirect did not contain an access token."),
        Err(e) => error!("{}", e.user_message()),
    }
}

async fn client_credentials(settings: &Settings) {
    let mut source = match ClientCredentials::from_settings(Client::new(), settings) {
        Ok(source) => source,
        Err(e) => error!("{}", e),
    };

    let provider = TokenProvider::new(FileTokenStore::default_location());
    match provider.initialize(&mut source).await {
        Ok(_) => success!("Client credentials accepted."),
        Err(e) => error!("{}", e.user_message()),
    }
}

/// Clears the stored token.
pub async fn logout() {
    let provider = TokenProvider::new(FileTokenStore::default_location());
    match provider.logout().await {
        Ok(()) => success!("Logged out."),
        Err(e) => error!("Failed to remove token: {}", e),
    }
}
