use std::{future::Future, sync::Arc, time::Duration};

use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    config::Settings,
    errors::FinderError,
    info,
    management::TokenStore,
    server::{bind_callback_listener, start_api_server},
    types::{Token, TokenResponse},
    utils, warning,
};

/// A strategy that produces the session token.
///
/// `Ok(None)` means the user is simply not logged in yet.
pub trait TokenSource {
    fn acquire<S: TokenStore>(
        &mut self,
        store: &S,
    ) -> impl Future<Output = Result<Option<Token>, FinderError>>;
}

/// The address the authorization server redirected back to.
#[derive(Debug, Clone)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn parse(raw: &str) -> Result<Self, FinderError> {
        let url = Url::parse(raw)
            .map_err(|e| FinderError::AuthFailure(format!("invalid redirect url: {}", e)))?;
        Ok(Location { url })
    }

    /// Base URL with the given fragment appended.
    pub fn with_fragment(base: &str, fragment: &str) -> Result<Self, FinderError> {
        let mut location = Self::parse(base)?;
        location.url.set_fragment(Some(fragment.trim_start_matches('#')));
        Ok(location)
    }

    pub fn fragment(&self) -> Option<&str> {
        self.url.fragment().filter(|f| !f.is_empty())
    }

    /// Drops the fragment so a second pass cannot parse the same token again.
    pub fn clear_fragment(&mut self) {
        self.url.set_fragment(None);
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Implicit grant: reuse the stored token, else take it from the redirect fragment.
pub struct ImplicitGrant {
    location: Location,
    expected_state: Option<String>,
}

impl ImplicitGrant {
    pub fn new(location: Location) -> Self {
        ImplicitGrant {
            location,
            expected_state: None,
        }
    }

    /// Requires the fragment's `state` to equal the value sent with the login URL.
    pub fn expecting_state(mut self, state: impl Into<String>) -> Self {
        self.expected_state = Some(state.into());
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

impl TokenSource for ImplicitGrant {
    async fn acquire<S: TokenStore>(&mut self, store: &S) -> Result<Option<Token>, FinderError> {
        match store.load().await {
            Ok(Some(token)) => return Ok(Some(token)),
            Ok(None) => {}
            // an unreadable slot counts as empty; a new token overwrites it
            Err(FinderError::Storage(e)) => warning!("Ignoring unreadable token file: {}", e),
            Err(e) => return Err(e),
        }

        let Some(fragment) = self.location.fragment().map(str::to_string) else {
            return Ok(None);
        };

        if let Some(reason) = utils::fragment_param(&fragment, "error") {
            self.location.clear_fragment();
            return Err(FinderError::AuthFailure(format!(
                "authorization denied: {}",
                reason
            )));
        }

        let Some(access_token) = utils::parse_access_token(&fragment) else {
            return Ok(None);
        };

        if let Some(expected) = &self.expected_state {
            if utils::fragment_param(&fragment, "state") != Some(expected.as_str()) {
                self.location.clear_fragment();
                return Err(FinderError::AuthFailure(
                    "state mismatch in authorization response".to_string(),
                ));
            }
        }

        let token = Token::new(access_token);
        store.save(&token).await?;
        self.location.clear_fragment();
        Ok(Some(token))
    }
}

/// Client-credentials grant: one background POST, token kept in memory only.
pub struct ClientCredentials {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    pub fn new(
        client: Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        ClientCredentials {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn from_settings(client: Client, settings: &Settings) -> Result<Self, FinderError> {
        let secret = settings.require_client_secret()?;
        Ok(Self::new(
            client,
            settings.token_url.clone(),
            settings.client_id.clone(),
            secret,
        ))
    }

    async fn exchange(&self) -> Result<Token, reqwest::Error> {
        let res = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let json = res.json::<TokenResponse>().await?;
        Ok(Token::new(json.access_token))
    }
}

impl TokenSource for ClientCredentials {
    async fn acquire<S: TokenStore>(&mut self, _store: &S) -> Result<Option<Token>, FinderError> {
        match self.exchange().await {
            Ok(token) if !token.as_str().is_empty() => Ok(Some(token)),
            Ok(_) => Err(FinderError::AuthFailure(
                "token response carried an empty access_token".to_string(),
            )),
            Err(e) => Err(FinderError::AuthFailure(e.to_string())),
        }
    }
}

/// Runs the interactive implicit-grant login.
///
/// 1. Binds and starts the local callback server
/// 2. Opens the authorization URL in the browser
/// 3. Waits for the browser to forward the redirect fragment
/// 4. Returns an [`ImplicitGrant`] positioned at the redirect location
///
/// The caller feeds the returned grant to a `TokenProvider`, which persists
/// the token.
pub async fn login(settings: &Settings, timeout: Duration) -> Result<ImplicitGrant, FinderError> {
    let state = utils::generate_state();
    let login_url = utils::build_login_url(settings, Some(&state))?;

    let shared_fragment: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let server_state = Arc::clone(&shared_fragment);
    let listener = bind_callback_listener(&settings.server_address).await?;
    tokio::spawn(async move {
        if let Err(e) = start_api_server(listener, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    info!("Opening Spotify login in your browser...");
    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    let Some(fragment) = wait_for_fragment(shared_fragment, timeout).await else {
        return Err(FinderError::AuthFailure(
            "timed out waiting for the Spotify redirect".to_string(),
        ));
    };

    let location = Location::with_fragment(&settings.redirect_uri, &fragment)?;
    Ok(ImplicitGrant::new(location).expecting_state(state))
}

/// Polls the shared slot until the callback handler fills it or `max_wait` passes.
async fn wait_for_fragment(
    shared_fragment: Arc<Mutex<Option<String>>>,
    max_wait: Duration,
) -> Option<String> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_fragment.lock().await;
        if let Some(fragment) = lock.as_ref() {
            return Some(fragment.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}
