//! Configuration management for the album finder.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Environment variables already set in the
//! process take priority over the file, and most settings fall back to the
//! public Spotify endpoints.

use std::{env, fmt, path::PathBuf, str::FromStr};

use crate::errors::FinderError;

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8000/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_MARKET: &str = "US";
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Returns the application directory inside the platform's local data dir.
///
/// - Linux: `~/.local/share/albumfinder`
/// - macOS: `~/Library/Application Support/albumfinder`
/// - Windows: `%LOCALAPPDATA%/albumfinder`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("albumfinder");
    path
}

/// Loads environment variables from `<data_dir>/.env`.
///
/// Creates the directory when missing. A missing `.env` file is not an error,
/// since every setting can also come from the process environment.
///
/// # Example
///
/// ```
/// use albumfinder::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("Failed to load {}: {}", path.display(), e)),
    }
}

/// Which OAuth strategy produces the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AuthFlow {
    /// Browser redirect; the token comes back in the URL fragment
    #[default]
    Implicit,
    /// Direct exchange of client id and secret, no user interaction
    ClientCredentials,
}

impl fmt::Display for AuthFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFlow::Implicit => write!(f, "implicit"),
            AuthFlow::ClientCredentials => write!(f, "client-credentials"),
        }
    }
}

impl FromStr for AuthFlow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "implicit" | "token" => Ok(AuthFlow::Implicit),
            "client-credentials" | "credentials" => Ok(AuthFlow::ClientCredentials),
            other => Err(format!(
                "invalid auth flow '{}'; expected implicit or client-credentials",
                other
            )),
        }
    }
}

/// Resolved runtime settings.
///
/// Fields are public so tests and embedders can point the crate at another
/// API host without touching the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub market: String,
    pub search_limit: u32,
    pub server_address: String,
    pub auth_flow: AuthFlow,
}

impl Settings {
    /// Reads every setting from the environment.
    ///
    /// # Errors
    ///
    /// Fails when `SPOTIFY_CLIENT_ID` is missing or a value cannot be parsed.
    /// The client secret is only checked when the credential flow needs it,
    /// see [`Settings::require_client_secret`].
    pub fn from_env() -> Result<Self, FinderError> {
        let client_id = env::var("SPOTIFY_CLIENT_ID")
            .map_err(|_| FinderError::Config("SPOTIFY_CLIENT_ID must be set".to_string()))?;

        let search_limit = match env::var("SEARCH_LIMIT") {
            Ok(raw) => parse_limit(&raw)?,
            Err(_) => DEFAULT_SEARCH_LIMIT,
        };

        let auth_flow = match env::var("AUTH_FLOW") {
            Ok(raw) => raw.parse().map_err(FinderError::Config)?,
            Err(_) => AuthFlow::default(),
        };

        Ok(Settings {
            client_id,
            client_secret: env::var("SPOTIFY_CLIENT_SECRET").ok(),
            redirect_uri: var_or("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            auth_url: var_or("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: var_or("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: var_or("SPOTIFY_API_URL", DEFAULT_API_URL),
            market: var_or("SPOTIFY_MARKET", DEFAULT_MARKET),
            search_limit,
            server_address: var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            auth_flow,
        })
    }

    /// Settings with defaults for everything except the client id.
    pub fn with_client_id(client_id: impl Into<String>) -> Self {
        Settings {
            client_id: client_id.into(),
            client_secret: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            market: DEFAULT_MARKET.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            auth_flow: AuthFlow::default(),
        }
    }

    pub fn require_client_secret(&self) -> Result<&str, FinderError> {
        self.client_secret.as_deref().ok_or_else(|| {
            FinderError::Config(
                "SPOTIFY_CLIENT_SECRET must be set for the client-credentials flow".to_string(),
            )
        })
    }
}

/// Parses a result-count limit. Spotify accepts 1 to 50.
pub fn parse_limit(raw: &str) -> Result<u32, FinderError> {
    let limit: u32 = raw
        .trim()
        .parse()
        .map_err(|_| FinderError::Config(format!("invalid search limit '{}'", raw)))?;
    if !(1..=50).contains(&limit) {
        return Err(FinderError::Config(format!(
            "search limit must be between 1 and 50, got {}",
            limit
        )));
    }
    Ok(limit)
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
