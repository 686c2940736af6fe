use std::{fmt, io::Error};

/// Failure kinds surfaced by authentication and search.
///
/// None of them is fatal. `AuthFailure` leaves the session unauthenticated,
/// `NotLoggedIn`, `NoArtistFound` and `NetworkOrParse` are scoped to a
/// single search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinderError {
    AuthFailure(String),
    NotLoggedIn,
    NoArtistFound,
    NetworkOrParse(String),
    Config(String),
    Storage(String),
}

impl FinderError {
    /// Message shown to the user. Upstream details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            FinderError::AuthFailure(_) => "Authentication with Spotify failed.".to_string(),
            FinderError::NotLoggedIn => "Please log in to Spotify first.".to_string(),
            FinderError::NoArtistFound => "No artist found".to_string(),
            FinderError::NetworkOrParse(_) => {
                "Something went wrong while searching. Please try again.".to_string()
            }
            FinderError::Config(msg) => format!("Configuration error: {}", msg),
            FinderError::Storage(_) => "Cannot access the local token store.".to_string(),
        }
    }
}

impl fmt::Display for FinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinderError::AuthFailure(msg) => write!(f, "authentication failed: {}", msg),
            FinderError::NotLoggedIn => write!(f, "no session token"),
            FinderError::NoArtistFound => write!(f, "no artist found"),
            FinderError::NetworkOrParse(msg) => write!(f, "request failed: {}", msg),
            FinderError::Config(msg) => write!(f, "invalid configuration: {}", msg),
            FinderError::Storage(msg) => write!(f, "token storage failed: {}", msg),
        }
    }
}

impl std::error::Error for FinderError {}

impl From<reqwest::Error> for FinderError {
    fn from(err: reqwest::Error) -> Self {
        FinderError::NetworkOrParse(err.to_string())
    }
}

impl From<Error> for FinderError {
    fn from(err: Error) -> Self {
        FinderError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FinderError {
    fn from(err: serde_json::Error) -> Self {
        FinderError::Storage(err.to_string())
    }
}
