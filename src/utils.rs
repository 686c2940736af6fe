use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;

use crate::{config::Settings, errors::FinderError};

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Returns true when the query has nothing left after trimming.
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

/// Looks up `key` in a `key=value&key=value` fragment.
///
/// A leading `#` is ignored. Empty values count as absent.
pub fn fragment_param<'a>(fragment: &'a str, key: &str) -> Option<&'a str> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
}

/// Extracts the `access_token` field of a redirect fragment.
pub fn parse_access_token(fragment: &str) -> Option<&str> {
    fragment_param(fragment, "access_token")
}

/// Builds the implicit-grant authorization URL.
///
/// Query values are percent-encoded, so redirect URIs with their own query
/// string survive the round trip.
pub fn build_login_url(settings: &Settings, state: Option<&str>) -> Result<String, FinderError> {
    let mut url = Url::parse(&settings.auth_url)
        .map_err(|e| FinderError::Config(format!("invalid SPOTIFY_AUTH_URL: {}", e)))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("client_id", &settings.client_id)
            .append_pair("redirect_uri", &settings.redirect_uri)
            .append_pair("response_type", "token");
        if let Some(state) = state {
            pairs.append_pair("state", state);
        }
    }
    Ok(url.to_string())
}

/// Joins an API base URL and a path without doubling slashes.
pub fn api_endpoint(base: &str, path: &str) -> String {
    format!(
        "{base}/{path}",
        base = base.trim_end_matches('/'),
        path = path.trim_start_matches('/')
    )
}
