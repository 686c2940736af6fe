use reqwest::Client;

use crate::{
    types::{Album, AlbumSearchResponse, Artist, ArtistSearchResponse},
    utils,
};

/// Searches the catalog for albums matching a free-text query.
///
/// Calls `GET /search?q=<query>&type=album&limit=<limit>` and returns
/// `albums.items` in upstream order. A response without an `albums` object
/// yields an empty list.
///
/// # Errors
///
/// Transport failures, non-2xx statuses and undecodable bodies are returned
/// as `reqwest::Error`.
pub async fn search_albums(
    client: &Client,
    api_url: &str,
    token: &str,
    query: &str,
    limit: u32,
) -> Result<Vec<Album>, reqwest::Error> {
    let limit = limit.to_string();
    let response = client
        .get(utils::api_endpoint(api_url, "search"))
        .query(&[("q", query), ("type", "album"), ("limit", limit.as_str())])
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let res = response.json::<AlbumSearchResponse>().await?;
    Ok(res.albums.map(|page| page.items).unwrap_or_default())
}

/// Searches the catalog for artists matching a free-text query.
///
/// Calls `GET /search?q=<query>&type=artist` and returns `artists.items`,
/// best match first.
pub async fn search_artists(
    client: &Client,
    api_url: &str,
    token: &str,
    query: &str,
) -> Result<Vec<Artist>, reqwest::Error> {
    let response = client
        .get(utils::api_endpoint(api_url, "search"))
        .query(&[("q", query), ("type", "artist")])
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let res = response.json::<ArtistSearchResponse>().await?;
    Ok(res.artists.map(|page| page.items).unwrap_or_default())
}
