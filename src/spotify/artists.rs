use reqwest::Client;

use crate::{
    types::{Album, ArtistAlbumsResponse},
    utils,
};

/// Retrieves the studio albums of one artist.
///
/// Uses `GET /artists/{id}/albums` filtered to `include_groups=album` in the
/// given market. The list is returned exactly as Spotify orders it.
///
/// # Example
///
/// ```
/// let albums = get_artist_albums(&client, api_url, token, "4tZwfgrHOc3mvqYlEYSvVi", "US", 20).await?;
/// println!("Found {} albums", albums.len());
/// ```
pub async fn get_artist_albums(
    client: &Client,
    api_url: &str,
    token: &str,
    artist_id: &str,
    market: &str,
    limit: u32,
) -> Result<Vec<Album>, reqwest::Error> {
    let limit = limit.to_string();
    let api_url = utils::api_endpoint(api_url, &format!("artists/{id}/albums", id = artist_id));

    let response = client
        .get(&api_url)
        .query(&[
            ("include_groups", "album"),
            ("market", market),
            ("limit", limit.as_str()),
        ])
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<ArtistAlbumsResponse>().await?;
    Ok(json.items)
}
