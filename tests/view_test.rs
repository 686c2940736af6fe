use albumfinder::types::{Album, AlbumArtist, AlbumImage, ExternalUrls, RequestState, Token};
use albumfinder::view::*;

// Helper function to create a test album
fn create_test_album(id: &str, name: &str, artist_name: &str) -> Album {
    Album {
        id: id.to_string(),
        name: name.to_string(),
        release_date: "2001-03-12".to_string(),
        total_tracks: 14,
        images: vec![AlbumImage {
            url: format!("https://i.scdn.co/image/{}", id),
            width: Some(640),
            height: Some(640),
        }],
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/album/{}", id)),
        },
        artists: vec![AlbumArtist {
            id: format!("{}_artist_id", id),
            name: artist_name.to_string(),
        }],
    }
}

#[test]
fn test_project_without_token_is_unauthenticated() {
    let states = [
        RequestState::Idle,
        RequestState::Loading,
        RequestState::Error("boom".to_string()),
        RequestState::Success(vec![create_test_album("a", "A", "X")]),
    ];
    for state in &states {
        assert_eq!(project(None, state, "q"), RenderMode::Unauthenticated);
    }
}

#[test]
fn test_project_with_token() {
    let token = Token::new("t");
    let albums = vec![create_test_album("a", "Discovery", "Daft Punk")];

    assert_eq!(
        project(Some(&token), &RequestState::Idle, "daft"),
        RenderMode::EmptyResults { query: "daft" }
    );
    assert_eq!(
        project(Some(&token), &RequestState::Loading, "daft"),
        RenderMode::Loading
    );

    let error = RequestState::Error("No artist found".to_string());
    assert_eq!(
        project(Some(&token), &error, "daft"),
        RenderMode::ErrorDisplay("No artist found")
    );

    let empty = RequestState::Success(Vec::new());
    assert_eq!(
        project(Some(&token), &empty, "daft"),
        RenderMode::EmptyResults { query: "daft" }
    );

    let success = RequestState::Success(albums.clone());
    assert_eq!(
        project(Some(&token), &success, "daft"),
        RenderMode::ResultGrid {
            query: "daft",
            albums: &albums
        }
    );
}

#[test]
fn test_render_result_grid_has_one_card_per_album() {
    let albums = vec![
        create_test_album("id1", "Homework", "Daft Punk"),
        create_test_album("id2", "Discovery", "Daft Punk"),
        create_test_album("id3", "Human After All", "Daft Punk"),
    ];
    let token = Token::new("t");
    let state = RequestState::Success(albums.clone());

    let out = render(&project(Some(&token), &state, "Daft Punk"), None);

    assert!(out.contains("3 albums found for \"Daft Punk\""));
    for album in &albums {
        assert_eq!(out.matches(album.name.as_str()).count(), 1);
        assert!(out.contains(album.spotify_url().unwrap()));
        assert!(out.contains(album.cover_url().unwrap()));
    }
}

#[test]
fn test_results_header() {
    assert_eq!(results_header(1, "Alive"), "1 album found for \"Alive\"");
    assert_eq!(results_header(12, "Alive"), "12 albums found for \"Alive\"");
}

#[test]
fn test_render_empty_state_is_not_an_error() {
    let token = Token::new("t");
    let state = RequestState::Success(Vec::new());

    let out = render(&project(Some(&token), &state, "zzz"), None);

    assert_eq!(out, EMPTY_STATE_MESSAGE);
}

#[test]
fn test_render_login_prompt() {
    let out = render(
        &RenderMode::Unauthenticated,
        Some("https://accounts.spotify.com/authorize?client_id=x"),
    );
    assert!(out.contains("Login to Spotify"));
    assert!(out.contains("https://accounts.spotify.com/authorize?client_id=x"));

    let out = render(&RenderMode::Unauthenticated, None);
    assert!(out.contains("albumfinder auth"));
}

#[test]
fn test_render_error_and_loading() {
    assert!(render(&RenderMode::ErrorDisplay("No artist found"), None).contains("No artist found"));
    assert_eq!(render(&RenderMode::Loading, None), "Searching...");
}

#[test]
fn test_render_album_without_optional_fields() {
    let album = Album {
        id: "bare".to_string(),
        name: "Bare Album".to_string(),
        release_date: String::new(),
        total_tracks: 0,
        images: Vec::new(),
        external_urls: ExternalUrls::default(),
        artists: Vec::new(),
    };
    let token = Token::new("t");
    let state = RequestState::Success(vec![album]);

    let out = render(&project(Some(&token), &state, "bare"), None);

    assert!(out.contains("1 album found"));
    assert!(out.contains("Bare Album"));
}
