//! View binding.
//!
//! [`project`] maps the session token and search state to exactly one render
//! mode. [`render`] turns a mode into terminal text. Neither touches the
//! network or mutates state.

use colored::Colorize;
use tabled::Table;

use crate::types::{Album, AlbumTableRow, RequestState, Token};

pub const EMPTY_STATE_MESSAGE: &str =
    "No albums found yet. Try searching for your favorite artist.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode<'a> {
    Unauthenticated,
    Loading,
    ErrorDisplay(&'a str),
    EmptyResults { query: &'a str },
    ResultGrid { query: &'a str, albums: &'a [Album] },
}

pub fn project<'a>(
    token: Option<&Token>,
    state: &'a RequestState,
    query: &'a str,
) -> RenderMode<'a> {
    if token.is_none() {
        return RenderMode::Unauthenticated;
    }

    match state {
        RequestState::Idle => RenderMode::EmptyResults { query },
        RequestState::Loading => RenderMode::Loading,
        RequestState::Error(message) => RenderMode::ErrorDisplay(message),
        RequestState::Success(albums) if albums.is_empty() => RenderMode::EmptyResults { query },
        RequestState::Success(albums) => RenderMode::ResultGrid { query, albums },
    }
}

/// Terminal text for a render mode. `login_url` is shown on the login prompt.
pub fn render(mode: &RenderMode<'_>, login_url: Option<&str>) -> String {
    match mode {
        RenderMode::Unauthenticated => {
            let mut out = format!("{}", "Login to Spotify".bold());
            match login_url {
                Some(url) => out.push_str(&format!("\nOpen this URL to log in:\n{}", url)),
                None => out.push_str("\nRun `albumfinder auth` to log in."),
            }
            out
        }
        RenderMode::Loading => "Searching...".to_string(),
        RenderMode::ErrorDisplay(message) => format!("{}", message.red()),
        RenderMode::EmptyResults { .. } => EMPTY_STATE_MESSAGE.to_string(),
        RenderMode::ResultGrid { query, albums } => {
            let header = results_header(albums.len(), query);
            let table = Table::new(albums.iter().map(album_row));
            format!("{}\n{}", header.bold(), table)
        }
    }
}

pub fn results_header(count: usize, query: &str) -> String {
    let noun = if count == 1 { "album" } else { "albums" };
    format!("{} {} found for \"{}\"", count, noun, query)
}

fn album_row(album: &Album) -> AlbumTableRow {
    AlbumTableRow {
        name: album.name.clone(),
        artist: album.primary_artist().unwrap_or("-").to_string(),
        released: album.release_date.clone(),
        tracks: album.total_tracks,
        cover: album.cover_url().unwrap_or("-").to_string(),
        link: album.spotify_url().unwrap_or("-").to_string(),
    }
}
