//! Search pipeline.
//!
//! Turns a free-text query into album results and publishes every step as a
//! [`RequestState`] on a `watch` channel. Two request shapes exist:
//!
//! - [`SearchMode::Albums`]: one album search
//! - [`SearchMode::ArtistAlbums`]: resolve the query to an artist, then list
//!   that artist's albums
//!
//! Only the latest search may publish. Each call takes a generation number and
//! its outcome is dropped if a newer call started in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::{
    errors::FinderError,
    spotify::CatalogApi,
    types::{Album, Artist, RequestState, Token},
    utils, warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Albums,
    ArtistAlbums,
}

/// Outcome of the first stage of an artist search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistLookup {
    Found(Artist),
    NotFound,
}

pub struct SearchPipeline<C: CatalogApi> {
    catalog: C,
    mode: SearchMode,
    token: watch::Receiver<Option<Token>>,
    state: watch::Sender<RequestState>,
    generation: AtomicU64,
}

impl<C: CatalogApi> SearchPipeline<C> {
    /// `token` is usually `TokenProvider::subscribe()`.
    pub fn new(catalog: C, mode: SearchMode, token: watch::Receiver<Option<Token>>) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        SearchPipeline {
            catalog,
            mode,
            token,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Runs one search and publishes its progress.
    ///
    /// A blank query is ignored: no request is sent and the state is left
    /// untouched. Otherwise the state moves to `Loading` at once, dropping any
    /// previous results, and ends in `Success` or `Error`.
    pub async fn search(&self, query: &str) {
        if utils::is_blank_query(query) {
            return;
        }
        let query = query.trim();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let token = self.token.borrow().clone();
        let Some(token) = token else {
            let message = FinderError::NotLoggedIn.user_message();
            self.apply(generation, RequestState::Error(message));
            return;
        };

        self.apply(generation, RequestState::Loading);

        let outcome = match self.mode {
            SearchMode::Albums => self.catalog.search_albums(token.as_str(), query).await,
            SearchMode::ArtistAlbums => self.search_artist_albums(token.as_str(), query).await,
        };

        let next = match outcome {
            Ok(albums) => RequestState::Success(albums),
            Err(err) => {
                if err != FinderError::NoArtistFound {
                    warning!("Search for '{}' failed: {}", query, err);
                }
                RequestState::Error(err.user_message())
            }
        };
        self.apply(generation, next);
    }

    /// First stage of an artist search: the best matching artist, if any.
    pub async fn resolve_artist(
        &self,
        token: &str,
        query: &str,
    ) -> Result<ArtistLookup, FinderError> {
        let artists = self.catalog.search_artists(token, query).await?;
        Ok(match artists.into_iter().next() {
            Some(artist) => ArtistLookup::Found(artist),
            None => ArtistLookup::NotFound,
        })
    }

    /// Second stage of an artist search.
    pub async fn fetch_artist_albums(
        &self,
        token: &str,
        artist: &Artist,
    ) -> Result<Vec<Album>, FinderError> {
        self.catalog.artist_albums(token, &artist.id).await
    }

    async fn search_artist_albums(
        &self,
        token: &str,
        query: &str,
    ) -> Result<Vec<Album>, FinderError> {
        match self.resolve_artist(token, query).await? {
            ArtistLookup::Found(artist) => self.fetch_artist_albums(token, &artist).await,
            ArtistLookup::NotFound => Err(FinderError::NoArtistFound),
        }
    }

    // Check and write happen under the channel lock, so a superseded search
    // cannot slip in between.
    fn apply(&self, generation: u64, next: RequestState) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = next;
            true
        })
    }
}
