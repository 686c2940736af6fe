//! # Spotify Integration Module
//!
//! HTTP access to the Spotify accounts service and Web API.
//!
//! ```text
//! Search Pipeline / CLI
//!          ↓
//! CatalogApi (trait)  ←  fakes in tests
//!          ↓
//! SpotifyCatalog
//!     ├── search   (album search, artist search)
//!     └── artists  (albums of one artist)
//!          ↓
//! reqwest → Spotify Web API
//! ```
//!
//! [`auth`] holds the two token strategies, implicit grant and client
//! credentials, behind the [`auth::TokenSource`] trait.
//!
//! All catalog calls send `Authorization: Bearer <token>` and fail on any
//! non-2xx status. There is no retry and no response caching.

pub mod artists;
pub mod auth;
pub mod search;

use std::future::Future;

use reqwest::Client;

use crate::{
    config::Settings,
    errors::FinderError,
    types::{Album, Artist},
};

/// Read access to the album catalog.
pub trait CatalogApi: Send + Sync {
    fn search_albums(
        &self,
        token: &str,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Album>, FinderError>> + Send;

    fn search_artists(
        &self,
        token: &str,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Artist>, FinderError>> + Send;

    fn artist_albums(
        &self,
        token: &str,
        artist_id: &str,
    ) -> impl Future<Output = Result<Vec<Album>, FinderError>> + Send;
}

/// [`CatalogApi`] backed by the Spotify Web API.
#[derive(Debug, Clone)]
pub struct SpotifyCatalog {
    client: Client,
    api_url: String,
    market: String,
    limit: u32,
}

impl SpotifyCatalog {
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        market: impl Into<String>,
        limit: u32,
    ) -> Self {
        SpotifyCatalog {
            client,
            api_url: api_url.into(),
            market: market.into(),
            limit,
        }
    }

    pub fn from_settings(client: Client, settings: &Settings) -> Self {
        Self::new(
            client,
            settings.api_url.clone(),
            settings.market.clone(),
            settings.search_limit,
        )
    }
}

impl CatalogApi for SpotifyCatalog {
    async fn search_albums(&self, token: &str, query: &str) -> Result<Vec<Album>, FinderError> {
        Ok(search::search_albums(&self.client, &self.api_url, token, query, self.limit).await?)
    }

    async fn search_artists(
        &self,
        token: &str,
        query: &str,
    ) -> Result<Vec<Artist>, FinderError> {
        Ok(search::search_artists(&self.client, &self.api_url, token, query).await?)
    }

    async fn artist_albums(
        &self,
        token: &str,
        artist_id: &str,
    ) -> Result<Vec<Album>, FinderError> {
        let albums = artists::get_artist_albums(
            &self.client,
            &self.api_url,
            token,
            artist_id,
            &self.market,
            self.limit,
        )
        .await?;
        Ok(albums)
    }
}
