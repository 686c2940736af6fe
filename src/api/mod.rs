//! # API Module
//!
//! HTTP endpoints of the local server that completes the implicit-grant login.
//!
//! Spotify redirects the browser to `<redirect_uri>#access_token=...`. Browsers
//! never send the fragment to a server, so the flow takes two hops:
//!
//! - [`callback`] - serves a page whose script forwards `location.hash` as a
//!   query string to `/fragment`
//! - [`fragment`] - records the forwarded fragment for the waiting CLI
//! - [`health`] - status, version and whether the redirect has arrived
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//! use albumfinder::server::router;
//!
//! let app = router(Arc::new(Mutex::new(None)));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use callback::fragment;
pub use health::health;
