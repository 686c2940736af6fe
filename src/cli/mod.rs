//! # CLI Module
//!
//! User-facing commands of the album finder. Each command wires the
//! configuration, token provider, search pipeline and view together and
//! reports progress with the crate's console macros.
//!
//! ```text
//! CLI Layer (commands, spinner, output)
//!     ↓
//! TokenProvider / SearchPipeline
//!     ↓
//! Spotify Integration (reqwest)
//! ```
//!
//! ## Commands
//!
//! - [`auth`] - obtain a token with the implicit grant or client credentials
//! - [`logout`] - forget the stored token
//! - [`search`] - search albums, directly or through an artist
//! - [`status`] - show the configured flow and login state
//!
//! ## Usage Patterns
//!
//! ```bash
//! albumfinder auth                         # log in through the browser
//! albumfinder search "Random Access Memories"
//! albumfinder search --artist Daft Punk    # albums of the best matching artist
//! albumfinder logout
//! ```

mod auth;
mod search;
mod status;

pub use auth::auth;
pub use auth::logout;
pub use search::search;
pub use status::status;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
