use std::sync::Arc;

use axum::{Extension, extract::RawQuery, response::Html};
use tokio::sync::Mutex;

use crate::warning;

// The fragment never reaches the server, so the page hands it back as a query string.
const FORWARD_FRAGMENT_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Album Finder</title></head>
  <body>
    <p>Completing Spotify login...</p>
    <script>
      var hash = window.location.hash.substring(1);
      window.location.replace("/fragment?" + hash);
    </script>
  </body>
</html>"#;

pub async fn callback() -> Html<&'static str> {
    Html(FORWARD_FRAGMENT_PAGE)
}

pub async fn fragment(
    RawQuery(query): RawQuery,
    Extension(shared_state): Extension<Arc<Mutex<Option<String>>>>,
) -> Html<&'static str> {
    let Some(fragment) = query.filter(|q| !q.is_empty()) else {
        warning!("Redirect arrived without a fragment.");
        return Html("<h4>Login failed: no token in redirect.</h4>");
    };

    let mut state = shared_state.lock().await;
    *state = Some(fragment);
    Html("<h2>Login received.</h2><p>You can close this browser window.</p>")
}
