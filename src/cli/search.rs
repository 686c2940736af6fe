use reqwest::Client;

use crate::{
    config::{AuthFlow, Settings},
    error,
    management::{FileTokenStore, TokenProvider},
    pipeline::{SearchMode, SearchPipeline},
    spotify::{
        SpotifyCatalog,
        auth::{ClientCredentials, ImplicitGrant, Location, TokenSource},
    },
    utils,
    view::{self, RenderMode},
    warning,
};

/// Searches the catalog and prints the result grid.
///
/// `by_artist` switches to the two-step artist lookup.
pub async fn search(settings: &Settings, query: &str, by_artist: bool) {
    if utils::is_blank_query(query) {
        warning!("Nothing to search for.");
        return;
    }

    let client = Client::new();
    let mode = if by_artist {
        SearchMode::ArtistAlbums
    } else {
        SearchMode::Albums
    };

    match settings.auth_flow {
        AuthFlow::Implicit => {
            let location = match Location::parse(&settings.redirect_uri) {
                Ok(location) => location,
                Err(e) => error!("{}", e),
            };
            run(settings, client, ImplicitGrant::new(location), mode, query).await
        }
        AuthFlow::ClientCredentials => {
            let source = match ClientCredentials::from_settings(client.clone(), settings) {
                Ok(source) => source,
                Err(e) => error!("{}", e),
            };
            run(settings, client, source, mode, query).await
        }
    }
}

async fn run<T: TokenSource>(
    settings: &Settings,
    client: Client,
    mut source: T,
    mode: SearchMode,
    query: &str,
) {
    let provider = TokenProvider::new(FileTokenStore::default_location());
    if let Err(e) = provider.initialize(&mut source).await {
        println!("{}", view::render(&RenderMode::ErrorDisplay(&e.user_message()), None));
        return;
    }

    if !provider.is_authenticated() {
        let login_url = utils::build_login_url(settings, None).ok();
        println!(
            "{}",
            view::render(&RenderMode::Unauthenticated, login_url.as_deref())
        );
        return;
    }

    let catalog = SpotifyCatalog::from_settings(client, settings);
    let pipeline = SearchPipeline::new(catalog, mode, provider.subscribe());

    let mut updates = pipeline.subscribe();
    let tokens = provider.subscribe();
    let view_query = query.trim().to_string();
    let spinner_text = match pipeline.mode() {
        SearchMode::Albums => "Searching Spotify albums...",
        SearchMode::ArtistAlbums => "Looking up the artist...",
    };
    let renderer = tokio::spawn(async move {
        let pb = super::spinner(spinner_text);
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            if state.is_loading() {
                continue;
            }
            let token = tokens.borrow().clone();
            let mode = view::project(token.as_ref(), &state, &view_query);
            pb.finish_and_clear();
            println!("{}", view::render(&mode, None));
            if state.is_settled() {
                break;
            }
        }
        pb.finish_and_clear();
    });

    pipeline.search(query).await;
    drop(pipeline);

    if let Err(e) = renderer.await {
        warning!("Renderer stopped unexpectedly: {}", e);
    }
}
