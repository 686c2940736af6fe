use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use albumfinder::{
    cli,
    config::{self, AuthFlow, Settings},
    error, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::BrightBlue.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in to Spotify
    Auth(AuthOptions),

    /// Forget the stored token
    Logout,

    /// Search albums
    Search(SearchOptions),

    /// Show login state and configuration
    Status,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Auth flow to use; defaults to AUTH_FLOW or implicit
    #[clap(long, value_enum)]
    pub flow: Option<AuthFlow>,

    /// Address the browser was redirected to, including the #access_token fragment
    #[clap(long)]
    pub redirect_url: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Free-text query
    #[clap(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Resolve the query to an artist and list that artist's albums
    #[clap(long)]
    pub artist: bool,

    /// Maximum number of albums (1-50)
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub limit: Option<u32>,

    /// Market code used for artist albums, e.g. US or DE
    #[clap(long)]
    pub market: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn settings() -> Settings {
    match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(opt) => {
            let settings = settings();
            let flow = opt.flow.unwrap_or(settings.auth_flow);
            cli::auth(&settings, flow, opt.redirect_url).await
        }
        Command::Logout => cli::logout().await,
        Command::Search(opt) => {
            let mut settings = settings();
            if let Some(limit) = opt.limit {
                settings.search_limit = limit;
            }
            if let Some(market) = opt.market {
                settings.market = market;
            }
            cli::search(&settings, &opt.query.join(" "), opt.artist).await
        }
        Command::Status => cli::status(&settings()).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
