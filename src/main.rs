use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use melody_syncer::{cli, config, error, logging};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
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
    /// Run the HTTP relay
    Serve,

    /// Convert a single Spotify track
    Song(ConvertOptions),

    /// Convert every track of a Spotify playlist
    Playlist(ConvertOptions),

    /// Show the stored usage counters
    Analytics,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ConvertOptions {
    /// Spotify track or playlist id
    id: String,

    /// YouTube API key to start with instead of the configured pool
    #[clap(long)]
    youtube_key: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    logging::init_logging();

    let cfg = match config::AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };

    match cli.command {
        Command::Serve => cli::serve(cfg).await,
        Command::Song(opt) => cli::song(&cfg, opt.id, opt.youtube_key).await,
        Command::Playlist(opt) => cli::playlist(&cfg, opt.id, opt.youtube_key).await,
        Command::Analytics => cli::analytics(&cfg).await,
        Command::Completions(_) => {}
    }
}
