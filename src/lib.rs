//! MelodySyncer Library
//!
//! This library converts Spotify songs and playlists into the YouTube videos
//! that most plausibly carry the same recording. It includes the matching
//! heuristic, the Spotify and YouTube API clients it talks to, the HTTP relay
//! that exposes it, and a small command-line front end.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the relay (`/song`, `/playlist`, `/analytics`, ...)
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by every layer
//! - `logging` - Tracing subscriber setup for the service
//! - `management` - Playlist fan-out and analytics bookkeeping
//! - `server` - Router construction and shared application state
//! - `spotify` - Spotify Web API client (track and playlist metadata)
//! - `types` - Data structures and type definitions
//! - `utils` - Duration parsing and small helpers
//! - `youtube` - YouTube provider client, credential rotation and track resolver
//!
//! # Example
//!
//! ```
//! use melody_syncer::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> melody_syncer::Res<()> {
//!     config::load_env().await?;
//!     let cfg = config::AppConfig::from_env()?;
//!     server::serve(cfg).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod youtube;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the bootstrap and CLI glue where any error simply needs to be
/// reported. Domain code returns [`error::SyncError`] instead.
///
/// # Example
///
/// ```
/// use melody_syncer::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Resolving playlist {}", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Resolved {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for unrecoverable errors in the command-line front end, such as
/// a configuration that cannot be loaded. Code after this macro does not run.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("No match found for {}", track_name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
