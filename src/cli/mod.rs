//! # CLI Module
//!
//! Command-line front end for MelodySyncer. Besides starting the HTTP relay,
//! it can convert a single song or a whole playlist straight from the
//! terminal and print the analytics counters, which is handy for checking a
//! credential pool without going through HTTP.
//!
//! ## Commands
//!
//! - [`serve`] - runs the relay until interrupted
//! - [`song`] - resolves one Spotify track and prints its YouTube URL
//! - [`playlist`] - resolves a playlist and prints a table of URLs
//! - [`analytics`] - prints the stored usage counters
//!
//! Every command takes the [`AppConfig`](crate::config::AppConfig) built at
//! startup. Unrecoverable problems are reported with the `error!` macro, which
//! exits the process.
//!
//! ## Usage
//!
//! ```bash
//! melody-syncer serve
//! melody-syncer song 4uLU6hMCjMI75M1A2tKUQC
//! melody-syncer playlist 37i9dQZF1DXcBWIGoYBM5M --youtube-key <key>
//! melody-syncer analytics
//! ```

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

mod analytics;
mod playlist;
mod serve;
mod song;

pub use analytics::analytics;
pub use playlist::playlist;
pub use serve::serve;
pub use song::song;

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
