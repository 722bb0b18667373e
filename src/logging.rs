use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "info,melody_syncer=debug,tower_http=info,reqwest=warn";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Safe to call more than once; later
/// calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
