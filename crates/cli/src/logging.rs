//! Process-wide `tracing` subscriber.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive, e.g. `debug`
/// or `mvc_storage=debug,info`.
pub(crate) const LOG_ENV: &str = "MVC_LOG";

/// Install the stderr subscriber. `quiet` lowers the fallback level to warn.
pub(crate) fn init(quiet: bool) {
    let fallback = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
