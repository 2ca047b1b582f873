use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const FALLBACK_FILTER: &str = "cadence=info";

/// Pick the filter directive: `--log` first, then `RUST_LOG`, then the
/// configured `log.filter`.
pub fn filter_directive(cli: Option<&str>, env: Option<&str>, configured: &str) -> String {
    [cli, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|d| !d.is_empty())
        .unwrap_or(configured)
        .to_string()
}

/// Install the global subscriber: env filter plus a fmt layer on stderr, so
/// stdout stays free for command output.
pub fn init(cli: Option<&str>, configured: &str) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(cli, env.as_deref(), configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
