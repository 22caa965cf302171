use tracing_subscriber::fmt;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,pokeremu_engine=debug";

/// Installs a global fmt subscriber. `RUST_LOG` overrides the default
/// filter. Fails if a global subscriber is already set.
pub fn init_logging() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
}
