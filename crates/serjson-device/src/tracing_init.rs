//! Process-wide log subscriber.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::DeviceError;

const DEFAULT_FILTER: &str = "serjson=warn,serjson_device=info";

/// Installs the global subscriber, writing to stderr.
///
/// The filter comes from `filter` if given, then `RUST_LOG`, then a default
/// that shows warnings from the codec and info from the host. With
/// `log_json` each event is one JSON object per line.
///
/// # Errors
///
/// [`DeviceError::LogFilter`] if the chosen directives do not parse.
pub fn init_tracing(filter: Option<&str>, log_json: bool) -> Result<(), DeviceError> {
    let directives = filter
        .map(str::to_owned)
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_FILTER.into());
    let env_filter = EnvFilter::try_new(directives)?;

    if log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
