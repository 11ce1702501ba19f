//! Logging setup.
//!
//! Log output goes to stderr so stdout carries only the command's own
//! messages.

use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor `--log` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Install the global subscriber.
///
/// Priority: `RUST_LOG` env var > `log_level` parameter > [`DEFAULT_LOG_LEVEL`].
pub fn init_telemetry(log_level: Option<&str>) {
    let level = log_level.unwrap_or(DEFAULT_LOG_LEVEL);
    let default_filter = format!("{},ovsx_sign={}", DEFAULT_LOG_LEVEL, level);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .try_init()
        .ok();
}
