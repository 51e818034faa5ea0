//! Logging setup for the keystack binary
//!
//! Two sinks:
//! - stderr, filtered by `RUST_LOG` (default `warn`) so stdout stays clean for commands
//! - `<config dir>/logs/keystack.log`, rotated daily, always at `debug`
//!
//! Useful filters:
//!
//! ```text
//! RUST_LOG=debug                          registrations, EXEC_BIND, stack and mode changes
//! RUST_LOG=keystack::keycmd=trace         every key press and release
//! RUST_LOG=keystack::keymap=trace         candidate scans and evictions
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::{ensure_logs_dir, LOG_FILE_NAME};

const CONSOLE_DEFAULT: &str = "warn";
const FILE_LEVEL: &str = "debug";

/// Install the global subscriber
///
/// Without a writable config directory only the console sink is installed.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(CONSOLE_DEFAULT));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file = ensure_logs_dir()
        .map_err(|e| eprintln!("Warning: file logging disabled: {}", e))
        .ok()
        .map(|dir| {
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE_NAME))
                .with_ansi(false)
                .with_target(true)
                .with_filter(EnvFilter::new(FILE_LEVEL))
        });

    tracing_subscriber::registry().with(console).with(file).init();
}
