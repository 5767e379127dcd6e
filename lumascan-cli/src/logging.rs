//! Logging setup for the lumascan CLI.
//!
//! Uses the standard `log` facade with `env_logger` as the backend. Verbosity
//! follows the `RUST_LOG` environment variable:
//! - `RUST_LOG=info` (default): normal operation logs
//! - `RUST_LOG=debug`: per-stage detail, including frame counts
//! - `RUST_LOG=trace`: very verbose reader output

use env_logger::Env;

/// Initializes the global logger. Call once, before any other work.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

/// Returns the current local timestamp formatted as "YYYY-MM-DD HH:MM:SS",
/// used for run start/finish lines.
pub fn run_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
