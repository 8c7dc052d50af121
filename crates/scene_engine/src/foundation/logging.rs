//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    if env_logger::Builder::from_default_env().try_init().is_err() {
        log::debug!("logger already initialized");
    }
}

/// Initialize logging with a default filter such as `"info"` or
/// `"scene_engine=debug"`. `RUST_LOG` still takes precedence when set.
pub fn init_with_filter(filter: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }
    if builder.try_init().is_err() {
        log::debug!("logger already initialized, ignoring filter '{filter}'");
    }
}
