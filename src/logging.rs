use crate::config::LogLevel;

/// Installs an env_logger backend at the given level.
///
/// `RUST_LOG` still takes precedence. Calling this more than once is harmless; only the first
/// logger is kept.
pub fn init(level: LogLevel) {
    let _ = env_logger::Builder::new()
        .filter_level(level.into())
        .parse_default_env()
        .try_init();
}
