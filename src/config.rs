//! Surface host configuration.
//!
//! `HostConfig` controls the few knobs a [`SurfaceHost`](crate::host::SurfaceHost) has:
//! the DPI used to convert window bounds from device-independent pixels when the window
//! cannot report its own, and the log level used by [`logging::init`](crate::logging::init).
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use gosub_surface::config::HostConfig;
//! let cfg = HostConfig::default();
//! assert_eq!(cfg.fallback_dpi, 96.0);
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use gosub_surface::config::{HostConfig, LogLevel};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = HostConfig::builder()
//!     .fallback_dpi(144.0)
//!     .log_level(LogLevel::Debug)
//!     .build()?;
//! # Ok(()) }
//! ```
//!
//! ## Load from JSON
//! Missing fields fall back to their defaults.
//! ```rust
//! use gosub_surface::config::HostConfig;
//! let cfg = HostConfig::from_json_str(r#"{ "fallback_dpi": 120.0 }"#).unwrap();
//! assert_eq!(cfg.fallback_dpi, 120.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// DPI at which one device-independent pixel equals one physical pixel.
pub const DEFAULT_DPI: f32 = 96.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Warn
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// DPI used for window surfaces whose logical DPI cannot be queried
    pub fallback_dpi: f32,
    /// Level handed to the logger when the host sets up logging
    pub log_level: LogLevel,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            fallback_dpi: DEFAULT_DPI,
            log_level: LogLevel::default(),
        }
    }
}

impl HostConfig {
    pub fn builder() -> HostConfigBuilder {
        HostConfigBuilder::default()
    }

    /// Parses a JSON document and validates the result.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let cfg: HostConfig = serde_json::from_str(json)?;
        validate(&cfg)?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }
}

/// Builder for [`HostConfig`].
#[derive(Debug, Clone, Default)]
pub struct HostConfigBuilder {
    inner: HostConfig,
}

impl HostConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut HostConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn fallback_dpi(self, dpi: f32) -> Self { self.map(|c| c.fallback_dpi = dpi) }
    pub fn log_level(self, level: LogLevel) -> Self { self.map(|c| c.log_level = level) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<HostConfig, HostConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq)]
pub enum HostConfigError {
    InvalidDpi(f32),
}

impl fmt::Display for HostConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostConfigError::InvalidDpi(dpi) =>
                write!(f, "fallback_dpi {dpi} is out of range (expected 24.0..=960.0)"),
        }
    }
}
impl std::error::Error for HostConfigError {}

fn validate(c: &HostConfig) -> Result<(), HostConfigError> {
    if !c.fallback_dpi.is_finite() || !(24.0..=960.0).contains(&c.fallback_dpi) {
        return Err(HostConfigError::InvalidDpi(c.fallback_dpi));
    }
    Ok(())
}
