//! Config for the catalog and projection behaviors
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`].
//!
//! # Environment Variables
//!
//! All values are optional. Flags are case-insensitive; set them to `"true"` to enable them.
//!
//! - `CATALOG_LOG`: Enable logging to a file (default: `false`)
//! - `CATALOG_LOG_DIR`: Directory receiving the log file (default: current directory)
//! - `CATALOG_UNBOUNDED_DEPTH`: Integer emitted for an unbounded memory depth (default: `-1`)

use std::{env, path::PathBuf};

use anyhow::Context;

/// Value emitted in place of an unbounded memory depth, since infinity is not valid JSON.
pub const DEFAULT_UNBOUNDED_DEPTH_SENTINEL: i64 = -1;

/// Configuration for catalog and projection behaviors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) log: bool,
    pub(crate) log_dir: Option<PathBuf>,
    pub(crate) unbounded_depth_sentinel: i64,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - Logging to file is disabled.
    /// - The log file, once enabled, goes to the current directory.
    /// - Unbounded memory depths are transmitted as `-1`.
    pub fn new() -> Self {
        Self {
            log: false,
            log_dir: None,
            unbounded_depth_sentinel: DEFAULT_UNBOUNDED_DEPTH_SENTINEL,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Unset variables keep their default value. Any flag value other than `"true"` disables
    /// the flag.
    ///
    /// # Errors
    /// Returned when `CATALOG_UNBOUNDED_DEPTH` is set but is not an integer.
    pub fn from_env() -> anyhow::Result<Self> {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        let unbounded_depth_sentinel = match env::var("CATALOG_UNBOUNDED_DEPTH") {
            Ok(val) => val.trim().parse().with_context(|| {
                format!("CATALOG_UNBOUNDED_DEPTH must be an integer, got '{val}'")
            })?,
            Err(_) => DEFAULT_UNBOUNDED_DEPTH_SENTINEL,
        };

        Ok(Self {
            log: get_env_flag("CATALOG_LOG", false),
            log_dir: env::var_os("CATALOG_LOG_DIR").map(PathBuf::from),
            unbounded_depth_sentinel,
        })
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Set the directory receiving the log file.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Set the integer emitted in place of an unbounded memory depth.
    pub fn with_unbounded_depth_sentinel(mut self, value: i64) -> Self {
        self.unbounded_depth_sentinel = value;
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
