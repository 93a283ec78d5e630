//! cckit configuration
//!
//! Loaded from a TOML file; every table and key is optional.
//!
//! ```toml
//! parallel = true
//!
//! [scan]
//! extension = "prefab"
//! exclude = ["temp/**", "library"]
//!
//! [decode]
//! root_type = "cc.Node"
//! ```

use crate::error::CoreError;
use crate::scan::ScanConfig;
use cck_prefab::DecodeConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CckConfig {
    /// Document discovery
    pub scan: ScanConfig,
    /// Graph interpretation
    pub decode: DecodeConfig,
    /// Decode and search documents on the rayon pool
    pub parallel: bool,
}

impl CckConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With discovery options
    #[inline]
    #[must_use]
    pub fn with_scan(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    /// With decoder options
    #[inline]
    #[must_use]
    pub fn with_decode(mut self, decode: DecodeConfig) -> Self {
        self.decode = decode;
        self
    }

    /// With parallelism switched on or off
    #[inline]
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Parse configuration text
    ///
    /// # Errors
    /// Returns the parser message if `text` is not a valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load configuration from a file
    ///
    /// # Errors
    /// [`CoreError::Io`] if the file cannot be read, [`CoreError::Config`]
    /// if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CoreError::io_error(path, e))?;
        let config = Self::from_toml_str(&text).map_err(|e| CoreError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

impl Default for CckConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            decode: DecodeConfig::default(),
            parallel: true,
        }
    }
}
