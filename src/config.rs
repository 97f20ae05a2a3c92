//! Service configuration.
//!
//! # Examples
//!
//! ```
//! use spamsift::config::ServiceConfig;
//!
//! let config = ServiceConfig::default();
//! assert_eq!(config.bind, "127.0.0.1:8501");
//! assert_eq!(config.session_ttl_secs, 3600);
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactStore;
use crate::error::{Result, SpamSiftError};

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Default idle time before a session is dropped.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Settings for the web service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Directory holding the three artifact files.
    pub artifact_dir: PathBuf,
    /// Address the HTTP server listens on.
    pub bind: String,
    /// Seconds a session may stay idle before it is purged.
    pub session_ttl_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            artifact_dir: ArtifactStore::default_dir(),
            bind: DEFAULT_BIND.to_string(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl ServiceConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ServiceConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        if self.session_ttl_secs == 0 {
            return Err(SpamSiftError::invalid_config(
                "session_ttl_secs must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|e| {
            SpamSiftError::invalid_config(format!("invalid bind address '{}': {e}", self.bind))
        })
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}
