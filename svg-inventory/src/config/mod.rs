//! Configuration management for svg-inventory
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `SVG_INVENTORY_` prefix,
//!    sections separated by `__`, e.g. `SVG_INVENTORY_SERVER__PORT=8080`)
//! 2. An explicit config file, or `./config.toml` when none is given
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # config.toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//! request_timeout_ms = 30000
//!
//! [storage]
//! upload_dir = "./uploads"
//! public_prefix = "uploads"
//!
//! [upload]
//! max_file_size = 10485760
//! redirect_to = "/"
//!
//! [inventory]
//! scan_timeout_ms = 10000
//! max_concurrent_scans = 4
//! scan_workers = 4
//!
//! [downloads]
//! not_found_status = false
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use svg_inventory::config::AppConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load(None)?;
//! let port = config.server.port;
//! # Ok(())
//! # }
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "SVG_INVENTORY_";

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Upper bound on the time any single request may take
    pub request_timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_ms: 30_000,
        }
    }
}

impl ServerSettings {
    /// Socket address to bind
    ///
    /// # Errors
    ///
    /// Returns an error if `host:port` does not parse as a socket address.
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Upload storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding uploaded files
    pub upload_dir: PathBuf,

    /// Prefix reported in front of filenames in the inventory listing
    pub public_prefix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("./uploads"),
            public_prefix: "uploads".to_string(),
        }
    }
}

/// Upload endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Largest accepted file, in bytes
    pub max_file_size: usize,

    /// Location clients are redirected to after a successful upload
    pub redirect_to: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            redirect_to: "/".to_string(),
        }
    }
}

/// Inventory pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    /// Time limit for building one listing
    pub scan_timeout_ms: u64,

    /// Listings built at the same time; further requests wait
    pub max_concurrent_scans: usize,

    /// Files validated concurrently within one listing
    pub scan_workers: usize,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            scan_timeout_ms: 10_000,
            max_concurrent_scans: 4,
            scan_workers: 4,
        }
    }
}

/// Download endpoint configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadSettings {
    /// Answer 404 for missing files instead of an empty 200 response
    pub not_found_status: bool,
}

/// Complete svg-inventory configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Upload storage settings
    #[serde(default)]
    pub storage: StorageSettings,

    /// Upload endpoint settings
    #[serde(default)]
    pub upload: UploadSettings,

    /// Inventory pipeline settings
    #[serde(default)]
    pub inventory: InventorySettings,

    /// Download endpoint settings
    #[serde(default)]
    pub downloads: DownloadSettings,
}

impl AppConfig {
    /// Load configuration from defaults, a config file and the environment
    ///
    /// With `path == None`, `./config.toml` is used if it exists. A missing
    /// file is not an error; a malformed one is.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use svg_inventory::config::AppConfig;
    /// use std::path::Path;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = AppConfig::load(Some(Path::new("./config/production.toml")))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        let config = Self::figment(&file).extract()?;
        Ok(config)
    }

    /// The provider stack behind [`load`](Self::load)
    #[must_use]
    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
