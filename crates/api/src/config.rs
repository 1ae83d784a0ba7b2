//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `PUBLIC_URL` — endpoint advertised in the discovery document
///   (default: `"http://localhost:<port>"`)
/// - `CATALOG_PATH` — JSON catalog file; a built-in seed catalog is used
///   when unset
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub public_url: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            public_url: std::env::var("PUBLIC_URL").ok(),
            catalog_path: std::env::var("CATALOG_PATH").ok().map(PathBuf::from),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the endpoint URL advertised to clients.
    pub fn public_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_url: None,
            catalog_path: None,
            log_level: "info".to_string(),
        }
    }
}
