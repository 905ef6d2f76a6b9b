//! Server configuration from environment variables

use std::env;
use std::path::PathBuf;

/// Settings for the HTTP server itself; provider credentials are read by
/// each provider's own `from_env`.
pub struct AppConfig {
    pub bind_addr: String,
    pub docs_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
            docs_dir: env::var("DOCS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("../docs")),
        }
    }
}
