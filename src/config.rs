//! Environment-backed configuration with defaults.
//!
//! Built once in `main` and passed down; nothing reads the environment
//! after startup.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding the three model artifacts. The default `models`
    /// is resolved against the working directory, not the executable's
    /// location; set MODEL_DIR when running from elsewhere.
    pub model_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            model_dir: env::var("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("models")),
        }
    }
}
