//! Server configuration from environment variables

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            db_path: PathBuf::from("wishlist.db"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl ServerConfig {
    /// Read `WISHLIST_*` variables, falling back to the defaults
    pub fn load() -> Result<Self, String> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Same as `load` with a custom variable source
    pub fn load_from<F>(var: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: var("WISHLIST_HOST").unwrap_or(defaults.host),
            port: try_load(&var, "WISHLIST_PORT", defaults.port)?,
            db_path: var("WISHLIST_DB_PATH").map(PathBuf::from).unwrap_or(defaults.db_path),
            log_dir: var("WISHLIST_LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<F, T>(var: &F, key: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("Invalid {} value '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}
