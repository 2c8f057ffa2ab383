//! Runtime configuration, read from environment variables at startup.
//!
//! | variable              | default          |
//! |-----------------------|------------------|
//! | `GEMBID_HOST`         | `127.0.0.1`      |
//! | `GEMBID_PORT`         | `8080`           |
//! | `GEMBID_DB`           | `gembid.sqlite`  |
//! | `GEMBID_UPLOAD_DIR`   | `uploads`        |
//! | `GEMBID_OPEN_BROWSER` | `true`           |
//!
//! Values that fail to parse fall back to their default with a warning.

use log::warn;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub upload_dir: PathBuf,
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: PathBuf::from("gembid.sqlite"),
            upload_dir: PathBuf::from("uploads"),
            open_browser: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        Self {
            host: lookup("GEMBID_HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "GEMBID_PORT", defaults.port),
            db_path: lookup("GEMBID_DB").map(PathBuf::from).unwrap_or(defaults.db_path),
            upload_dir: lookup("GEMBID_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            open_browser: parsed(&lookup, "GEMBID_OPEN_BROWSER", defaults.open_browser),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_variables() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMBID_HOST", "0.0.0.0"),
            ("GEMBID_PORT", "9000"),
            ("GEMBID_DB", "/tmp/bids.sqlite"),
            ("GEMBID_OPEN_BROWSER", "false"),
        ]));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.db_path, PathBuf::from("/tmp/bids.sqlite"));
        assert!(!config.open_browser);
        assert_eq!(config.url(), "http://0.0.0.0:9000");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[("GEMBID_PORT", "eighty")]));
        assert_eq!(config.port, 8080);
    }
}
