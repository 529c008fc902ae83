// src/config.rs
//
// Runtime configuration from environment variables.
//
//   GAMEPLAYER_API_URL          backend base URL (default http://localhost:8080)
//   GAMEPLAYER_DB               SQLite file (default {data_dir}/gameplayer/gameplayer.db)
//   GAMEPLAYER_DEMO             1|true|yes|on serves the built-in demo catalog
//   GAMEPLAYER_DEMO_LATENCY_MS  simulated demo latency (default 500)
//   GAMEPLAYER_LOG              off|error|warn|info|debug|trace (default info)
//
// Unparseable values fall back to the default with a warning.

use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

use crate::db::get_database_path;
use crate::error::AppResult;
use crate::integrations::DEFAULT_DEMO_LATENCY;
use crate::logger::parse_level;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// None means the per-user default location
    pub database_path: Option<PathBuf>,
    pub demo_mode: bool,
    pub demo_latency: Duration,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            database_path: None,
            demo_mode: false,
            demo_latency: DEFAULT_DEMO_LATENCY,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let demo_latency = match get("GAMEPLAYER_DEMO_LATENCY_MS") {
            None => defaults.demo_latency,
            Some(raw) => raw.parse::<u64>().map(Duration::from_millis).unwrap_or_else(|_| {
                log::warn!("Ignoring GAMEPLAYER_DEMO_LATENCY_MS={}: not a number", raw);
                defaults.demo_latency
            }),
        };

        let log_level = match get("GAMEPLAYER_LOG") {
            None => defaults.log_level,
            Some(raw) => parse_level(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring GAMEPLAYER_LOG={}: unknown level", raw);
                defaults.log_level
            }),
        };

        Self {
            api_base_url: get("GAMEPLAYER_API_URL").unwrap_or(defaults.api_base_url),
            database_path: get("GAMEPLAYER_DB").map(PathBuf::from),
            demo_mode: get("GAMEPLAYER_DEMO")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(false),
            demo_latency,
            log_level,
        }
    }

    /// Configured database file, or the per-user default
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => get_database_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.api_base_url, "http://localhost:8080");
        assert_eq!(cfg.demo_latency, Duration::from_millis(500));
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("GAMEPLAYER_API_URL", "http://10.0.0.5:9000"),
            ("GAMEPLAYER_DB", "/tmp/gp.db"),
            ("GAMEPLAYER_DEMO", "Yes"),
            ("GAMEPLAYER_DEMO_LATENCY_MS", "0"),
            ("GAMEPLAYER_LOG", "debug"),
        ]);

        assert_eq!(cfg.api_base_url, "http://10.0.0.5:9000");
        assert_eq!(cfg.resolve_database_path().unwrap(), PathBuf::from("/tmp/gp.db"));
        assert!(cfg.demo_mode);
        assert_eq!(cfg.demo_latency, Duration::ZERO);
        assert_eq!(cfg.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let cfg = config(&[
            ("GAMEPLAYER_DEMO", "maybe"),
            ("GAMEPLAYER_DEMO_LATENCY_MS", "fast"),
            ("GAMEPLAYER_LOG", "loud"),
            ("GAMEPLAYER_API_URL", "   "),
        ]);

        assert!(!cfg.demo_mode);
        assert_eq!(cfg.demo_latency, DEFAULT_DEMO_LATENCY);
        assert_eq!(cfg.log_level, LevelFilter::Info);
        assert_eq!(cfg.api_base_url, DEFAULT_API_URL);
    }
}
