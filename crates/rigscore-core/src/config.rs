//! Matching configuration: thresholds, weights and cache sizing.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{Error, Result};

pub const DEFAULT_SIMPLIFIED_THRESHOLD: f64 = 0.6;
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.7;
pub const DEFAULT_SERIES_BOOST: f64 = 1.2;
pub const DEFAULT_SEQUENCE_WEIGHT: f64 = 0.5;

/// Tunables for the tiered resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Minimum similarity (exclusive) to pick among candidates sharing a series key.
    #[serde(default = "default_simplified_threshold")]
    pub simplified_threshold: f64,
    /// Minimum similarity (exclusive) for the full catalog scan.
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    /// Multiplier applied when query and candidate belong to the same series.
    #[serde(default = "default_series_boost")]
    pub series_boost: f64,
    /// Weight of the sequence ratio; Jaro-Winkler gets the remainder.
    #[serde(default = "default_sequence_weight")]
    pub sequence_weight: f64,
    /// Bound on cached queries per namespace. `None` never evicts.
    #[serde(default)]
    pub cache_capacity: Option<usize>,
}

fn default_simplified_threshold() -> f64 {
    DEFAULT_SIMPLIFIED_THRESHOLD
}
fn default_fuzzy_threshold() -> f64 {
    DEFAULT_FUZZY_THRESHOLD
}
fn default_series_boost() -> f64 {
    DEFAULT_SERIES_BOOST
}
fn default_sequence_weight() -> f64 {
    DEFAULT_SEQUENCE_WEIGHT
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            simplified_threshold: DEFAULT_SIMPLIFIED_THRESHOLD,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            series_boost: DEFAULT_SERIES_BOOST,
            sequence_weight: DEFAULT_SEQUENCE_WEIGHT,
            cache_capacity: None,
        }
    }
}

impl MatchConfig {
    /// Load config from a JSON file, falling back to defaults when the file
    /// is missing, unreadable or fails validation.
    pub fn load(config_path: &Path) -> Self {
        let config = match std::fs::read_to_string(config_path) {
            Ok(s) => match serde_json::from_str::<MatchConfig>(&s) {
                Ok(c) => c,
                Err(e) => {
                    warn!("Ignoring invalid config {}: {}", config_path.display(), e);
                    return Self::default();
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", config_path.display());
                return Self::default();
            }
            Err(e) => {
                warn!("Cannot read config {}: {}. Using defaults.", config_path.display(), e);
                return Self::default();
            }
        };

        match config.validate() {
            Ok(()) => {
                info!("Loaded match config from {}", config_path.display());
                config
            }
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Defaults overlaid with `RIGSCORE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay values from a variable lookup, then validate.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("RIGSCORE_SIMPLIFIED_THRESHOLD") {
            self.simplified_threshold = parse_var("RIGSCORE_SIMPLIFIED_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("RIGSCORE_FUZZY_THRESHOLD") {
            self.fuzzy_threshold = parse_var("RIGSCORE_FUZZY_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("RIGSCORE_SERIES_BOOST") {
            self.series_boost = parse_var("RIGSCORE_SERIES_BOOST", &v)?;
        }
        if let Some(v) = lookup("RIGSCORE_CACHE_CAPACITY") {
            self.cache_capacity = Some(parse_var("RIGSCORE_CACHE_CAPACITY", &v)?);
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("simplified_threshold", self.simplified_threshold),
            ("fuzzy_threshold", self.fuzzy_threshold),
            ("sequence_weight", self.sequence_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!("{name} must be within [0, 1], got {value}")));
            }
        }
        if !(self.series_boost > 0.0) {
            return Err(Error::Config(format!(
                "series_boost must be positive, got {}",
                self.series_boost
            )));
        }
        if self.cache_capacity == Some(0) {
            return Err(Error::Config("cache_capacity must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key}: cannot parse '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let c = MatchConfig::default();
        assert_eq!(c.simplified_threshold, 0.6);
        assert_eq!(c.fuzzy_threshold, 0.7);
        assert_eq!(c.series_boost, 1.2);
        assert!(c.cache_capacity.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c: MatchConfig = serde_json::from_str(r#"{"fuzzy_threshold": 0.8}"#).unwrap();
        assert_eq!(c.fuzzy_threshold, 0.8);
        assert_eq!(c.simplified_threshold, 0.6);
    }

    #[test]
    fn test_load_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(MatchConfig::load(&dir.path().join("nope.json")), MatchConfig::default());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"fuzzy_threshold": 3.0}"#).unwrap();
        assert_eq!(MatchConfig::load(&bad), MatchConfig::default());

        // A directory exists but cannot be read as a file.
        assert_eq!(MatchConfig::load(dir.path()), MatchConfig::default());

        let good = dir.path().join("good.json");
        std::fs::write(&good, r#"{"cache_capacity": 64}"#).unwrap();
        assert_eq!(MatchConfig::load(&good).cache_capacity, Some(64));
    }

    #[test]
    fn test_env_overlay() {
        let vars: HashMap<&str, &str> = [
            ("RIGSCORE_FUZZY_THRESHOLD", "0.75"),
            ("RIGSCORE_CACHE_CAPACITY", "128"),
        ]
        .into_iter()
        .collect();
        let mut c = MatchConfig::default();
        c.apply_env(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(c.fuzzy_threshold, 0.75);
        assert_eq!(c.cache_capacity, Some(128));
    }

    #[test]
    fn test_env_rejects_garbage() {
        let mut c = MatchConfig::default();
        let err = c
            .apply_env(|k| (k == "RIGSCORE_SERIES_BOOST").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let mut c = MatchConfig::default();
        assert!(c
            .apply_env(|k| (k == "RIGSCORE_CACHE_CAPACITY").then(|| "0".to_string()))
            .is_err());
    }
}
