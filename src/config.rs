use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::error::{CatalogError, ConfigError};

/// Multiplier applied to every simulated API delay. `0` turns the delays off.
pub const LATENCY_SCALE_VAR: &str = "PUZZLEHUB_LATENCY_SCALE";

/// Directory holding replacement fixture files. The embedded fixtures are used when unset.
pub const FIXTURES_DIR_VAR: &str = "PUZZLEHUB_FIXTURES_DIR";

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceConfig {
    pub latency_scale: f64,
    pub fixtures_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            latency_scale: 1.0,
            fixtures_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Reads the configuration from the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<ServiceConfig, ConfigError> {
        dotenvy::dotenv().ok();
        ServiceConfig::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<ServiceConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServiceConfig::default();

        if let Some(value) = lookup(LATENCY_SCALE_VAR) {
            config.latency_scale = match value.trim().parse::<f64>() {
                Ok(scale) if scale.is_finite() && scale >= 0.0 => scale,
                _ => {
                    return Err(ConfigError::InvalidLatencyScale {
                        key: LATENCY_SCALE_VAR,
                        value,
                    })
                }
            };
        }

        config.fixtures_dir = lookup(FIXTURES_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    /// The simulated delay for an operation whose unscaled latency is `base_ms`.
    pub fn delay(&self, base_ms: u64) -> Duration {
        Duration::from_millis((base_ms as f64 * self.latency_scale).round() as u64)
    }

    /// Loads the catalog from the override directory, or from the embedded fixtures.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.fixtures_dir {
            Some(dir) => Catalog::load_dir(dir),
            None => Catalog::from_fixtures(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.delay(300), Duration::from_millis(300));
    }

    #[test]
    fn test_latency_scale() {
        let config = ServiceConfig::from_lookup(lookup_from(&[(LATENCY_SCALE_VAR, "0.5")])).unwrap();
        assert_eq!(config.delay(400), Duration::from_millis(200));

        let off = ServiceConfig::from_lookup(lookup_from(&[(LATENCY_SCALE_VAR, "0")])).unwrap();
        assert_eq!(off.delay(400), Duration::ZERO);
    }

    #[test]
    fn test_invalid_latency_scale() {
        for bad in ["fast", "-1", "NaN", "inf"] {
            let err = ServiceConfig::from_lookup(lookup_from(&[(LATENCY_SCALE_VAR, bad)])).unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidLatencyScale {
                    key: LATENCY_SCALE_VAR,
                    value: bad.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_fixtures_dir() {
        let blank = ServiceConfig::from_lookup(lookup_from(&[(FIXTURES_DIR_VAR, " ")])).unwrap();
        assert_eq!(blank.fixtures_dir, None);
        assert!(blank.load_catalog().is_ok());

        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures");
        let config = ServiceConfig::from_lookup(lookup_from(&[(FIXTURES_DIR_VAR, dir)])).unwrap();
        assert_eq!(config.fixtures_dir, Some(PathBuf::from(dir)));
        assert_eq!(config.load_catalog().unwrap().puzzles.len(), 12);
    }
}
