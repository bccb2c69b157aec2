use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for the solver binaries, read from a TOML file. Any missing key
/// takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SolverConfig {
    /// Where push logs are read from and written to.
    pub log_dir: PathBuf,
    /// Give up planning after this many search steps in total.
    pub step_limit: Option<usize>,
    /// Give up auto-play after this many moves.
    pub max_turns: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("."),
            step_limit: None,
            max_turns: 100_000,
        }
    }
}

impl SolverConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from `path`, or use the defaults if there is no path.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        assert_eq!(SolverConfig::load(None).unwrap(), SolverConfig::default());
        let config = SolverConfig::from_toml("step-limit = 5000\n").unwrap();
        assert_eq!(config.step_limit, Some(5000));
        assert_eq!(config.log_dir, PathBuf::from("."));
        assert_eq!(config.max_turns, 100_000);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solver.toml");
        fs::write(&path, "log-dir = \"logs\"\nmax-turns = 50\n").unwrap();
        let config = SolverConfig::load(Some(&path)).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.max_turns, 50);
        assert_eq!(config.step_limit, None);
    }

    #[test]
    fn bad_config_is_an_error() {
        assert!(matches!(
            SolverConfig::from_toml("max-turns = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SolverConfig::from_toml("turns = 3"),
            Err(ConfigError::Parse(_))
        ));
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SolverConfig::load(Some(&dir.path().join("missing.toml"))),
            Err(ConfigError::Read { .. })
        ));
    }
}
