//! Parameter file loading.
//!
//! Every section is optional; missing keys keep their defaults, so a file
//! holding only `rvol: { lookback: 60 }` is valid.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use finx_attention::AttentionConfig;
use finx_indicators::{BatchConfig, DvConfig, IndicatorConfig, PmarpConfig, RvolConfig};
use finx_momentum::MomentumConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

pub const CONFIG_FILE_NAME: &str = "finx.yaml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub pmarp: PmarpConfig,
    pub rvol: RvolConfig,
    pub dv: DvConfig,
    pub batch: BatchConfig,
    pub momentum: MomentumConfig,
    pub attention: AttentionConfig,
}

impl ScanConfig {
    /// Load `explicit` when given (it must exist), otherwise
    /// `$FINX_HOME/finx.yaml` when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = resolve_finx_home().join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    debug!(path = %candidate.display(), "no config file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let text = fs::read_to_string(&path).map_err(|error| CliError::Config {
            path: path.clone(),
            message: error.to_string(),
        })?;
        let config = Self::from_yaml(&text).map_err(|message| CliError::Config {
            path: path.clone(),
            message,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, String> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|error| error.to_string())
    }

    pub fn validate(&self) -> Result<(), CliError> {
        self.indicators().validate()?;
        self.momentum.validate()?;
        self.attention.validate()?;
        Ok(())
    }

    pub fn indicators(&self) -> IndicatorConfig {
        IndicatorConfig {
            pmarp: self.pmarp.clone(),
            rvol: self.rvol.clone(),
            dv: self.dv.clone(),
            batch: self.batch.clone(),
        }
    }
}

fn resolve_finx_home() -> PathBuf {
    if let Some(path) = env::var_os("FINX_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".finx");
    }

    PathBuf::from(".finx")
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = ScanConfig::from_yaml(
            "rvol:\n  lookback: 60\nattention:\n  top_n: 30\n  weights:\n    search: 0.5\n",
        )
        .expect("yaml");

        assert_eq!(config.rvol.lookback, 60);
        assert_eq!(config.rvol.sustained_threshold, 2.0);
        assert_eq!(config.pmarp, PmarpConfig::default());
        assert_eq!(config.attention.top_n, Some(30));
        assert_eq!(config.attention.weights.search, 0.5);
        assert_eq!(config.attention.weights.mention, 0.35);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_file_is_read_and_validated() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("scan.yaml");
        fs::write(&path, "pmarp:\n  lookback: 0\n").expect("write config");

        let config = ScanConfig::load(Some(&path)).expect("parses");
        let error = config.validate().expect_err("zero lookback");
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let temp = tempdir().expect("temp dir");
        let error = ScanConfig::load(Some(&temp.path().join("absent.yaml"))).expect_err("missing");
        assert!(matches!(error, CliError::Config { .. }));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        assert!(ScanConfig::from_yaml("batch: [1, 2").is_err());
        assert_eq!(ScanConfig::from_yaml("  \n").expect("blank"), ScanConfig::default());
    }
}
