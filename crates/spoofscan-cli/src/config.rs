use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

/// CLI configuration, loaded from an optional TOML file and `SPOOFSCAN_*`
/// environment variables. Environment variables win over the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Edge length of the square LBP cells (3..=20).
    pub cell_size: usize,
    /// Number of intensity levels used to build the ROI mask.
    pub threshold_levels: usize,
    /// Bin 0 share, in percent, above which an image is reported as an attack.
    pub max_dark_percent: f64,
    /// Where `compare` writes intermediate images when no `--out-dir` is given.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: 10,
            threshold_levels: spoofscan_core::roi::DEFAULT_LEVELS,
            max_dark_percent: spoofscan_core::liveness::DEFAULT_MAX_DARK_PERCENT,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load the file at `path` (if any), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = base.with_env();
        config.validate()?;
        Ok(config)
    }

    /// Reject values no command can work with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=100.0).contains(&self.max_dark_percent),
            "max_dark_percent must be between 0 and 100, got {}",
            self.max_dark_percent
        );
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply `SPOOFSCAN_*` overrides. Unparseable values keep the current setting.
    pub fn with_env(self) -> Self {
        Self {
            cell_size: env_usize("SPOOFSCAN_CELL_SIZE", self.cell_size),
            threshold_levels: env_usize("SPOOFSCAN_THRESHOLD_LEVELS", self.threshold_levels),
            max_dark_percent: env_f64("SPOOFSCAN_MAX_DARK_PERCENT", self.max_dark_percent),
            output_dir: std::env::var("SPOOFSCAN_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.output_dir),
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
