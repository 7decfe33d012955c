use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths::DEFAULT_RENAME_START;

/// Top-level configuration shared by `csv-dedupe` and `exif-extractor`.
///
/// Every field has a default, so a config file only needs the keys it changes
/// and running without any config file behaves like the plain command-line tools.
///
/// # Loading
///
/// ```rust,no_run
/// use exif_csv::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.extractor.default_output = "tags.csv".into();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for `csv-dedupe`.
    pub dedupe: DedupeConfig,
    /// Settings for `exif-extractor`.
    pub extractor: ExtractorConfig,
}

/// CSV deduplication settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupeConfig {
    /// First counter tried when the outfile already exists (`out (2).csv`).
    pub rename_start: u32,
    /// Print the duplicate count after writing. `-q` turns it off regardless.
    pub show_stats: bool,
}

/// EXIF extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Log file used when `-o` is given without a path.
    pub default_output: String,
    /// Width of the right-aligned tag column in the console dump.
    pub tag_width: usize,
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            rename_start: DEFAULT_RENAME_START,
            show_stats: true,
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            default_output: "results.csv".to_string(),
            tag_width: 50,
        }
    }
}

impl Config {
    /// Resolve the config file path — same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    ///
    /// A missing file is not an error: defaults are used. An explicitly requested
    /// file that is missing gets a warning, the implicit one only a debug line.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            if path.is_some() {
                log::warn!(
                    "Config file not found at {}. Using defaults.",
                    config_path.display()
                );
            } else {
                log::debug!("No config at {}, using defaults", config_path.display());
            }
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.dedupe.rename_start, 2);
        assert!(config.dedupe.show_stats);
        assert_eq!(config.extractor.default_output, "results.csv");
        assert_eq!(config.extractor.tag_width, 50);
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(dir.path().join("config.json").as_path())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "extractor": { "tag_width": 30 } }"#).unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.extractor.tag_width, 30);
        assert_eq!(config.extractor.default_output, "results.csv");
        assert_eq!(config.dedupe, DedupeConfig::default());
    }

    #[test]
    fn load_invalid_json_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(Config::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.dedupe.show_stats = false;
        config.extractor.default_output = "tags.csv".to_string();

        assert_eq!(config.save(Some(path.as_path())).unwrap(), path);
        assert_eq!(Config::load(Some(path.as_path())).unwrap(), config);
    }
}
