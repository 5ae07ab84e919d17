//! `conceptspace.toml` loading
//!
//! Every section and field is optional; anything left out takes its default.
//! A file that parses but fails validation is reported and replaced by the
//! defaults, a file that does not parse is an error.

use conceptspace_core::AppleParams;
use conceptspace_voxel::{GamutSampling, TextureConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "conceptspace.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Directory holding `<word>.json` entries
    pub dir: PathBuf,
    /// Root that entry asset paths resolve against; defaults to `dir`
    pub asset_root: Option<PathBuf>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("dictionary"),
            asset_root: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Unit reported for meshes that do not name one
    pub default_unit: String,
    pub apple: AppleParams,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            default_unit: "cm".to_string(),
            apple: AppleParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub texture: TextureConfig,
    pub dictionary: DictionaryConfig,
    pub gamut: GamutSampling,
    pub shape: ShapeConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.texture
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("[texture] {e}")))?;
        self.gamut
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("[gamut] {e}")))?;
        if self.dictionary.dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("[dictionary] dir is empty".into()));
        }
        if self.shape.default_unit.trim().is_empty() {
            return Err(ConfigError::Invalid("[shape] default_unit is empty".into()));
        }
        Ok(())
    }
}

/// Parse config text, falling back to defaults when validation fails
pub fn parse(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;

    if let Err(e) = config.validate() {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(Config::default());
    }

    Ok(config)
}

/// Load config from a specific TOML file path
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse(&content)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load the explicit file if one is given, otherwise `conceptspace.toml` in
/// the working directory when present, otherwise defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => load_from_path(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                load_from_path(path)
            } else {
                Ok(Config::default())
            }
        }
    }
}
