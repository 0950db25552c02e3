use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use mapdig_world::WorldHeight;
use serde::Deserialize;

pub const DEFAULT_CONFIG: &str = "mapdig.toml";

/// Contents of `mapdig.toml`. Every field is optional.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// World save directory.
    pub world: PathBuf,
    /// Region directory relative to `world`.
    pub region_dir: String,
    pub region_extension: String,
    pub height: WorldHeight,
    /// Block registry TOML; the embedded vanilla table when unset.
    pub registry: Option<PathBuf>,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: PathBuf::from("."),
            region_dir: "region".to_string(),
            region_extension: "mca".to_string(),
            height: WorldHeight::OVERWORLD,
            registry: None,
            log: LogConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s).map_err(|e| format!("{}: {e}", path.display()).into())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: Config = toml::from_str(s)?;
        if cfg.height.section_count == 0 {
            return Err("height.section_count must be at least 1".into());
        }
        Ok(cfg)
    }

    pub fn region_path(&self) -> PathBuf {
        self.world.join(&self.region_dir)
    }
}
