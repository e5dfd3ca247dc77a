//! `.mapgpx.toml` discovery and merging

use anyhow::{Context, Result};
use colored::Colorize;
use mapgpx::{ElevationMode, GeneratorConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name, looked up in the home and current directories
pub const CONFIG_FILE_NAME: &str = ".mapgpx.toml";

/// Configuration file structure for .mapgpx.toml
///
/// Precedence order (highest to lowest):
/// 1. Command-line arguments (--elevation, --output-dir, etc.)
/// 2. Explicit --config file, or project config (./.mapgpx.toml)
/// 3. User config (~/.mapgpx.toml)
/// 4. Built-in defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// GPX generator settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorSettings>,

    /// Where and how files are written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSettings>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Root `creator` attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    /// Track `<type>` (cycling, running, hiking, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_type: Option<String>,

    /// Elevation strategy (constant or seeded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<ElevationMode>,

    /// Elevation for the constant strategy, in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant_elevation: Option<f64>,

    /// Seed for the seeded strategy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory for generated files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Overwrite existing files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolve configuration: an explicit file replaces the project config
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let user = Self::load_user_config();
        let project = match explicit {
            Some(path) => Some(Self::load_from_file(path)?),
            None => Self::load_project_config(),
        };
        Ok(Self::merge(user, project))
    }

    /// User config path (~/.mapgpx.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    fn load_user_config() -> Option<Self> {
        Self::load_if_present(&Self::user_config_path()?, "user")
    }

    fn load_project_config() -> Option<Self> {
        Self::load_if_present(Path::new(CONFIG_FILE_NAME), "project")
    }

    /// Discovered configs are optional: a broken one is reported and skipped
    fn load_if_present(path: &Path, scope: &str) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => {
                log::debug!("loaded {scope} config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                eprintln!(
                    "{} Failed to load {scope} config from {}: {e:#}",
                    "Warning:".yellow().bold(),
                    path.display()
                );
                None
            }
        }
    }

    /// Merge configs field by field; `higher` wins where it sets a value
    pub fn merge(lower: Option<Self>, higher: Option<Self>) -> Self {
        let lower = lower.unwrap_or_default();
        let higher = higher.unwrap_or_default();

        let generator = match (lower.generator, higher.generator) {
            (Some(low), Some(high)) => Some(GeneratorSettings {
                creator: high.creator.or(low.creator),
                track_type: high.track_type.or(low.track_type),
                elevation: high.elevation.or(low.elevation),
                constant_elevation: high.constant_elevation.or(low.constant_elevation),
                seed: high.seed.or(low.seed),
            }),
            (low, high) => high.or(low),
        };

        let output = match (lower.output, higher.output) {
            (Some(low), Some(high)) => Some(OutputSettings {
                dir: high.dir.or(low.dir),
                force: high.force.or(low.force),
            }),
            (low, high) => high.or(low),
        };

        Self { generator, output }
    }

    /// Generator configuration with defaults filled in
    pub fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        if let Some(settings) = &self.generator {
            if let Some(creator) = &settings.creator {
                config.creator.clone_from(creator);
            }
            if let Some(track_type) = &settings.track_type {
                config.track_type.clone_from(track_type);
            }
            if let Some(elevation) = settings.elevation {
                config.elevation = elevation;
            }
            if let Some(constant) = settings.constant_elevation {
                config.constant_elevation = constant;
            }
            if let Some(seed) = settings.seed {
                config.seed = seed;
            }
        }
        config
    }

    /// Output directory, defaulting to the current directory
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .as_ref()
            .and_then(|o| o.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Whether existing files may be overwritten
    pub fn force(&self) -> bool {
        self.output.as_ref().and_then(|o| o.force).unwrap_or(false)
    }
}

/// Contents written by `mapgpx config init`
pub fn default_config_toml() -> String {
    let defaults = GeneratorConfig::default();
    format!(
        "# mapgpx configuration\n\
         \n\
         [generator]\n\
         creator = \"{}\"\n\
         track_type = \"{}\"\n\
         # constant or seeded\n\
         elevation = \"constant\"\n\
         constant_elevation = {:.1}\n\
         seed = {}\n\
         \n\
         [output]\n\
         dir = \".\"\n\
         force = false\n",
        defaults.creator, defaults.track_type, defaults.constant_elevation, defaults.seed
    )
}
