use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::category::{CategoryConfigEntry, CategoryStore};
use crate::configurator::ConfiguratorConfig;
use crate::error::{Result, ShowroomError};
use crate::vehicle::JsonCatalog;

const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CATALOG_PATH: &str = "catalog.json";
const DEFAULT_MODELS_DIR: &str = "models";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# showroom configuration file
# Location: ~/.showroom/config.toml

[catalog]
# Vehicle export from the catalog table (JSON array), relative to this directory
# Default: "catalog.json"
path = "catalog.json"

[configurator]
# Directory holding one configurator table per model (<model>.toml or <model>.json)
# Default: "models"
models_dir = "models"

# Menu category overrides. An existing label gets its keywords replaced,
# a new label is inserted before the catch-all ("Seminovos").
# Example:
# [[categories]]
# label = "SUVs"
# keywords = ["equinox", "tracker", "trailblazer"]
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub configurator: ConfiguratorSettings,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryConfigEntry>,
}

/// Catalog source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog export file
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_PATH)
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Configurator table location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfiguratorSettings {
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,
}

fn default_models_dir() -> PathBuf {
    PathBuf::from(DEFAULT_MODELS_DIR)
}

impl Default for ConfiguratorSettings {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| ShowroomError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "catalog.path" => Some(self.catalog.path.display().to_string()),
            "configurator.models_dir" => {
                Some(self.configurator.models_dir.display().to_string())
            }
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim().trim_matches('"').trim_matches('\'');
        match key {
            "catalog.path" => {
                self.catalog.path = PathBuf::from(value);
                Ok(())
            }
            "configurator.models_dir" => {
                self.configurator.models_dir = PathBuf::from(value);
                Ok(())
            }
            _ => Err(ShowroomError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            (
                "catalog.path".to_string(),
                self.catalog.path.display().to_string(),
            ),
            (
                "configurator.models_dir".to_string(),
                self.configurator.models_dir.display().to_string(),
            ),
        ]
    }

    /// Builtin menu rules with this config's overrides applied
    pub fn category_store(&self) -> Result<CategoryStore> {
        CategoryStore::builtin().with_config(&self.categories)
    }

    /// Catalog repository, relative paths resolved against `base_dir`
    pub fn catalog(&self, base_dir: &Path) -> JsonCatalog {
        JsonCatalog::new(base_dir.join(&self.catalog.path))
    }

    /// Locates a model table by file path or by name under `models_dir`.
    pub fn resolve_model(&self, base_dir: &Path, model: &str) -> Result<PathBuf> {
        let direct = PathBuf::from(model);
        if direct.is_file() {
            return Ok(direct);
        }

        let models_dir = base_dir.join(&self.configurator.models_dir);
        let slug = model.trim().to_lowercase().replace(' ', "-");
        ["toml", "json"]
            .iter()
            .map(|ext| models_dir.join(format!("{}.{}", slug, ext)))
            .find(|p| p.is_file())
            .ok_or_else(|| ShowroomError::ModelNotFound {
                name: model.to_string(),
            })
    }

    /// Resolves and loads a model table.
    pub fn load_model(&self, base_dir: &Path, model: &str) -> Result<ConfiguratorConfig> {
        let path = self.resolve_model(base_dir, model)?;
        ConfiguratorConfig::load(&path)
    }
}
