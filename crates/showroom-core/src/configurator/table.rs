//! Configurator Tables
//!
//! Static per-model description of the selectable variants and the image
//! sequences behind them.
//!
//! ## Composite keys
//!
//! With tabs declared, a key is the active tab id followed by the selected
//! option of each axis the tab lists. Without tabs, it is the selected option
//! of every axis in declaration order. Parts are joined with `key_separator`.
//!
//! ```toml
//! model = "Equinox"
//!
//! [[axes]]
//! id = "exterior_color"
//! label = "Cor externa"
//! options = [
//!     { id = "red", label = "Vermelho", swatch = "#b3001b" },
//!     { id = "blue", label = "Azul" },
//! ]
//!
//! [[tabs]]
//! id = "exterior"
//! label = "Exterior"
//! axes = ["exterior_color"]
//!
//! [image_sets]
//! "exterior:red" = ["red-front.jpg", "red-side.jpg"]
//! "exterior:blue" = ["blue-front.jpg"]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShowroomError};

pub const DEFAULT_KEY_SEPARATOR: &str = ":";

/// One selectable value of an axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    pub id: String,
    pub label: String,
    /// Color code or preview image for the picker
    #[serde(default)]
    pub swatch: Option<String>,
}

/// Independent selectable dimension (exterior color, interior trim, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAxis {
    pub id: String,
    pub label: String,
    pub options: Vec<VariantOption>,
}

impl VariantAxis {
    pub fn option_index(&self, option_id: &str) -> Option<usize> {
        self.options.iter().position(|o| o.id == option_id)
    }
}

/// Image family shown together (Exterior, Interior)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewTab {
    pub id: String,
    pub label: String,
    /// Axes whose selection picks the images of this tab
    #[serde(default)]
    pub axes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguratorConfig {
    #[serde(default)]
    pub model: String,
    pub axes: Vec<VariantAxis>,
    #[serde(default)]
    pub tabs: Vec<ViewTab>,
    #[serde(default = "default_key_separator", alias = "keySeparator")]
    pub key_separator: String,
    #[serde(default, alias = "imageSets")]
    pub image_sets: BTreeMap<String, Vec<String>>,
}

fn default_key_separator() -> String {
    DEFAULT_KEY_SEPARATOR.to_string()
}

impl ConfiguratorConfig {
    /// Loads a model table. `.toml` files are read as TOML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let parsed = if is_toml {
            toml::from_str::<Self>(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str::<Self>(&content).map_err(|e| e.to_string())
        };
        let mut config = parsed.map_err(|message| ShowroomError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })?;

        if config.model.is_empty() {
            if let Some(stem) = path.file_stem() {
                config.model = stem.to_string_lossy().into_owned();
            }
        }

        config.check_structure()?;
        Ok(config)
    }

    /// Structural invariants needed to build an engine.
    ///
    /// Image coverage is checked separately by [`validate`](Self::validate).
    pub fn check_structure(&self) -> Result<()> {
        let invalid = |message: String| ShowroomError::InvalidConfigurator { message };

        if self.axes.is_empty() {
            return Err(invalid("at least one variant axis is required".to_string()));
        }
        if self.key_separator.is_empty() {
            return Err(invalid("key_separator must not be empty".to_string()));
        }

        // option and tab ids become key parts; a separator inside one makes keys ambiguous
        let sep = self.key_separator.as_str();
        let mut axis_ids = HashSet::new();
        for axis in &self.axes {
            if axis.id.trim().is_empty() {
                return Err(invalid("axis with blank id".to_string()));
            }
            if !axis_ids.insert(axis.id.as_str()) {
                return Err(invalid(format!("duplicate axis '{}'", axis.id)));
            }
            if axis.options.is_empty() {
                return Err(invalid(format!("axis '{}' has no options", axis.id)));
            }
            let mut option_ids = HashSet::new();
            for option in &axis.options {
                if option.id.contains(sep) {
                    return Err(invalid(format!(
                        "option '{}' on axis '{}' contains key separator '{}'",
                        option.id, axis.id, sep
                    )));
                }
                if !option_ids.insert(option.id.as_str()) {
                    return Err(invalid(format!(
                        "duplicate option '{}' on axis '{}'",
                        option.id, axis.id
                    )));
                }
            }
        }

        let mut tab_ids = HashSet::new();
        for tab in &self.tabs {
            if !tab_ids.insert(tab.id.as_str()) {
                return Err(invalid(format!("duplicate tab '{}'", tab.id)));
            }
            if tab.id.contains(sep) {
                return Err(invalid(format!(
                    "tab '{}' contains key separator '{}'",
                    tab.id, sep
                )));
            }
            if let Some(missing) = tab.axes.iter().find(|a| !axis_ids.contains(a.as_str())) {
                return Err(invalid(format!(
                    "tab '{}' references unknown axis '{}'",
                    tab.id, missing
                )));
            }
        }

        Ok(())
    }

    pub fn axis_index(&self, axis_id: &str) -> Option<usize> {
        self.axes.iter().position(|a| a.id == axis_id)
    }

    pub fn tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    /// Axis indices that take part in the key for `tab`
    fn key_axes(&self, tab: Option<usize>) -> Vec<usize> {
        match tab.and_then(|t| self.tabs.get(t)) {
            Some(tab) => tab
                .axes
                .iter()
                .filter_map(|id| self.axis_index(id))
                .collect(),
            None => (0..self.axes.len()).collect(),
        }
    }

    /// Builds the lookup key for the given option indices (one per axis).
    pub fn composite_key(&self, selections: &[usize], tab: Option<usize>) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(tab) = tab.and_then(|t| self.tabs.get(t)) {
            parts.push(&tab.id);
        }
        for axis_idx in self.key_axes(tab) {
            let option = selections
                .get(axis_idx)
                .and_then(|&o| self.axes[axis_idx].options.get(o));
            if let Some(option) = option {
                parts.push(&option.id);
            }
        }
        parts.join(self.key_separator.as_str())
    }

    pub fn image_set(&self, key: &str) -> Option<&[String]> {
        self.image_sets.get(key).map(Vec::as_slice)
    }

    /// Every key a user can reach through the picker.
    pub fn reachable_keys(&self) -> Vec<String> {
        let tabs: Vec<Option<usize>> = if self.tabs.is_empty() {
            vec![None]
        } else {
            (0..self.tabs.len()).map(Some).collect()
        };

        let mut keys = Vec::new();
        for tab in tabs {
            let key_axes = self.key_axes(tab);
            let mut combos: Vec<Vec<usize>> = vec![vec![0; self.axes.len()]];
            for &axis_idx in &key_axes {
                let option_count = self.axes[axis_idx].options.len();
                combos = combos
                    .into_iter()
                    .flat_map(|combo| {
                        (0..option_count).map(move |o| {
                            let mut next = combo.clone();
                            next[axis_idx] = o;
                            next
                        })
                    })
                    .collect();
            }
            for combo in combos {
                let key = self.composite_key(&combo, tab);
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Checks that every reachable key resolves to a non-empty image list.
    pub fn validate(&self) -> ValidationReport {
        let reachable = self.reachable_keys();
        let mut report = ValidationReport {
            model: self.model.clone(),
            checked: reachable.len(),
            ..Default::default()
        };

        for key in &reachable {
            match self.image_sets.get(key) {
                None => report.missing.push(key.clone()),
                Some(images) if images.is_empty() => report.empty.push(key.clone()),
                Some(_) => {}
            }
        }
        report.unused = self
            .image_sets
            .keys()
            .filter(|k| !reachable.contains(k))
            .cloned()
            .collect();

        report
    }
}

/// Coverage of a model table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub model: String,
    /// Number of reachable keys checked
    pub checked: usize,
    /// Reachable keys with no entry
    pub missing: Vec<String>,
    /// Reachable keys mapped to an empty list
    pub empty: Vec<String>,
    /// Entries no selection can reach
    pub unused: Vec<String>,
}

impl ValidationReport {
    /// Unused entries are only a warning.
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.empty.is_empty()
    }

    pub fn into_result(self) -> Result<Self> {
        if self.is_ok() {
            return Ok(self);
        }
        let mut problems = Vec::new();
        if !self.missing.is_empty() {
            problems.push(format!("missing image sets: {}", self.missing.join(", ")));
        }
        if !self.empty.is_empty() {
            problems.push(format!("empty image sets: {}", self.empty.join(", ")));
        }
        Err(ShowroomError::InvalidConfigurator {
            message: format!("model '{}': {}", self.model, problems.join("; ")),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    pub(crate) fn option(id: &str) -> VariantOption {
        VariantOption {
            id: id.to_string(),
            label: id.to_uppercase(),
            swatch: None,
        }
    }

    pub(crate) fn axis(id: &str, options: &[&str]) -> VariantAxis {
        VariantAxis {
            id: id.to_string(),
            label: id.to_string(),
            options: options.iter().map(|o| option(o)).collect(),
        }
    }

    pub(crate) fn images(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|s| s.to_string()).collect()
    }

    /// Single exterior color axis, no tabs.
    pub(crate) fn color_config() -> ConfiguratorConfig {
        ConfiguratorConfig {
            model: "Equinox".to_string(),
            axes: vec![axis("exterior_color", &["red", "blue"])],
            tabs: Vec::new(),
            key_separator: DEFAULT_KEY_SEPARATOR.to_string(),
            image_sets: [
                ("red".to_string(), images(&["a", "b", "c"])),
                ("blue".to_string(), images(&["d", "e"])),
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Exterior/interior tabs, each keyed by its own axis.
    pub(crate) fn tabbed_config() -> ConfiguratorConfig {
        ConfiguratorConfig {
            model: "Tracker".to_string(),
            axes: vec![
                axis("exterior_color", &["white", "black"]),
                axis("interior_color", &["jet", "ash"]),
            ],
            tabs: vec![
                ViewTab {
                    id: "exterior".to_string(),
                    label: "Exterior".to_string(),
                    axes: vec!["exterior_color".to_string()],
                },
                ViewTab {
                    id: "interior".to_string(),
                    label: "Interior".to_string(),
                    axes: vec!["interior_color".to_string()],
                },
            ],
            key_separator: DEFAULT_KEY_SEPARATOR.to_string(),
            image_sets: [
                ("exterior:white".to_string(), images(&["w1", "w2"])),
                ("exterior:black".to_string(), images(&["k1"])),
                ("interior:jet".to_string(), images(&["j1", "j2", "j3"])),
                ("interior:ash".to_string(), images(&["s1"])),
            ]
            .into_iter()
            .collect(),
        }
    }

    #[test]
    fn test_composite_key_without_tabs() {
        let config = color_config();
        assert_eq!(config.composite_key(&[0], None), "red");
        assert_eq!(config.composite_key(&[1], None), "blue");
    }

    #[test]
    fn test_composite_key_with_tabs() {
        let config = tabbed_config();
        assert_eq!(config.composite_key(&[1, 0], Some(0)), "exterior:black");
        assert_eq!(config.composite_key(&[1, 1], Some(1)), "interior:ash");
    }

    #[test]
    fn test_multi_axis_key_uses_declaration_order() {
        let mut config = color_config();
        config.axes.push(axis("trim", &["lt", "rs"]));
        config.key_separator = "/".to_string();
        assert_eq!(config.composite_key(&[1, 1], None), "blue/rs");
    }

    #[test]
    fn test_reachable_keys_cover_cartesian_product() {
        let mut config = color_config();
        config.axes.push(axis("trim", &["lt", "rs", "premier"]));
        let keys = config.reachable_keys();
        assert_eq!(keys.len(), 6);
        assert!(keys.contains(&"red:premier".to_string()));
        assert!(keys.contains(&"blue:lt".to_string()));
    }

    #[test]
    fn test_validate_reports_missing_empty_and_unused() {
        let mut config = tabbed_config();
        config.image_sets.remove("interior:ash");
        config
            .image_sets
            .insert("exterior:black".to_string(), Vec::new());
        config
            .image_sets
            .insert("exterior:green".to_string(), images(&["g1"]));

        let report = config.validate();
        assert_eq!(report.checked, 4);
        assert_eq!(report.missing, vec!["interior:ash"]);
        assert_eq!(report.empty, vec!["exterior:black"]);
        assert_eq!(report.unused, vec!["exterior:green"]);
        assert!(!report.is_ok());
        assert!(report.into_result().is_err());
    }

    #[test]
    fn test_validate_complete_table() {
        let report = tabbed_config().validate();
        assert!(report.is_ok());
        assert!(report.unused.is_empty());
    }

    #[test]
    fn test_structure_errors() {
        let mut config = color_config();
        config.axes[0].options.clear();
        assert!(config.check_structure().is_err());

        let mut config = tabbed_config();
        config.tabs[1].axes = vec!["wheels".to_string()];
        assert!(config.check_structure().is_err());

        let mut config = color_config();
        config.axes.clear();
        assert!(config.check_structure().is_err());

        let mut config = color_config();
        config.axes[0].options.push(option("red"));
        assert!(config.check_structure().is_err());
    }

    #[test]
    fn test_ids_containing_separator_are_rejected() {
        // "a" + "b:c" and "a:b" + "c" would both key to "a:b:c"
        let mut config = color_config();
        config.axes = vec![axis("color", &["a", "a:b"]), axis("trim", &["b:c", "c"])];
        config.image_sets = [("a:b:c".to_string(), images(&["only.jpg"]))]
            .into_iter()
            .collect();
        let err = config.check_structure().unwrap_err();
        assert!(
            matches!(err, ShowroomError::InvalidConfigurator { ref message } if message.contains("a:b"))
        );

        // the same ids are fine under a separator they do not contain
        config.key_separator = "/".to_string();
        assert!(config.check_structure().is_ok());
        assert_eq!(config.reachable_keys().len(), 4);

        let mut config = tabbed_config();
        config.tabs[0].id = "ext:front".to_string();
        assert!(matches!(
            config.check_structure(),
            Err(ShowroomError::InvalidConfigurator { .. })
        ));
    }

    #[test]
    fn test_load_rejects_ambiguous_ids() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("onix.json");
        fs::write(
            &path,
            r#"{"axes": [{"id": "trim", "label": "Versão", "options": [{"id": "lt:turbo", "label": "LT Turbo"}]}]}"#,
        )
        .unwrap();

        let err = ConfiguratorConfig::load(&path).unwrap_err();
        assert!(matches!(err, ShowroomError::InvalidConfigurator { .. }));
    }

    #[test]
    fn test_load_toml_table() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("equinox.toml");
        fs::write(
            &path,
            r##"
[[axes]]
id = "exterior_color"
label = "Cor externa"
options = [
    { id = "red", label = "Vermelho", swatch = "#b3001b" },
    { id = "blue", label = "Azul" },
]

[image_sets]
red = ["a.jpg", "b.jpg"]
blue = ["c.jpg"]
"##,
        )
        .unwrap();

        let config = ConfiguratorConfig::load(&path).unwrap();
        assert_eq!(config.model, "equinox");
        assert_eq!(config.key_separator, ":");
        assert_eq!(config.axes[0].options[0].swatch.as_deref(), Some("#b3001b"));
        assert_eq!(config.image_set("blue").unwrap(), ["c.jpg".to_string()]);
    }

    #[test]
    fn test_load_json_table() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("onix.json");
        fs::write(
            &path,
            r#"{
                "model": "Onix",
                "axes": [{"id": "exterior_color", "label": "Cor", "options": [{"id": "red", "label": "Vermelho"}]}],
                "imageSets": {"red": ["a.jpg"]}
            }"#,
        )
        .unwrap();

        let config = ConfiguratorConfig::load(&path).unwrap();
        assert_eq!(config.model, "Onix");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_rejects_malformed_table() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.toml");
        fs::write(&path, "axes = 3").unwrap();

        let err = ConfiguratorConfig::load(&path).unwrap_err();
        assert!(matches!(err, ShowroomError::ConfigParse { .. }));
    }
}
