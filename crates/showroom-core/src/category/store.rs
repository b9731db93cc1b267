//! Category Store
//!
//! Ordered rule list for the catalog menu. Builtins merged with config
//! overrides, validated on every construction.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShowroomError};

use super::builtin::{normalize_keywords, CategoryRule, BUILTIN_CATEGORIES};

/// Validated, ordered category rules
#[derive(Debug, Clone)]
pub struct CategoryStore {
    rules: Vec<CategoryRule>,
}

impl CategoryStore {
    /// Builds a store from rules in priority order.
    ///
    /// Labels must be unique and non-blank. At most one rule may be a
    /// catch-all and it must come last.
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self> {
        validate(&rules)?;
        Ok(Self { rules })
    }

    /// Builtin dealership menu
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_CATEGORIES.iter().map(CategoryRule::from).collect(),
        }
    }

    /// Applies config overrides.
    ///
    /// - existing label: keywords replaced in place
    /// - new label: inserted before the catch-all (appended if there is none)
    pub fn with_config(mut self, entries: &[CategoryConfigEntry]) -> Result<Self> {
        for entry in entries {
            let keywords = normalize_keywords(&entry.keywords);
            if let Some(rule) = self.rules.iter_mut().find(|r| r.label == entry.label) {
                rule.keywords = keywords;
                continue;
            }

            let rule = CategoryRule {
                label: entry.label.clone(),
                keywords,
            };
            match self.rules.iter().position(CategoryRule::is_catch_all) {
                Some(idx) if !rule.is_catch_all() => self.rules.insert(idx, rule),
                _ => self.rules.push(rule),
            }
        }

        validate(&self.rules)?;
        Ok(self)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn get(&self, label: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.label.as_str()).collect()
    }

    pub fn catch_all(&self) -> Option<&CategoryRule> {
        self.rules.last().filter(|r| r.is_catch_all())
    }
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(rules: &[CategoryRule]) -> Result<()> {
    let mut seen = HashSet::new();
    for (idx, rule) in rules.iter().enumerate() {
        if rule.label.trim().is_empty() {
            return Err(ShowroomError::InvalidCategoryRules {
                message: format!("rule #{} has a blank label", idx + 1),
            });
        }
        if !seen.insert(rule.label.as_str()) {
            return Err(ShowroomError::InvalidCategoryRules {
                message: format!("duplicate label '{}'", rule.label),
            });
        }
        if rule.is_catch_all() && idx + 1 != rules.len() {
            return Err(ShowroomError::InvalidCategoryRules {
                message: format!(
                    "catch-all '{}' must be the last rule (found at position {} of {})",
                    rule.label,
                    idx + 1,
                    rules.len()
                ),
            });
        }
    }
    Ok(())
}

/// `[[categories]]` entry in config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfigEntry {
    pub label: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, keywords: &[&str]) -> CategoryConfigEntry {
        CategoryConfigEntry {
            label: label.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_builtin_store() {
        let store = CategoryStore::builtin();
        assert!(store.get("SUVs").is_some());
        assert!(store.get("nonexistent").is_none());
        assert_eq!(store.catch_all().unwrap().label, "Seminovos");
        assert!(validate(store.rules()).is_ok());
    }

    #[test]
    fn test_rejects_catch_all_not_last() {
        let err = CategoryStore::new(vec![
            CategoryRule::catch_all("Outros"),
            CategoryRule::new("SUVs", ["tracker"]),
        ])
        .unwrap_err();
        assert!(matches!(err, ShowroomError::InvalidCategoryRules { .. }));
    }

    #[test]
    fn test_rejects_two_catch_alls() {
        let result = CategoryStore::new(vec![
            CategoryRule::new("SUVs", ["tracker"]),
            CategoryRule::catch_all("Outros"),
            CategoryRule::catch_all("Seminovos"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_duplicate_labels() {
        let result = CategoryStore::new(vec![
            CategoryRule::new("SUVs", ["tracker"]),
            CategoryRule::new("SUVs", ["equinox"]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_store_without_catch_all() {
        let store = CategoryStore::new(vec![CategoryRule::new("SUVs", ["tracker"])]).unwrap();
        assert!(store.catch_all().is_none());
    }

    #[test]
    fn test_override_replaces_keywords_in_place() {
        let store = CategoryStore::builtin()
            .with_config(&[entry("SUVs", &["Tracker", "Trailblazer"])])
            .unwrap();
        let suvs = store.get("SUVs").unwrap();
        assert_eq!(suvs.keywords, vec!["tracker", "trailblazer"]);
        assert_eq!(store.labels()[1], "SUVs");
    }

    #[test]
    fn test_new_rule_goes_before_catch_all() {
        let store = CategoryStore::builtin()
            .with_config(&[entry("Vans", &["spin"])])
            .unwrap();
        let labels = store.labels();
        assert_eq!(labels[labels.len() - 2], "Vans");
        assert_eq!(labels[labels.len() - 1], "Seminovos");
    }

    #[test]
    fn test_second_catch_all_from_config_is_rejected() {
        let result = CategoryStore::builtin().with_config(&[entry("Outros", &[])]);
        assert!(result.is_err());
    }
}
