//! Builtin Category Definitions
//!
//! The dealership's default catalog menu, in display order.
//! Config entries can override or extend it.

use serde::{Deserialize, Serialize};

/// Builtin menu rules. The last entry is the catch-all.
pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        label: "Elétricos",
        keywords: &[
            "elétrico",
            "eletrico",
            "bolt",
            "equinox ev",
            "blazer ev",
            "silverado ev",
            "spark ev",
        ],
    },
    BuiltinCategory {
        label: "SUVs",
        keywords: &["equinox", "tracker", "trailblazer", "blazer", "spin"],
    },
    BuiltinCategory {
        label: "Picapes",
        keywords: &["s10", "montana", "silverado"],
    },
    BuiltinCategory {
        label: "Hatches e Sedans",
        keywords: &["onix", "cruze"],
    },
    BuiltinCategory {
        label: "Esportivos",
        keywords: &["camaro", "corvette"],
    },
    BuiltinCategory {
        label: "Seminovos",
        keywords: &[],
    },
];

/// Static rule compiled into the binary.
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

/// Runtime category rule.
///
/// A vehicle belongs to the rule when any keyword is a substring of its
/// normalized name. A rule without keywords is the catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    /// Keywords are trimmed and lowercased; blank ones are dropped.
    pub fn new<I, S>(label: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            label: label.into(),
            keywords: normalize_keywords(keywords),
        }
    }

    /// Catch-all rule with no keywords.
    pub fn catch_all(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            keywords: Vec::new(),
        }
    }

    pub fn is_catch_all(&self) -> bool {
        self.keywords.is_empty()
    }

    /// `name` must already be normalized.
    pub fn matches(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| name.contains(k.as_str()))
    }
}

impl From<&BuiltinCategory> for CategoryRule {
    fn from(builtin: &BuiltinCategory) -> Self {
        Self::new(builtin.label, builtin.keywords.iter())
    }
}

pub(crate) fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for keyword in keywords {
        let keyword = keyword.as_ref().trim().to_lowercase();
        if !keyword.is_empty() && !out.contains(&keyword) {
            out.push(keyword);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catch_all_is_last() {
        let last = BUILTIN_CATEGORIES.last().unwrap();
        assert_eq!(last.label, "Seminovos");
        assert!(last.keywords.is_empty());
        assert!(BUILTIN_CATEGORIES[..BUILTIN_CATEGORIES.len() - 1]
            .iter()
            .all(|c| !c.keywords.is_empty()));
    }

    #[test]
    fn test_rule_normalizes_keywords() {
        let rule = CategoryRule::new("SUVs", [" Equinox ", "TRACKER", "", "equinox"]);
        assert_eq!(rule.keywords, vec!["equinox", "tracker"]);
        assert!(rule.matches("equinox turbo"));
        assert!(!rule.matches("onix"));
    }

    #[test]
    fn test_blank_keywords_make_catch_all() {
        let rule = CategoryRule::new("Outros", ["  ", ""]);
        assert!(rule.is_catch_all());
        assert!(!rule.matches("anything"));
    }
}
