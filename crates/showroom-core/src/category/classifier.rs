//! Category Classifier
//!
//! Buckets catalog vehicles into menu categories. First matching rule wins.

use serde::Serialize;

use crate::vehicle::VehicleRecord;

use super::builtin::CategoryRule;
use super::store::CategoryStore;

/// One menu section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuCategory {
    pub label: String,
    pub vehicles: Vec<VehicleRecord>,
}

/// Classification result. Rebuilt from scratch on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorizedMenu {
    /// Sections in rule order
    pub categories: Vec<MenuCategory>,
    /// Ids of vehicles no rule claimed (only without a catch-all)
    pub unmatched: Vec<String>,
}

impl CategorizedMenu {
    pub fn get(&self, label: &str) -> Option<&[VehicleRecord]> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.vehicles.as_slice())
    }

    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }

    /// Number of vehicles placed in any section
    pub fn total(&self) -> usize {
        self.categories.iter().map(|c| c.vehicles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Sections that actually have vehicles
    pub fn non_empty(&self) -> impl Iterator<Item = &MenuCategory> {
        self.categories.iter().filter(|c| !c.vehicles.is_empty())
    }
}

/// Partitions `vehicles` by `rules`.
///
/// Each vehicle goes to the first keyworded rule matching its normalized
/// name, else to the catch-all if one exists, else nowhere. Vehicles without
/// a usable name only ever reach the catch-all. Input order is kept within
/// each section.
pub fn classify(rules: &[CategoryRule], vehicles: &[VehicleRecord]) -> CategorizedMenu {
    let mut categories: Vec<MenuCategory> = rules
        .iter()
        .map(|r| MenuCategory {
            label: r.label.clone(),
            vehicles: Vec::new(),
        })
        .collect();
    let catch_all = rules.iter().position(CategoryRule::is_catch_all);
    let mut unmatched = Vec::new();

    for vehicle in vehicles {
        let claimed = vehicle.normalized_name().and_then(|name| {
            rules
                .iter()
                .position(|r| !r.is_catch_all() && r.matches(&name))
        });

        match claimed.or(catch_all) {
            Some(idx) => categories[idx].vehicles.push(vehicle.clone()),
            None => unmatched.push(vehicle.id.clone()),
        }
    }

    if !unmatched.is_empty() {
        tracing::debug!(count = unmatched.len(), ids = ?unmatched, "vehicles left out of the menu");
    }

    CategorizedMenu {
        categories,
        unmatched,
    }
}

/// Classifier bound to a category store
#[derive(Debug, Clone, Default)]
pub struct CategoryClassifier {
    store: CategoryStore,
}

impl CategoryClassifier {
    pub fn new(store: CategoryStore) -> Self {
        Self { store }
    }

    pub fn builtin() -> Self {
        Self::new(CategoryStore::builtin())
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    pub fn classify(&self, vehicles: &[VehicleRecord]) -> CategorizedMenu {
        classify(self.store.rules(), vehicles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicles(names: &[&str]) -> Vec<VehicleRecord> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| VehicleRecord::new(format!("v{}", i), *name))
            .collect()
    }

    fn names_in<'a>(menu: &'a CategorizedMenu, label: &str) -> Vec<&'a str> {
        menu.get(label)
            .unwrap_or_default()
            .iter()
            .map(|v| v.label())
            .collect()
    }

    fn dealership_rules() -> Vec<CategoryRule> {
        vec![
            CategoryRule::new("Elétricos", ["ev", "eletrico"]),
            CategoryRule::new("SUVs", ["equinox", "tracker"]),
            CategoryRule::catch_all("Seminovos"),
        ]
    }

    #[test]
    fn test_first_match_wins() {
        let menu = classify(
            &dealership_rules(),
            &vehicles(&["Equinox EV", "Equinox Turbo", "Onix 2020"]),
        );

        assert_eq!(menu.labels(), vec!["Elétricos", "SUVs", "Seminovos"]);
        assert_eq!(names_in(&menu, "Elétricos"), vec!["Equinox EV"]);
        assert_eq!(names_in(&menu, "SUVs"), vec!["Equinox Turbo"]);
        assert_eq!(names_in(&menu, "Seminovos"), vec!["Onix 2020"]);
        assert!(menu.unmatched.is_empty());
    }

    #[test]
    fn test_rule_order_decides_ties() {
        let cars = vehicles(&["Equinox EV"]);
        let suv_first = vec![
            CategoryRule::new("SUVs", ["equinox"]),
            CategoryRule::new("Eletricos", ["ev"]),
        ];
        let menu = classify(&suv_first, &cars);
        assert_eq!(names_in(&menu, "SUVs"), vec!["Equinox EV"]);
        assert!(names_in(&menu, "Eletricos").is_empty());

        let ev_first: Vec<_> = suv_first.into_iter().rev().collect();
        let menu = classify(&ev_first, &cars);
        assert_eq!(names_in(&menu, "Eletricos"), vec!["Equinox EV"]);
        assert!(names_in(&menu, "SUVs").is_empty());
    }

    #[test]
    fn test_unmatched_dropped_without_catch_all() {
        let rules = vec![CategoryRule::new("SUVs", ["tracker"])];
        let menu = classify(&rules, &vehicles(&["Tracker RS", "Onix"]));
        assert_eq!(names_in(&menu, "SUVs"), vec!["Tracker RS"]);
        assert_eq!(menu.total(), 1);
        assert_eq!(menu.unmatched, vec!["v1"]);
    }

    #[test]
    fn test_missing_name_goes_to_catch_all_only() {
        let mut cars = vehicles(&["Tracker"]);
        cars.push(VehicleRecord {
            id: "nameless".to_string(),
            display_name: None,
            price_cents: None,
            thumbnail_url: None,
            slug: None,
        });

        let menu = classify(&dealership_rules(), &cars);
        let seminovos: Vec<_> = menu
            .get("Seminovos")
            .unwrap()
            .iter()
            .map(|v| v.id.as_str())
            .collect();
        assert_eq!(seminovos, vec!["nameless"]);

        let without_catch_all = &dealership_rules()[..2];
        let menu = classify(without_catch_all, &cars);
        assert_eq!(menu.unmatched, vec!["nameless"]);
    }

    #[test]
    fn test_name_is_trimmed_and_case_folded() {
        let menu = classify(&dealership_rules(), &vehicles(&["  TRACKER Premier  "]));
        assert_eq!(menu.get("SUVs").unwrap().len(), 1);
    }

    #[test]
    fn test_empty_catalog_yields_empty_sections() {
        let menu = classify(&dealership_rules(), &[]);
        assert_eq!(menu.categories.len(), 3);
        assert!(menu.is_empty());
        assert_eq!(menu.non_empty().count(), 0);
    }

    #[test]
    fn test_stable_order_within_section() {
        let menu = classify(
            &dealership_rules(),
            &vehicles(&["Tracker LT", "Onix", "Equinox", "Tracker RS"]),
        );
        assert_eq!(
            names_in(&menu, "SUVs"),
            vec!["Tracker LT", "Equinox", "Tracker RS"]
        );
    }

    #[test]
    fn test_builtin_classifier() {
        let classifier = CategoryClassifier::builtin();
        let menu = classifier.classify(&vehicles(&[
            "Bolt EUV",
            "S10 High Country",
            "Onix Plus",
            "Camaro SS",
            "Agile 2012",
        ]));
        assert_eq!(names_in(&menu, "Elétricos"), vec!["Bolt EUV"]);
        assert_eq!(names_in(&menu, "Picapes"), vec!["S10 High Country"]);
        assert_eq!(names_in(&menu, "Hatches e Sedans"), vec!["Onix Plus"]);
        assert_eq!(names_in(&menu, "Esportivos"), vec!["Camaro SS"]);
        assert_eq!(names_in(&menu, "Seminovos"), vec!["Agile 2012"]);
    }
}
