//! # Category Module
//!
//! Groups the vehicle catalog into the fixed marketing sections shown in the
//! site menu.
//!
//! ## Rules
//!
//! A rule is a label plus lowercase keywords. Rules are checked in order and
//! the first one with a keyword contained in the vehicle's normalized name
//! claims the vehicle. A rule without keywords is the catch-all; it must be
//! last and there can be only one.
//!
//! - **Elétricos**: bolt, equinox ev, blazer ev, ...
//! - **SUVs**: equinox, tracker, trailblazer, ...
//! - **Seminovos**: everything else
//!
//! ## Modules
//!
//! - `builtin`: builtin rule table and the runtime rule type
//! - `store`: validated rule list with config overrides
//! - `classifier`: the partitioning itself
//!
//! ## Example
//!
//! ```rust
//! use showroom_core::category::{CategoryClassifier, CategoryStore};
//! use showroom_core::vehicle::VehicleRecord;
//!
//! let classifier = CategoryClassifier::new(CategoryStore::builtin());
//! let menu = classifier.classify(&[
//!     VehicleRecord::new("1", "Tracker Premier"),
//!     VehicleRecord::new("2", "Agile 2012"),
//! ]);
//!
//! assert_eq!(menu.get("SUVs").unwrap().len(), 1);
//! assert_eq!(menu.get("Seminovos").unwrap().len(), 1);
//! ```

mod builtin;
mod classifier;
mod store;

pub use builtin::{BuiltinCategory, CategoryRule, BUILTIN_CATEGORIES};
pub use classifier::{classify, CategorizedMenu, CategoryClassifier, MenuCategory};
pub use store::{CategoryConfigEntry, CategoryStore};
