//! # Configurator Module
//!
//! Drives the model page's variant picker: selected option per axis, active
//! view tab, carousel position and lightbox. Images come from a static
//! per-model table keyed by the current selections.
//!
//! ## Modules
//!
//! - `table`: model table format, composite keys, coverage check
//! - `state`: engine state and render snapshot
//! - `event`: interaction events and their text form
//! - `engine`: the state machine
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use showroom_core::configurator::{
//!     ConfiguratorConfig, ConfiguratorEngine, Direction, VariantAxis, VariantOption,
//! };
//!
//! let option = |id: &str| VariantOption { id: id.into(), label: id.into(), swatch: None };
//! let config = ConfiguratorConfig {
//!     model: "Equinox".into(),
//!     axes: vec![VariantAxis {
//!         id: "exterior_color".into(),
//!         label: "Cor".into(),
//!         options: vec![option("red"), option("blue")],
//!     }],
//!     tabs: Vec::new(),
//!     key_separator: ":".into(),
//!     image_sets: BTreeMap::from([
//!         ("red".to_string(), vec!["a.jpg".to_string(), "b.jpg".to_string()]),
//!         ("blue".to_string(), vec!["c.jpg".to_string()]),
//!     ]),
//! };
//!
//! let mut engine = ConfiguratorEngine::new(config).unwrap();
//! engine.advance(Direction::Next);
//! assert_eq!(engine.resolve_current_image().unwrap(), "b.jpg");
//!
//! engine.select_option("exterior_color", "blue").unwrap();
//! assert_eq!(engine.resolve_current_image().unwrap(), "c.jpg");
//! ```

mod engine;
mod event;
mod state;
mod table;

pub use engine::ConfiguratorEngine;
pub use event::{parse_script, ConfiguratorEvent, Direction};
pub use state::{ConfiguratorSnapshot, ConfiguratorState, ImageView, SelectedOption};
pub use table::{
    ConfiguratorConfig, ValidationReport, VariantAxis, VariantOption, ViewTab,
    DEFAULT_KEY_SEPARATOR,
};
