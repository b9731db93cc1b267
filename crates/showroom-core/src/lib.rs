pub mod category;
pub mod config;
pub mod configurator;
pub mod error;
pub mod vehicle;

pub use config::Config;
pub use error::{Result, ShowroomError};

// Catalog menu
pub use category::{
    classify, BuiltinCategory, CategorizedMenu, CategoryClassifier, CategoryConfigEntry,
    CategoryRule, CategoryStore, MenuCategory, BUILTIN_CATEGORIES,
};

// Configurator
pub use configurator::{
    parse_script, ConfiguratorConfig, ConfiguratorEngine, ConfiguratorEvent,
    ConfiguratorSnapshot, ConfiguratorState, Direction, ImageView, SelectedOption,
    ValidationReport, VariantAxis, VariantOption, ViewTab,
};

pub use vehicle::{
    fetch_snapshot, CatalogSnapshot, InMemoryRepository, JsonCatalog, VehicleFilter,
    VehicleRecord, VehicleRepository,
};
