use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShowroomError {
    #[error("Invalid selection: option '{option}' is not offered on axis '{axis}'")]
    InvalidSelection { axis: String, option: String },

    #[error("Unknown variant axis: {axis}")]
    UnknownAxis { axis: String },

    #[error("Unknown view tab: {tab}")]
    UnknownTab { tab: String },

    #[error("Carousel index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No image set configured for key '{key}'")]
    UnresolvedImageKey { key: String },

    #[error("Invalid category rules: {message}")]
    InvalidCategoryRules { message: String },

    #[error("Invalid configurator table: {message}")]
    InvalidConfigurator { message: String },

    #[error("Failed to parse {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Config key not found: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Model configuration not found: {name}")]
    ModelNotFound { name: String },

    #[error("Vehicle catalog not found: {path}")]
    CatalogNotFound { path: PathBuf },

    #[error("Unrecognized configurator event: '{input}'")]
    InvalidEvent { input: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ShowroomError>;

impl ShowroomError {
    /// True for rejections of user-driven input that leave the engine untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidSelection { .. }
                | Self::UnknownAxis { .. }
                | Self::UnknownTab { .. }
                | Self::IndexOutOfRange { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ModelNotFound { .. } | Self::CatalogNotFound { .. } => 2,
            Self::UnresolvedImageKey { .. } | Self::InvalidConfigurator { .. } => 3,
            Self::InvalidCategoryRules { .. } => 4,
            Self::InvalidSelection { .. }
            | Self::UnknownAxis { .. }
            | Self::UnknownTab { .. }
            | Self::IndexOutOfRange { .. }
            | Self::InvalidEvent { .. } => 5,
            Self::ConfigParse { .. } | Self::ConfigKeyNotFound { .. } => 6,
            _ => 1,
        }
    }
}
