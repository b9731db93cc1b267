use serde::Serialize;

use super::table::ConfiguratorConfig;

/// Mutable part of a configurator. Indices point into the owning config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguratorState {
    /// Option index per axis, in axis order
    pub selections: Vec<usize>,
    /// `None` when the model declares no tabs
    pub active_tab: Option<usize>,
    pub carousel_index: usize,
    pub lightbox_open: bool,
}

impl ConfiguratorState {
    /// First option everywhere, first tab, first image, lightbox closed.
    pub fn initial(config: &ConfiguratorConfig) -> Self {
        Self {
            selections: vec![0; config.axes.len()],
            active_tab: if config.tabs.is_empty() { None } else { Some(0) },
            carousel_index: 0,
            lightbox_open: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedOption {
    pub axis: String,
    pub option: String,
    pub label: String,
}

/// What the page shows in the main image slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageView {
    Image { url: String },
    /// Table has no images for this key; render the placeholder.
    Unresolved { key: String },
}

impl ImageView {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Image { url } => Some(url.as_str()),
            Self::Unresolved { .. } => None,
        }
    }
}

/// Everything a page needs to render the configurator.
///
/// `version` grows by one for every operation that changed state, so the
/// page runs its transition once per change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfiguratorSnapshot {
    pub version: u64,
    pub model: String,
    pub selections: Vec<SelectedOption>,
    pub active_tab: Option<String>,
    pub image: ImageView,
    pub position: usize,
    pub length: usize,
    pub lightbox_open: bool,
}
