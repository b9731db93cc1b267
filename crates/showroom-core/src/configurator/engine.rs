//! Configurator Engine
//!
//! Synchronous state machine behind the model page's color/trim picker,
//! image carousel and lightbox. Every mutation either applies completely or is
//! rejected with the state untouched.

use crate::error::{Result, ShowroomError};

use super::event::{ConfiguratorEvent, Direction};
use super::state::{ConfiguratorSnapshot, ConfiguratorState, ImageView, SelectedOption};
use super::table::ConfiguratorConfig;

#[derive(Debug, Clone)]
pub struct ConfiguratorEngine {
    config: ConfiguratorConfig,
    state: ConfiguratorState,
    version: u64,
}

impl ConfiguratorEngine {
    /// Refuses tables that break the structural invariants.
    pub fn new(config: ConfiguratorConfig) -> Result<Self> {
        config.check_structure()?;
        let state = ConfiguratorState::initial(&config);
        Ok(Self {
            config,
            state,
            version: 0,
        })
    }

    pub fn config(&self) -> &ConfiguratorConfig {
        &self.config
    }

    pub fn state(&self) -> &ConfiguratorState {
        &self.state
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Selects `option_id` on `axis` and rewinds the carousel.
    pub fn select_option(&mut self, axis: &str, option_id: &str) -> Result<()> {
        let Some(axis_idx) = self.config.axis_index(axis) else {
            return self.reject(ShowroomError::UnknownAxis {
                axis: axis.to_string(),
            });
        };
        let Some(option_idx) = self.config.axes[axis_idx].option_index(option_id) else {
            return self.reject(ShowroomError::InvalidSelection {
                axis: axis.to_string(),
                option: option_id.to_string(),
            });
        };

        let mut next = self.state.clone();
        next.selections[axis_idx] = option_idx;
        next.carousel_index = 0;
        self.commit(next);
        Ok(())
    }

    /// Switches the image family and rewinds the carousel.
    pub fn set_active_tab(&mut self, tab: &str) -> Result<()> {
        let Some(tab_idx) = self.config.tab_index(tab) else {
            return self.reject(ShowroomError::UnknownTab {
                tab: tab.to_string(),
            });
        };

        let mut next = self.state.clone();
        next.active_tab = Some(tab_idx);
        next.carousel_index = 0;
        self.commit(next);
        Ok(())
    }

    /// Cyclic step through the current sequence. No-op below two images.
    pub fn advance(&mut self, direction: Direction) {
        let len = self.current_len();
        if len <= 1 {
            return;
        }

        let index = self.state.carousel_index % len;
        let mut next = self.state.clone();
        next.carousel_index = match direction {
            Direction::Next => (index + 1) % len,
            Direction::Prev => (index + len - 1) % len,
        };
        self.commit(next);
    }

    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        let len = self.current_len();
        if index >= len {
            return self.reject(ShowroomError::IndexOutOfRange { index, len });
        }

        let mut next = self.state.clone();
        next.carousel_index = index;
        self.commit(next);
        Ok(())
    }

    pub fn open_lightbox(&mut self) {
        self.set_lightbox(true);
    }

    pub fn close_lightbox(&mut self) {
        self.set_lightbox(false);
    }

    fn set_lightbox(&mut self, open: bool) {
        let mut next = self.state.clone();
        next.lightbox_open = open;
        self.commit(next);
    }

    /// Back to the initial state of the current model.
    pub fn reset(&mut self) {
        let initial = ConfiguratorState::initial(&self.config);
        self.commit(initial);
    }

    /// Swaps in another model's table and starts over.
    pub fn load_model(&mut self, config: ConfiguratorConfig) -> Result<()> {
        config.check_structure()?;
        self.state = ConfiguratorState::initial(&config);
        self.config = config;
        self.version += 1;
        tracing::debug!(model = %self.config.model, "configurator model loaded");
        Ok(())
    }

    pub fn apply(&mut self, event: &ConfiguratorEvent) -> Result<()> {
        match event {
            ConfiguratorEvent::Select { axis, option } => self.select_option(axis, option),
            ConfiguratorEvent::Tab { tab } => self.set_active_tab(tab),
            ConfiguratorEvent::Advance { direction } => {
                self.advance(*direction);
                Ok(())
            }
            ConfiguratorEvent::Jump { index } => self.jump_to(*index),
            ConfiguratorEvent::OpenLightbox => {
                self.open_lightbox();
                Ok(())
            }
            ConfiguratorEvent::CloseLightbox => {
                self.close_lightbox();
                Ok(())
            }
        }
    }

    /// Lookup key for the current selections and tab.
    pub fn current_key(&self) -> String {
        self.config
            .composite_key(&self.state.selections, self.state.active_tab)
    }

    /// Whole image sequence for the current key.
    pub fn current_images(&self) -> Result<&[String]> {
        self.lookup_images().ok_or_else(|| {
            let key = self.current_key();
            tracing::warn!(
                model = %self.config.model,
                key = %key,
                "configurator table has no images for key"
            );
            ShowroomError::UnresolvedImageKey { key }
        })
    }

    /// Image at the carousel position.
    pub fn resolve_current_image(&self) -> Result<&str> {
        let images = self.current_images()?;
        images
            .get(self.state.carousel_index)
            .map(String::as_str)
            .ok_or(ShowroomError::IndexOutOfRange {
                index: self.state.carousel_index,
                len: images.len(),
            })
    }

    pub fn snapshot(&self) -> ConfiguratorSnapshot {
        let selections = self
            .config
            .axes
            .iter()
            .zip(&self.state.selections)
            .map(|(axis, &idx)| {
                let option = &axis.options[idx];
                SelectedOption {
                    axis: axis.id.clone(),
                    option: option.id.clone(),
                    label: option.label.clone(),
                }
            })
            .collect();

        // no warning here; resolve_current_image reports unresolved keys
        let image = match self
            .lookup_images()
            .and_then(|images| images.get(self.state.carousel_index))
        {
            Some(url) => ImageView::Image { url: url.clone() },
            None => ImageView::Unresolved {
                key: self.current_key(),
            },
        };

        ConfiguratorSnapshot {
            version: self.version,
            model: self.config.model.clone(),
            selections,
            active_tab: self
                .state
                .active_tab
                .and_then(|t| self.config.tabs.get(t))
                .map(|t| t.id.clone()),
            image,
            position: self.state.carousel_index,
            length: self.current_len(),
            lightbox_open: self.state.lightbox_open,
        }
    }

    fn lookup_images(&self) -> Option<&[String]> {
        self.config
            .image_set(&self.current_key())
            .filter(|images| !images.is_empty())
    }

    fn current_len(&self) -> usize {
        self.config
            .image_set(&self.current_key())
            .map_or(0, <[String]>::len)
    }

    /// Stores `next`; the version moves only when something changed.
    fn commit(&mut self, next: ConfiguratorState) -> bool {
        if next == self.state {
            return false;
        }
        self.state = next;
        self.version += 1;
        true
    }

    fn reject(&self, err: ShowroomError) -> Result<()> {
        tracing::debug!(model = %self.config.model, error = %err, "configurator input rejected");
        Err(err)
    }
}
