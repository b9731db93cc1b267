//! Configurator Events
//!
//! Interaction events the page forwards to the engine, plus a small text
//! form (`select exterior_color=blue`, `tab interior`, `next`, `jump 2`) used
//! by scripted replays.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShowroomError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfiguratorEvent {
    Select { axis: String, option: String },
    Tab { tab: String },
    Advance { direction: Direction },
    Jump { index: usize },
    OpenLightbox,
    CloseLightbox,
}

impl FromStr for ConfiguratorEvent {
    type Err = ShowroomError;

    fn from_str(input: &str) -> Result<Self> {
        let invalid = || ShowroomError::InvalidEvent {
            input: input.trim().to_string(),
        };

        let mut words = input.split_whitespace();
        let verb = words.next().ok_or_else(invalid)?.to_lowercase();
        let args: Vec<&str> = words.collect();

        let event = match (verb.as_str(), args.as_slice()) {
            ("select", [pair]) => {
                let (axis, option) = pair.split_once('=').ok_or_else(invalid)?;
                if axis.is_empty() || option.is_empty() {
                    return Err(invalid());
                }
                Self::Select {
                    axis: axis.to_string(),
                    option: option.to_string(),
                }
            }
            ("select", [axis, option]) => Self::Select {
                axis: axis.to_string(),
                option: option.to_string(),
            },
            ("tab", [tab]) => Self::Tab {
                tab: tab.to_string(),
            },
            ("next", []) => Self::Advance {
                direction: Direction::Next,
            },
            ("prev" | "previous", []) => Self::Advance {
                direction: Direction::Prev,
            },
            ("jump", [index]) => Self::Jump {
                index: index.parse().map_err(|_| invalid())?,
            },
            ("open", []) => Self::OpenLightbox,
            ("close", []) => Self::CloseLightbox,
            _ => return Err(invalid()),
        };
        Ok(event)
    }
}

impl fmt::Display for ConfiguratorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select { axis, option } => write!(f, "select {}={}", axis, option),
            Self::Tab { tab } => write!(f, "tab {}", tab),
            Self::Advance {
                direction: Direction::Next,
            } => write!(f, "next"),
            Self::Advance {
                direction: Direction::Prev,
            } => write!(f, "prev"),
            Self::Jump { index } => write!(f, "jump {}", index),
            Self::OpenLightbox => write!(f, "open"),
            Self::CloseLightbox => write!(f, "close"),
        }
    }
}

/// Parses a script of events separated by `,`, `;` or newlines.
pub fn parse_script(script: &str) -> Result<Vec<ConfiguratorEvent>> {
    script
        .split([',', ';', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.starts_with('#'))
        .map(str::parse::<ConfiguratorEvent>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_verb() {
        assert_eq!(
            "select exterior_color=blue".parse::<ConfiguratorEvent>().unwrap(),
            ConfiguratorEvent::Select {
                axis: "exterior_color".to_string(),
                option: "blue".to_string()
            }
        );
        assert_eq!(
            "select trim rs".parse::<ConfiguratorEvent>().unwrap(),
            ConfiguratorEvent::Select {
                axis: "trim".to_string(),
                option: "rs".to_string()
            }
        );
        assert_eq!(
            "TAB interior".parse::<ConfiguratorEvent>().unwrap(),
            ConfiguratorEvent::Tab {
                tab: "interior".to_string()
            }
        );
        assert_eq!(
            "jump 2".parse::<ConfiguratorEvent>().unwrap(),
            ConfiguratorEvent::Jump { index: 2 }
        );
        assert_eq!(
            "previous".parse::<ConfiguratorEvent>().unwrap(),
            ConfiguratorEvent::Advance {
                direction: Direction::Prev
            }
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "select", "select =blue", "jump -1", "next 2", "spin"] {
            let err = input.parse::<ConfiguratorEvent>().unwrap_err();
            assert!(
                matches!(err, ShowroomError::InvalidEvent { .. }),
                "expected InvalidEvent for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_script_and_display() {
        let events = parse_script("next, next; select exterior_color=blue\n# comment\nopen").unwrap();
        let rendered: Vec<String> = events.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["next", "next", "select exterior_color=blue", "open"]
        );
    }
}
