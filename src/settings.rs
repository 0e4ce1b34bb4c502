//! Frontend settings: key bindings and colors
//!
//! Read-only. The web page may embed a JSON block to override the defaults;
//! nothing is ever written back.

use serde::{Deserialize, Serialize};

/// Keyboard bindings, as `KeyboardEvent.code` values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left_up: String,
    pub left_down: String,
    pub right_up: String,
    pub right_down: String,
    pub restart: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_up: "KeyW".into(),
            left_down: "KeyS".into(),
            right_up: "ArrowUp".into(),
            right_down: "ArrowDown".into(),
            restart: "KeyR".into(),
        }
    }
}

/// A bound action for a key code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    Restart,
}

impl KeyBindings {
    /// Look up the action bound to `code`, if any
    pub fn action_for(&self, code: &str) -> Option<KeyAction> {
        [
            (&self.left_up, KeyAction::LeftUp),
            (&self.left_down, KeyAction::LeftDown),
            (&self.right_up, KeyAction::RightUp),
            (&self.right_down, KeyAction::RightDown),
            (&self.restart, KeyAction::Restart),
        ]
        .into_iter()
        .find(|(bound, _)| bound.as_str() == code)
        .map(|(_, action)| action)
    }
}

/// RGBA colors (linear, 0.0 - 1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: [f32; 4],
    pub paddle: [f32; 4],
    pub ball: [f32; 4],
    pub net: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0, 1.0],
            paddle: [1.0, 1.0, 1.0, 1.0],
            ball: [1.0, 1.0, 1.0, 1.0],
            net: [1.0, 1.0, 1.0, 0.25],
        }
    }
}

/// Frontend settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keys: KeyBindings,
    pub palette: Palette,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Settings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// DOM id of the optional inline settings block
    pub const ELEMENT_ID: &'static str = "pong-settings";

    /// Load settings from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for("KeyW"), Some(KeyAction::LeftUp));
        assert_eq!(keys.action_for("KeyS"), Some(KeyAction::LeftDown));
        assert_eq!(keys.action_for("ArrowUp"), Some(KeyAction::RightUp));
        assert_eq!(keys.action_for("ArrowDown"), Some(KeyAction::RightDown));
        assert_eq!(keys.action_for("KeyR"), Some(KeyAction::Restart));
        assert_eq!(keys.action_for("Space"), None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{"show_fps": true, "keys": {"left_up": "KeyQ"}}"#).unwrap();
        assert!(settings.show_fps);
        assert_eq!(settings.keys.left_up, "KeyQ");
        assert_eq!(settings.keys.left_down, "KeyS");
        assert_eq!(settings.palette, Palette::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{show_fps: yes").is_err());
        assert!(Settings::from_json(r#"{"show_fps": "yes"}"#).is_err());
    }
}
