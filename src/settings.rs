//! Game settings and preferences
//!
//! Read-only configuration handed to the game at startup as JSON (a canvas
//! `data-settings` attribute on web, `MELEE_DUEL_SETTINGS` on native).
//! Nothing is written back.

use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;
use crate::sim::Rules;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay tunables (movement rule, timings, damage)
    pub rules: Rules,
    /// Keyboard layout
    pub bindings: KeyBindings,

    // === Visual Effects ===
    /// Red background flash on attacks and hits
    pub flash_background: bool,
    /// Outline hurtboxes
    pub show_hitboxes: bool,

    // === Accessibility ===
    /// Reduced motion (suppresses flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            bindings: KeyBindings::default(),

            flash_background: true,
            show_hitboxes: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse an optional blob, falling back to defaults on absence or error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings ({:?} movement)", settings.rules.movement);
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Effective background flash (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        self.flash_background && !self.reduced_motion
    }
}
