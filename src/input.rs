//! Keyboard input accumulation
//!
//! Raw key-down/key-up events are folded into a set of held controls, which
//! the driver samples once per frame into a `TickInput`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::sim::{MoveInput, TickInput};

/// Logical controls the combat step understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    MoveLeft1,
    MoveRight1,
    MoveUp1,
    MoveDown1,
    MoveLeft2,
    MoveRight2,
    MoveUp2,
    MoveDown2,
    Attack,
    Reset,
}

/// Maps `KeyboardEvent.key` values to controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys")]
    pub keys: HashMap<String, Control>,
}

/// Configured keys are normalized the same way lookups are
fn deserialize_keys<'de, D>(deserializer: D) -> Result<HashMap<String, Control>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, Control>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, c)| (normalize_key(&k), c)).collect())
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Control::*;
        let keys = [
            ("a", MoveLeft1),
            ("d", MoveRight1),
            ("w", MoveUp1),
            ("s", MoveDown1),
            ("ArrowLeft", MoveLeft2),
            ("ArrowRight", MoveRight2),
            ("ArrowUp", MoveUp2),
            ("ArrowDown", MoveDown2),
            ("f", Attack),
            ("r", Reset),
        ]
        .into_iter()
        .map(|(k, c)| (normalize_key(k), c))
        .collect();
        Self { keys }
    }
}

impl KeyBindings {
    pub fn control_for(&self, key: &str) -> Option<Control> {
        self.keys.get(&normalize_key(key)).copied()
    }

    /// Rebind a key, replacing whatever it was bound to
    pub fn bind(&mut self, key: &str, control: Control) {
        self.keys.insert(normalize_key(key), control);
    }
}

/// Single characters compare case-insensitively (Shift / Caps Lock)
fn normalize_key(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

/// Controls currently held down
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    /// Physical keys holding each control; a control stays held until all are released
    held: HashMap<Control, HashSet<String>>,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashMap::new(),
        }
    }

    /// Returns true if the key is bound (so the driver can suppress browser scrolling)
    pub fn key_down(&mut self, key: &str) -> bool {
        match self.bindings.control_for(key) {
            Some(control) => {
                self.held.entry(control).or_default().insert(normalize_key(key));
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match self.bindings.control_for(key) {
            Some(control) => {
                if let Some(keys) = self.held.get_mut(&control) {
                    keys.remove(&normalize_key(key));
                    if keys.is_empty() {
                        self.held.remove(&control);
                    }
                }
                true
            }
            None => false,
        }
    }

    /// Drop everything (window lost focus; key-ups will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains_key(&control)
    }

    /// Sample the held controls for this tick
    pub fn snapshot(&self) -> TickInput {
        use Control::*;
        let moves = |left, right, up, down| MoveInput {
            left: self.is_held(left),
            right: self.is_held(right),
            up: self.is_held(up),
            down: self.is_held(down),
        };
        TickInput {
            moves: [
                moves(MoveLeft1, MoveRight1, MoveUp1, MoveDown1),
                moves(MoveLeft2, MoveRight2, MoveUp2, MoveDown2),
            ],
            attack: self.is_held(Attack),
            reset: self.is_held(Reset),
        }
    }
}
