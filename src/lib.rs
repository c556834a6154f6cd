//! Melee Duel - A two-player, same-keyboard, turn-based melee duel
//!
//! Core modules:
//! - `sim`: Combat/turn state machine (attack windows, hit boxes, turns)
//! - `input`: Keyboard event accumulation into per-tick control snapshots
//! - `ui`: Platform-neutral HUD layout (health bars, turn text, win banner)
//! - `renderer`: Canvas 2D drawing (wasm only)
//! - `settings`: Gameplay rules and presentation preferences

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use input::{Control, InputState, KeyBindings};
pub use settings::Settings;
pub use sim::{CombatState, RenderState, Rules, TickInput};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fighter hurtbox edge length (square)
    pub const FIGHTER_SIZE: f32 = 50.0;

    /// Attack box extends this far past the attacker's leading edge
    pub const ATTACK_BOX_WIDTH: f32 = 30.0;
    pub const ATTACK_BOX_HEIGHT: f32 = FIGHTER_SIZE;

    /// Movement per axis per tick
    pub const MOVE_SPEED: f32 = 3.0;

    /// Attack window, armed on a fresh press (ms)
    pub const ATTACK_DURATION_MS: f64 = 120.0;
    /// Background flash after a landed hit (ms)
    pub const HIT_FLASH_MS: f64 = 80.0;

    pub const ATTACK_DAMAGE: u32 = 10;
    pub const MAX_HP: u32 = 100;

    /// Full-health bar width in pixels
    pub const HEALTH_BAR_WIDTH: f32 = 200.0;
    pub const HEALTH_BAR_HEIGHT: f32 = 20.0;

    /// Spawn points for fighters 0 and 1
    pub const SPAWN_POSITIONS: [Vec2; 2] = [Vec2::new(100.0, 100.0), Vec2::new(500.0, 500.0)];
}
