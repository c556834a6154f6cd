//! Combat simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in only as the `now` argument
//! - Input comes in only as a `TickInput` snapshot
//! - No rendering or platform dependencies

pub mod hitbox;
pub mod state;
pub mod tick;

pub use hitbox::HitBox;
pub use state::{
    AttackWindow, CombatState, Facing, Fighter, MovementRule, Player, Rules, TurnState,
};
pub use tick::{CombatEvent, MoveInput, RenderState, TickInput};
