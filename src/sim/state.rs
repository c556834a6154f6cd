//! Combat state and core simulation types
//!
//! Everything `advance` mutates lives in `CombatState`; there are no
//! free-floating globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hitbox::HitBox;
use crate::consts::*;

/// One of the two fighters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[default]
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    /// 0-based index into `CombatState::fighters`
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1-based number shown to players
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Horizontal facing, set by the last left/right move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    pub fn sign(self) -> i8 {
        match self {
            Facing::Left => -1,
            Facing::Right => 1,
        }
    }
}

/// A fighter entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    /// Top-left corner of the hurtbox
    pub pos: Vec2,
    pub facing: Facing,
    pub hp: u32,
    pub max_hp: u32,
}

impl Fighter {
    pub fn new(pos: Vec2, facing: Facing, max_hp: u32) -> Self {
        Self {
            pos,
            facing,
            hp: max_hp,
            max_hp,
        }
    }

    pub fn hurtbox(&self) -> HitBox {
        HitBox::hurtbox(self.pos)
    }

    pub fn attack_box(&self) -> HitBox {
        HitBox::attack(self.pos, self.facing)
    }

    /// Subtract damage, flooring HP at 0. Returns true if this knocked the fighter out.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.hp == 0
    }

    /// Remaining HP as a 0-1 fraction
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }
}

/// Whose turn it is, and who (if anyone) has won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub active: Player,
    pub winner: Option<Player>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            active: Player::One,
            winner: None,
        }
    }
}

/// Timed attack window armed by a fresh attack press
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackWindow {
    /// Attack is live while `now < until` (ms)
    pub until: f64,
    /// Set once this activation has landed; blocks further hits
    pub has_hit: bool,
    /// Attack control state on the previous tick (edge detection)
    pub prev_pressed: bool,
    /// Who armed this window; the turn may pass before it expires
    pub attacker: Player,
}

impl AttackWindow {
    /// Start a new window. Clears `has_hit` so the activation may land once.
    pub fn arm(&mut self, now: f64, duration_ms: f64, attacker: Player) {
        self.until = now + duration_ms;
        self.has_hit = false;
        self.attacker = attacker;
    }

    #[inline]
    pub fn is_active(&self, now: f64) -> bool {
        now < self.until
    }

    /// Live and still allowed to score
    #[inline]
    pub fn can_hit(&self, now: f64) -> bool {
        self.is_active(now) && !self.has_hit
    }
}

/// Who may move on a given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementRule {
    /// Only the fighter holding the turn may move
    #[default]
    TurnRestricted,
    /// Both fighters move at all times
    Free,
}

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub movement: MovementRule,
    /// Units per axis per tick
    pub speed: f32,
    pub attack_duration_ms: f64,
    pub hit_flash_ms: f64,
    pub attack_damage: u32,
    pub max_hp: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            movement: MovementRule::TurnRestricted,
            speed: MOVE_SPEED,
            attack_duration_ms: ATTACK_DURATION_MS,
            hit_flash_ms: HIT_FLASH_MS,
            attack_damage: ATTACK_DAMAGE,
            max_hp: MAX_HP,
        }
    }
}

/// Complete combat state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub fighters: [Fighter; 2],
    pub turn: TurnState,
    pub attack: AttackWindow,
    /// Background flash is shown while `now < flash_until` (ms)
    pub flash_until: f64,
    pub rules: Rules,
}

impl Default for CombatState {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

impl CombatState {
    /// Create a fresh duel with canonical spawn points
    pub fn new(rules: Rules) -> Self {
        let max_hp = rules.max_hp;
        Self {
            fighters: [
                Fighter::new(SPAWN_POSITIONS[0], Facing::Right, max_hp),
                Fighter::new(SPAWN_POSITIONS[1], Facing::Left, max_hp),
            ],
            turn: TurnState::default(),
            attack: AttackWindow::default(),
            flash_until: 0.0,
            rules,
        }
    }

    /// Reinitialize every field to its default, keeping the rules
    pub fn reset(&mut self) {
        let rules = self.rules.clone();
        *self = Self::new(rules);
    }

    pub fn fighter(&self, player: Player) -> &Fighter {
        &self.fighters[player.index()]
    }

    pub fn fighter_mut(&mut self, player: Player) -> &mut Fighter {
        &mut self.fighters[player.index()]
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.turn.winner.is_some()
    }

    #[inline]
    pub fn is_flashing(&self, now: f64) -> bool {
        now < self.flash_until
    }
}
