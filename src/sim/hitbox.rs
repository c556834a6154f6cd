//! Axis-aligned hit-box geometry for hurtboxes and attack boxes
//!
//! A box is defined by:
//! - min: top-left corner in canvas space (y grows downward)
//! - size: width and height

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Facing;
use crate::consts::*;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitBox {
    pub min: Vec2,
    pub size: Vec2,
}

impl HitBox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// The square body of a fighter standing at `pos`
    pub fn hurtbox(pos: Vec2) -> Self {
        Self {
            min: pos,
            size: Vec2::splat(FIGHTER_SIZE),
        }
    }

    /// Attack reach flush against the attacker's leading edge
    pub fn attack(pos: Vec2, facing: Facing) -> Self {
        let x = match facing {
            Facing::Right => pos.x + FIGHTER_SIZE,
            Facing::Left => pos.x - ATTACK_BOX_WIDTH,
        };
        Self::new(x, pos.y, ATTACK_BOX_WIDTH, ATTACK_BOX_HEIGHT)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &HitBox) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}
