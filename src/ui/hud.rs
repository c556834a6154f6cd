use glam::Vec2;

use crate::consts::*;
use crate::sim::{Fighter, Player, RenderState};

/// Control hints, top-left
pub const CONTROL_HINTS: [&str; 3] = [
    "P1: WASD + F to attack",
    "P2: Arrow keys + F to attack",
    "R to reset",
];

/// Health bar origins for fighters 0 and 1
pub const HEALTH_BAR_ORIGINS: [Vec2; 2] = [Vec2::new(200.0, 10.0), Vec2::new(410.0, 10.0)];

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthBar {
    pub player: Player,
    /// Top-left of the bar frame
    pub origin: Vec2,
    /// Frame size; the fill shares its height
    pub size: Vec2,
    /// Fill width, proportional to remaining HP
    pub fill_width: f32,
    pub label: String,
}

impl HealthBar {
    pub fn for_fighter(player: Player, fighter: &Fighter) -> Self {
        Self {
            player,
            origin: HEALTH_BAR_ORIGINS[player.index()],
            size: Vec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
            fill_width: fighter.hp_fraction().clamp(0.0, 1.0) * HEALTH_BAR_WIDTH,
            label: format!("Player {} {} / {}", player.number(), fighter.hp, fighter.max_hp),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WinBanner {
    pub headline: String,
    pub hint: String,
}

/// Everything the HUD draws for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudLayout {
    pub hints: Vec<TextLine>,
    pub turn: TextLine,
    pub health_bars: [HealthBar; 2],
    pub win_banner: Option<WinBanner>,
}

impl HudLayout {
    pub fn from_render_state(frame: &RenderState) -> Self {
        let hints = CONTROL_HINTS
            .iter()
            .enumerate()
            .map(|(i, text)| TextLine {
                text: text.to_string(),
                pos: Vec2::new(10.0, 20.0 + 20.0 * i as f32),
            })
            .collect();

        let turn = TextLine {
            text: format!("Turn: Player {}", frame.active_player.number()),
            pos: Vec2::new(10.0, 20.0 + 20.0 * CONTROL_HINTS.len() as f32),
        };

        let health_bars = Player::BOTH
            .map(|player| HealthBar::for_fighter(player, &frame.fighters[player.index()]));

        let win_banner = frame.winner.map(|winner| WinBanner {
            headline: format!("Player {} Wins", winner.number()),
            hint: "Press R to reset".to_string(),
        });

        Self {
            hints,
            turn,
            health_bars,
            win_banner,
        }
    }
}
