//! Per-frame combat step
//!
//! Advances the duel by one discrete step. Sub-step order is fixed:
//!  1. Reset (unconditional, returns immediately)
//!  2. Terminal check (frozen once a winner exists)
//!  3. Attack arming on a fresh press
//!  4. Movement (turn-restricted unless the rules say otherwise)
//!  5. Hit resolution against post-movement positions

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hitbox::HitBox;
use super::state::{CombatState, Facing, Fighter, MovementRule, Player};

/// Directional controls held by one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveInput {
    /// Unnormalized step direction; diagonals move full speed on both axes
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Control snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Movement for fighters 0 and 1
    pub moves: [MoveInput; 2],
    /// Shared attack control; always arms the player holding the turn
    pub attack: bool,
    /// Reinitialize the duel
    pub reset: bool,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// Attack window opened for the active player
    Armed { attacker: Player },
    /// Attack landed
    Hit {
        attacker: Player,
        defender: Player,
        damage: u32,
        remaining_hp: u32,
    },
    /// Non-lethal hit passed the turn
    TurnPassed { to: Player },
    /// Lethal hit ended the duel
    Won { winner: Player },
    Reset,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    pub fighters: [Fighter; 2],
    pub active_player: Player,
    pub winner: Option<Player>,
    /// Attack window is live
    pub attacking: bool,
    /// Background flash is live
    pub flashing: bool,
    /// Active attacker's reach (only while attacking and undecided)
    pub attack_box: Option<HitBox>,
    /// Events raised by this tick, in order
    pub events: Vec<CombatEvent>,
}

impl CombatState {
    /// Advance the duel by one step at time `now` (ms, monotonic)
    pub fn advance(&mut self, now: f64, input: &TickInput) -> RenderState {
        let mut events = Vec::new();

        if input.reset {
            self.reset();
            log::info!("Duel reset");
            events.push(CombatEvent::Reset);
            return self.render_state(now, events);
        }

        if self.is_over() {
            return self.render_state(now, events);
        }

        self.arm_attack(now, input.attack, &mut events);
        self.apply_movement(input);
        self.resolve_hit(now, &mut events);

        self.render_state(now, events)
    }

    fn arm_attack(&mut self, now: f64, pressed: bool, events: &mut Vec<CombatEvent>) {
        if pressed && !self.attack.prev_pressed {
            let attacker = self.turn.active;
            self.attack.arm(now, self.rules.attack_duration_ms, attacker);
            self.flash_until = now + self.rules.attack_duration_ms;

            log::debug!("Player {} armed attack until {:.1}", attacker.number(), self.attack.until);
            events.push(CombatEvent::Armed { attacker });
        }
        self.attack.prev_pressed = pressed;
    }

    fn apply_movement(&mut self, input: &TickInput) {
        let speed = self.rules.speed;
        for player in Player::BOTH {
            if self.rules.movement == MovementRule::TurnRestricted && player != self.turn.active {
                continue;
            }

            let moves = input.moves[player.index()];
            let fighter = self.fighter_mut(player);
            fighter.pos += moves.direction() * speed;

            // Right wins if both are held, matching the order the moves apply in
            if moves.right {
                fighter.facing = Facing::Right;
            } else if moves.left {
                fighter.facing = Facing::Left;
            }
        }
    }

    fn resolve_hit(&mut self, now: f64, events: &mut Vec<CombatEvent>) {
        if !self.attack.can_hit(now) {
            return;
        }

        let attacker = self.attack.attacker;
        let defender = attacker.other();
        let reach = self.fighter(attacker).attack_box();
        if !reach.overlaps(&self.fighter(defender).hurtbox()) {
            return;
        }

        self.attack.has_hit = true;
        self.flash_until = now + self.rules.hit_flash_ms;

        let damage = self.rules.attack_damage;
        let knocked_out = self.fighter_mut(defender).take_damage(damage);
        let remaining_hp = self.fighter(defender).hp;
        events.push(CombatEvent::Hit {
            attacker,
            defender,
            damage,
            remaining_hp,
        });

        if knocked_out {
            self.turn.winner = Some(attacker);
            log::info!("Player {} wins", attacker.number());
            events.push(CombatEvent::Won { winner: attacker });
        } else {
            self.turn.active = defender;
            log::info!(
                "Player {} hit for {} ({} hp left), turn switched to player {}",
                attacker.number(),
                damage,
                remaining_hp,
                defender.number()
            );
            events.push(CombatEvent::TurnPassed { to: defender });
        }
    }

    /// Snapshot for the renderer
    pub fn render_state(&self, now: f64, events: Vec<CombatEvent>) -> RenderState {
        let attacking = self.attack.is_active(now);
        let attack_box = (attacking && !self.is_over())
            .then(|| self.fighter(self.attack.attacker).attack_box());

        RenderState {
            fighters: self.fighters.clone(),
            active_player: self.turn.active,
            winner: self.turn.winner,
            attacking,
            flashing: self.is_flashing(now),
            attack_box,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Rules;

    fn press_attack() -> TickInput {
        TickInput {
            attack: true,
            ..Default::default()
        }
    }

    /// Fighter 0 at (100,100) facing right, fighter 1 placed at `x2` on the same row
    fn face_off(x2: f32) -> CombatState {
        let mut state = CombatState::default();
        state.fighters[1].pos = Vec2::new(x2, 100.0);
        state
    }

    #[test]
    fn test_hit_in_range() {
        let mut state = face_off(149.0);
        let frame = state.advance(0.0, &press_attack());

        assert!(state.attack.has_hit);
        assert_eq!(state.fighters[1].hp, 90);
        assert_eq!(state.turn.active, Player::Two);
        assert_eq!(frame.active_player, Player::Two);
        assert!(frame.flashing);
        assert_eq!(state.flash_until, 80.0);
        assert_eq!(
            frame.events,
            vec![
                CombatEvent::Armed { attacker: Player::One },
                CombatEvent::Hit {
                    attacker: Player::One,
                    defender: Player::Two,
                    damage: 10,
                    remaining_hp: 90,
                },
                CombatEvent::TurnPassed { to: Player::Two },
            ]
        );
    }

    #[test]
    fn test_miss_out_of_range() {
        let mut state = face_off(400.0);
        state.advance(0.0, &press_attack());
        assert!(!state.attack.has_hit);
        assert_eq!(state.fighters[1].hp, 100);
        assert_eq!(state.turn.active, Player::One);

        // Still holding; window runs out at t=120
        let frame = state.advance(119.0, &press_attack());
        assert!(frame.attacking);
        assert!(frame.attack_box.is_some());
        let frame = state.advance(120.0, &press_attack());
        assert!(!frame.attacking);
        assert!(frame.attack_box.is_none());
        assert!(!state.attack.has_hit);
        assert_eq!(state.turn.active, Player::One);
    }

    #[test]
    fn test_holding_attack_arms_once() {
        let mut state = face_off(400.0);
        let mut armed = 0;
        for i in 0..30 {
            let frame = state.advance(i as f64 * 16.0, &press_attack());
            armed += frame
                .events
                .iter()
                .filter(|e| matches!(e, CombatEvent::Armed { .. }))
                .count();
        }
        assert_eq!(armed, 1);
        assert_eq!(state.attack.until, 120.0);

        // Release then press again re-arms
        state.advance(500.0, &TickInput::default());
        state.advance(516.0, &press_attack());
        assert_eq!(state.attack.until, 636.0);
    }

    #[test]
    fn test_one_hit_per_activation() {
        let mut state = face_off(149.0);
        // Free movement keeps fighter 0 in range after the turn passes
        state.rules.movement = MovementRule::Free;
        state.advance(0.0, &press_attack());
        // Fighter 1 now holds the turn and is in range, but the held key never re-arms
        for t in 1..10 {
            state.advance(t as f64 * 10.0, &press_attack());
        }
        assert_eq!(state.fighters[1].hp, 90);
        assert_eq!(state.fighters[0].hp, 100);
    }

    #[test]
    fn test_persistent_overlap_scores_once() {
        let mut state = face_off(149.0);
        state.advance(0.0, &press_attack());
        // Put the turn back on fighter 0 without re-arming; overlap persists
        state.turn.active = Player::One;
        for t in 1..10 {
            state.advance(t as f64 * 10.0, &press_attack());
        }
        assert_eq!(state.fighters[1].hp, 90);
    }

    #[test]
    fn test_attack_box_stays_with_attacker_after_turn_passes() {
        let mut state = face_off(149.0);
        state.advance(0.0, &press_attack());
        assert_eq!(state.turn.active, Player::Two);

        // Window is still live; the outline belongs to fighter 0, not the new turn holder
        let frame = state.advance(50.0, &TickInput::default());
        assert!(frame.attacking);
        assert_eq!(frame.attack_box, Some(HitBox::new(150.0, 100.0, 30.0, 50.0)));
    }

    #[test]
    fn test_edge_touch_does_not_hit() {
        // Attack box spans [150, 180); hurtbox at 180 only touches it
        let mut state = face_off(180.0);
        state.advance(0.0, &press_attack());
        assert_eq!(state.fighters[1].hp, 100);
    }

    #[test]
    fn test_lethal_hit_sets_winner_without_swapping_turn() {
        let mut state = face_off(149.0);
        state.fighters[1].hp = 10;
        let frame = state.advance(0.0, &press_attack());

        assert_eq!(state.fighters[1].hp, 0);
        assert_eq!(state.turn.winner, Some(Player::One));
        assert_eq!(state.turn.active, Player::One);
        assert!(frame.attack_box.is_none());
        assert_eq!(frame.events.last(), Some(&CombatEvent::Won { winner: Player::One }));

        // Frozen: movement, arming and hits are all ignored
        let frozen = state.clone();
        let busy = TickInput {
            moves: [MoveInput { left: true, up: true, ..Default::default() }; 2],
            attack: false,
            reset: false,
        };
        for t in 1..20 {
            state.advance(t as f64 * 16.0, &busy);
            state.advance(t as f64 * 16.0 + 8.0, &press_attack());
        }
        assert_eq!(state.fighters, frozen.fighters);
        assert_eq!(state.turn, frozen.turn);
    }

    #[test]
    fn test_overkill_clamps_to_zero() {
        let mut state = face_off(149.0);
        state.fighters[1].hp = 3;
        state.advance(0.0, &press_attack());
        assert_eq!(state.fighters[1].hp, 0);
        assert_eq!(state.turn.winner, Some(Player::One));
    }

    #[test]
    fn test_reset_from_won_state() {
        let mut state = face_off(149.0);
        state.fighters[1].hp = 10;
        state.advance(0.0, &press_attack());
        assert!(state.is_over());

        let frame = state.advance(
            50.0,
            &TickInput {
                reset: true,
                attack: true,
                ..Default::default()
            },
        );
        assert_eq!(state, CombatState::default());
        assert_eq!(frame.events, vec![CombatEvent::Reset]);
        assert_eq!(frame.winner, None);
    }

    #[test]
    fn test_only_active_player_moves() {
        let mut state = CombatState::default();
        let input = TickInput {
            moves: [
                MoveInput { right: true, down: true, ..Default::default() },
                MoveInput { right: true, ..Default::default() },
            ],
            ..Default::default()
        };
        state.advance(0.0, &input);
        assert_eq!(state.fighters[0].pos, Vec2::new(103.0, 103.0));
        assert_eq!(state.fighters[1].pos, Vec2::new(500.0, 500.0));
        assert_eq!(state.fighters[1].facing, Facing::Left);
    }

    #[test]
    fn test_free_movement_moves_both() {
        let mut state = CombatState::new(Rules {
            movement: MovementRule::Free,
            ..Default::default()
        });
        let input = TickInput {
            moves: [
                MoveInput { left: true, ..Default::default() },
                MoveInput { right: true, ..Default::default() },
            ],
            ..Default::default()
        };
        state.advance(0.0, &input);
        assert_eq!(state.fighters[0].pos, Vec2::new(97.0, 100.0));
        assert_eq!(state.fighters[0].facing, Facing::Left);
        assert_eq!(state.fighters[1].pos, Vec2::new(503.0, 500.0));
        assert_eq!(state.fighters[1].facing, Facing::Right);
    }

    #[test]
    fn test_vertical_move_keeps_facing() {
        let mut state = CombatState::default();
        let input = TickInput {
            moves: [MoveInput { up: true, ..Default::default() }, MoveInput::default()],
            ..Default::default()
        };
        state.advance(0.0, &input);
        assert_eq!(state.fighters[0].pos, Vec2::new(100.0, 97.0));
        assert_eq!(state.fighters[0].facing, Facing::Right);
    }

    #[test]
    fn test_turn_left_and_strike() {
        // Fighter 0 turns around and hits a defender on its left
        let mut state = CombatState::default();
        state.fighters[1].pos = Vec2::new(40.0, 110.0);
        let input = TickInput {
            moves: [MoveInput { left: true, ..Default::default() }, MoveInput::default()],
            attack: true,
            ..Default::default()
        };
        // Moves to x=97 first; attack box spans [67, 97), defender spans [40, 90)
        state.advance(0.0, &input);
        assert_eq!(state.fighters[0].facing, Facing::Left);
        assert_eq!(state.fighters[1].hp, 90);
        assert_eq!(state.turn.active, Player::Two);
    }

    #[test]
    fn test_turn_alternates_between_hits() {
        let mut state = face_off(149.0);
        state.advance(0.0, &press_attack());
        assert_eq!(state.turn.active, Player::Two);

        // Fighter 1 faces left toward fighter 0: box spans [119, 149), fighter 0 spans [100, 150)
        state.advance(200.0, &TickInput::default());
        state.advance(216.0, &press_attack());
        assert_eq!(state.fighters[0].hp, 90);
        assert_eq!(state.turn.active, Player::One);
    }
}
