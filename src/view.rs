//! Render adapter
//!
//! Maps simulation state to what the host draws. Nothing here feeds back
//! into the simulation; animation state is derived, never stored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SWIM_STROKE_LENGTH;
use crate::sim::{Facing, GameState, PiranhaSkin, Player, ProjectileId};

/// Player sprite selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "frame")]
pub enum PlayerAnimation {
    /// Front-facing idle pose (fresh spawn)
    Standing,
    /// Swim cycle, frame 0 or 1
    Swim(u8),
    /// Struck and sinking
    Hit,
}

/// Pick the player sprite
pub fn player_animation(player: &Player, game_over: bool) -> PlayerAnimation {
    if game_over {
        PlayerAnimation::Hit
    } else if player.swimming {
        PlayerAnimation::Swim(swim_stroke(player.pos.x))
    } else {
        PlayerAnimation::Standing
    }
}

/// Swim frame alternates every SWIM_STROKE_LENGTH units of horizontal travel
pub fn swim_stroke(x: f32) -> u8 {
    ((x / SWIM_STROKE_LENGTH).floor() as i64).rem_euclid(2) as u8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    /// Horizontal sprite scale (-1 mirrors the sprite to face left)
    pub x_scale: f32,
    pub animation: PlayerAnimation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiranhaView {
    pub id: u32,
    pub pos: Vec2,
    pub rotation: f32,
    pub skin: PiranhaSkin,
    pub startled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub pos: Vec2,
    pub rotation: f32,
}

/// Everything the render collaborator needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub score: u64,
    pub game_over: bool,
    pub panic_active: bool,
    pub player: PlayerView,
    pub piranhas: Vec<PiranhaView>,
    pub projectiles: Vec<ProjectileView>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let game_over = state.is_game_over();
        let player = &state.player;
        Self {
            tick: state.time_ticks,
            score: state.score,
            game_over,
            panic_active: state.panic_active,
            player: PlayerView {
                pos: player.pos,
                x_scale: match player.facing {
                    Facing::Left => -1.0,
                    Facing::Right => 1.0,
                },
                animation: player_animation(player, game_over),
            },
            piranhas: state
                .piranhas
                .iter()
                .filter(|p| !p.destroyed)
                .map(|p| PiranhaView {
                    id: p.id,
                    pos: p.pos,
                    rotation: p.rotation,
                    skin: p.skin,
                    startled: p.startled,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    pos: p.pos,
                    rotation: p.direction.sprite_rotation(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{AxisDirection, WorldBounds};

    #[test]
    fn test_swim_stroke_alternates() {
        assert_eq!(swim_stroke(0.0), 0);
        assert_eq!(swim_stroke(39.9), 0);
        assert_eq!(swim_stroke(40.0), 1);
        assert_eq!(swim_stroke(85.0), 0);
    }

    #[test]
    fn test_player_animation_states() {
        let mut player = Player::spawn(WorldBounds::default());
        assert_eq!(player_animation(&player, false), PlayerAnimation::Standing);
        player.swimming = true;
        player.pos.x = 45.0;
        assert_eq!(player_animation(&player, false), PlayerAnimation::Swim(1));
        assert_eq!(player_animation(&player, true), PlayerAnimation::Hit);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let settings = Settings {
            swarm_size: 4,
            ..Settings::default()
        };
        let mut state = GameState::new(&settings, WorldBounds::default());
        state.fire(Some(AxisDirection::Left)).unwrap();
        state.player.facing = Facing::Left;

        let snap = FrameSnapshot::capture(&state);
        assert_eq!(snap.piranhas.len(), 4);
        assert_eq!(snap.projectiles.len(), 1);
        assert_eq!(snap.player.x_scale, -1.0);
        assert_eq!(snap.player.animation, PlayerAnimation::Standing);

        let json = snap.to_json().unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("Standing"));
    }
}
