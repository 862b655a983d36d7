//! Piranhas - a controller-driven swarm shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flocking, projectiles, collisions, game state)
//! - `view`: Pure state -> render snapshot mapping
//! - `audio`: Game event -> sound effect mapping
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod settings;
pub mod sim;
pub mod view;

pub use settings::{NeighborIndex, PanicOverlap, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal tick length (60 Hz host render loop)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Swarm defaults
    pub const SWARM_SIZE: usize = 30;
    pub const SWARM_MAX_SPEED: f32 = 6.0;

    /// Flocking rule gains
    pub const COHESION_GAIN: f32 = 0.001;
    /// Startled piranhas flee the neighbor centroid much harder than they flock to it
    pub const FLIGHT_GAIN: f32 = 0.007;
    pub const SEPARATION_DISTANCE: f32 = 30.0;
    pub const SEPARATION_GAIN: f32 = 0.01;
    pub const ALIGNMENT_GAIN: f32 = 0.01;
    pub const BOUNDS_GAIN: f32 = 0.3;
    /// Neighbor radius is min(width, height) / NEIGHBOR_DIVISOR
    pub const NEIGHBOR_DIVISOR: f32 = 3.0;

    /// Piranha sprite (66x42 fish at 0.6 scale)
    pub const PIRANHA_SPRITE_WIDTH: f32 = 66.0;
    pub const PIRANHA_SPRITE_HEIGHT: f32 = 42.0;
    pub const PIRANHA_SCALE: f32 = 0.6;

    /// Player defaults
    pub const PLAYER_MAX_SPEED: f32 = 10.0;
    /// Speed along an axis once the player is pinned against the far edge
    pub const PLAYER_EDGE_SPEED: f32 = 0.05;
    pub const PLAYER_WIDTH: f32 = 66.0;
    pub const PLAYER_HEIGHT: f32 = 92.0;
    /// Extra headroom above the top edge (the player can poke out of the water)
    pub const PLAYER_TOP_HEADROOM: f32 = 52.0;
    pub const PLAYER_SPAWN_HEIGHT: f32 = 64.0;
    /// Swim animation alternates every SWIM_STROKE_LENGTH units of x
    pub const SWIM_STROKE_LENGTH: f32 = 40.0;
    /// Player hitbox relative to the player position
    pub const PLAYER_HITBOX_LEFT: f32 = -20.0;
    pub const PLAYER_HITBOX_RIGHT: f32 = 40.0;
    pub const PLAYER_HITBOX_HEIGHT: f32 = 65.0;
    /// Exit (sink) animation length, not scaled by speed
    pub const PLAYER_EXIT_DURATION: f32 = 2.0;

    /// Projectiles
    pub const MAX_PROJECTILES: usize = 3;
    /// Time to cross the full world dimension (scaled by speed_scale)
    pub const PROJECTILE_DURATION: f32 = 1.2;

    /// Scoring and timers (durations scaled by speed_scale)
    pub const SCORE_PER_PIRANHA: u64 = 100;
    pub const PANIC_DURATION: f32 = 1.0;
    pub const RESPAWN_DELAY: f32 = 2.0;

    /// Default world, used by the headless driver
    pub const DEFAULT_WORLD_WIDTH: f32 = 1000.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 700.0;
}

/// Clamp a velocity to a maximum magnitude, preserving direction
#[inline]
pub fn clamp_speed(v: Vec2, max_speed: f32) -> Vec2 {
    let speed = v.length();
    if speed > max_speed {
        v * (max_speed / speed)
    } else {
        v
    }
}

/// Sprite heading for a velocity (sprites face -x, so rotate by π)
#[inline]
pub fn heading_of(v: Vec2) -> f32 {
    v.y.atan2(v.x) + std::f32::consts::PI
}

/// Unit vector pointing at `angle` radians
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Fail fast on NaN/inf; a single bad vector would poison the whole swarm
#[inline]
#[track_caller]
pub fn assert_finite(v: Vec2, what: &str) {
    assert!(v.is_finite(), "{what} must be finite, got {v:?}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_clamp_speed() {
        let v = clamp_speed(Vec2::new(30.0, 40.0), 5.0);
        assert!((v.length() - 5.0).abs() < 1e-5);
        assert!((v.x - 3.0).abs() < 1e-5);

        // Under the limit: untouched
        let slow = Vec2::new(1.0, 1.0);
        assert_eq!(clamp_speed(slow, 5.0), slow);
    }

    #[test]
    fn test_heading_faces_travel_direction() {
        // Moving right: sprite rotated by π
        assert!((heading_of(Vec2::X) - PI).abs() < 1e-6);
        // Moving up
        assert!((heading_of(Vec2::Y) - (PI / 2.0 + PI)).abs() < 1e-6);
    }

    #[test]
    fn test_unit_from_angle() {
        let u = unit_from_angle(1.234);
        assert!((u.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "must be finite")]
    fn test_assert_finite_rejects_nan() {
        assert_finite(Vec2::new(f32::NAN, 0.0), "velocity");
    }
}
