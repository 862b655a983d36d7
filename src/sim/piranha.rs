//! Piranha agents and the four flocking rules
//!
//! Each rule adds a delta to the piranha's current velocity. Rules are
//! evaluated against a read-only neighbor snapshot, so one piranha's steering
//! never sees another's already-updated state from the same tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::{Rect, WorldBounds};
use crate::consts::*;
use crate::{clamp_speed, heading_of, unit_from_angle};

/// Sprite variant, picked once at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PiranhaSkin {
    Green,
    Pink,
}

/// A single swarm agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Piranha {
    /// Creation-order id (stable iteration order for collisions)
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual heading, derived from velocity after each tick
    pub rotation: f32,
    /// Inside a panic window: cohesion turns into flight
    pub startled: bool,
    /// Hit by a projectile, removed on the next compaction pass
    pub destroyed: bool,
    /// World extents this piranha steers back into
    pub max: Vec2,
    pub skin: PiranhaSkin,
}

impl Piranha {
    /// Spawn at a uniformly random position with a random unit heading
    pub fn spawn<R: Rng>(id: u32, bounds: WorldBounds, rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let pos = Vec2::new(
            rng.random_range(0.0..=bounds.width),
            rng.random_range(0.0..=bounds.height),
        );
        let skin = if rng.random_bool(0.5) {
            PiranhaSkin::Green
        } else {
            PiranhaSkin::Pink
        };
        let vel = unit_from_angle(angle);
        Self {
            id,
            pos,
            vel,
            rotation: heading_of(vel),
            startled: false,
            destroyed: false,
            max: bounds.max(),
            skin,
        }
    }

    /// Place a piranha explicitly (scenario setup, tests)
    pub fn at(id: u32, pos: Vec2, vel: Vec2, bounds: WorldBounds) -> Self {
        Self {
            id,
            pos,
            vel,
            rotation: heading_of(vel),
            startled: false,
            destroyed: false,
            max: bounds.max(),
            skin: PiranhaSkin::Green,
        }
    }

    /// Velocity after applying all four rules and the speed clamp
    ///
    /// Pure: reads `self` and `neighbors` only.
    pub fn steered_velocity(&self, neighbors: &[&Piranha]) -> Vec2 {
        let mut v = self.vel;
        v += self.cohesion(neighbors);
        v += self.separation(neighbors);
        v += self.alignment(neighbors);
        v += self.containment();
        clamp_speed(v, SWARM_MAX_SPEED)
    }

    /// Rule 1: drift toward the neighbor centroid, or flee it when startled
    pub fn cohesion(&self, neighbors: &[&Piranha]) -> Vec2 {
        if neighbors.is_empty() {
            return Vec2::ZERO;
        }
        let sum: Vec2 = neighbors.iter().map(|n| n.pos).sum();
        let centroid = sum / neighbors.len() as f32;
        let to_center = centroid - self.pos;
        if self.startled {
            -to_center * FLIGHT_GAIN
        } else {
            to_center * COHESION_GAIN
        }
    }

    /// Rule 2: push away from neighbors closer than SEPARATION_DISTANCE
    pub fn separation(&self, neighbors: &[&Piranha]) -> Vec2 {
        let mut push = Vec2::ZERO;
        for n in neighbors {
            if (n.pos - self.pos).length() < SEPARATION_DISTANCE {
                push += self.pos - n.pos;
            }
        }
        push * SEPARATION_GAIN
    }

    /// Rule 3: match the mean neighbor velocity
    pub fn alignment(&self, neighbors: &[&Piranha]) -> Vec2 {
        if neighbors.is_empty() {
            return Vec2::ZERO;
        }
        let sum: Vec2 = neighbors.iter().map(|n| n.vel).sum();
        let mean = sum / neighbors.len() as f32;
        mean * ALIGNMENT_GAIN
    }

    /// Rule 4: soft push back toward `[0, max.x] × [0, max.y]`
    pub fn containment(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.pos.x < 0.0 {
            v.x = 1.0;
        }
        if self.pos.x > self.max.x {
            v.x = -1.0;
        }
        if self.pos.y < 0.0 {
            v.y = 1.0;
        }
        if self.pos.y > self.max.y {
            v.y = -1.0;
        }
        v * BOUNDS_GAIN
    }

    /// Move by the current velocity and refresh the heading
    pub fn integrate(&mut self) {
        self.pos += self.vel;
        self.rotation = heading_of(self.vel);
    }

    /// Hit rectangle: bounding box of the rotated, scaled sprite
    pub fn frame(&self) -> Rect {
        let size = Vec2::new(PIRANHA_SPRITE_WIDTH, PIRANHA_SPRITE_HEIGHT) * PIRANHA_SCALE;
        Rect::rotated_bounds(self.pos, size, self.rotation)
    }
}
