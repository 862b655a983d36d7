//! Player lasers
//!
//! Each laser flies a straight, axis-aligned line spanning the full world
//! width or height in `PROJECTILE_DURATION * speed_scale` time units, then
//! despawns. At most `MAX_PROJECTILES` are live at once.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bounds::WorldBounds;
use crate::assert_finite;
use crate::consts::*;

pub type ProjectileId = u32;

/// One of the four d-pad directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisDirection {
    Up,
    Down,
    Left,
    Right,
}

impl AxisDirection {
    /// Resolve a d-pad vector; x wins over y, zero means no input
    pub fn from_dpad(dpad: Vec2) -> Option<Self> {
        if dpad.x > 0.0 {
            Some(Self::Right)
        } else if dpad.x < 0.0 {
            Some(Self::Left)
        } else if dpad.y > 0.0 {
            Some(Self::Up)
        } else if dpad.y < 0.0 {
            Some(Self::Down)
        } else {
            None
        }
    }

    pub fn unit(self) -> Vec2 {
        match self {
            Self::Up => Vec2::Y,
            Self::Down => Vec2::NEG_Y,
            Self::Left => Vec2::NEG_X,
            Self::Right => Vec2::X,
        }
    }

    /// Spawn point relative to the player's anchor (bottom-left)
    pub fn muzzle_offset(self) -> Vec2 {
        match self {
            Self::Right => Vec2::new(60.0, 30.0),
            Self::Left => Vec2::new(0.0, 30.0),
            Self::Up => Vec2::new(30.0, 60.0),
            Self::Down => Vec2::new(30.0, 0.0),
        }
    }

    /// Laser sprite rotation
    pub fn sprite_rotation(self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI, TAU};
        match self {
            Self::Right => FRAC_PI_2,
            Self::Left => 3.0 * FRAC_PI_2,
            Self::Up => TAU,
            Self::Down => PI,
        }
    }
}

/// Why a fire request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FireRejected {
    #[error("projectile limit reached")]
    Saturated,
    #[error("no fire direction")]
    NoDirection,
    #[error("player is down")]
    GameOver,
}

/// A laser in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub pos: Vec2,
    pub direction: AxisDirection,
    /// World units per time unit
    pub speed: f32,
    /// Time left before the move action completes
    pub remaining: f32,
}

impl Projectile {
    /// True once the flight time is used up or the laser has left the world
    pub fn is_spent(&self, bounds: WorldBounds) -> bool {
        self.remaining <= 0.0 || !bounds.contains(self.pos)
    }
}

/// The bounded set of live lasers, in firing order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileSet {
    live: Vec<Projectile>,
    next_id: ProjectileId,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new laser at `origin` heading `direction`
    pub fn fire(
        &mut self,
        origin: Vec2,
        direction: Option<AxisDirection>,
        bounds: WorldBounds,
        speed_scale: f32,
    ) -> Result<ProjectileId, FireRejected> {
        assert_finite(origin, "projectile origin");
        if self.live.len() >= MAX_PROJECTILES {
            return Err(FireRejected::Saturated);
        }
        let direction = direction.ok_or(FireRejected::NoDirection)?;

        let travel = match direction {
            AxisDirection::Left | AxisDirection::Right => bounds.width,
            AxisDirection::Up | AxisDirection::Down => bounds.height,
        };
        let duration = PROJECTILE_DURATION * speed_scale;
        let id = self.next_id;
        self.next_id += 1;
        self.live.push(Projectile {
            id,
            pos: origin,
            direction,
            speed: travel / duration,
            remaining: duration,
        });
        log::debug!("Projectile {} fired {:?} from {:?}", id, direction, origin);
        Ok(id)
    }

    /// Move every laser; returns ids of lasers that expired this step
    pub fn advance(&mut self, dt: f32, bounds: WorldBounds) -> Vec<ProjectileId> {
        for p in &mut self.live {
            // Never overshoot the end of the move action
            let step = dt.min(p.remaining.max(0.0));
            p.pos += p.direction.unit() * p.speed * step;
            p.remaining -= dt;
        }
        let mut expired = Vec::new();
        self.live.retain(|p| {
            let spent = p.is_spent(bounds);
            if spent {
                expired.push(p.id);
            }
            !spent
        });
        expired
    }

    /// Drop lasers that struck something
    pub fn remove(&mut self, ids: &[ProjectileId]) {
        self.live.retain(|p| !ids.contains(&p.id));
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.live.iter()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
