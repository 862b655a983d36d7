//! World bounds and axis-aligned rectangle geometry
//!
//! Hit testing in Piranhas is all axis-aligned:
//! - piranha frames (bounding box of the rotated sprite)
//! - the player hitbox
//! - the world rectangle `[0, width] × [0, height]`

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current world extents, as reported by the layout collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    /// Panics on non-positive or non-finite extents (host programming error)
    #[track_caller]
    pub fn new(width: f32, height: f32) -> Self {
        assert!(
            width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0,
            "world bounds must be positive and finite, got {width}x{height}"
        );
        Self { width, height }
    }

    /// Radius used for cohesion/alignment grouping
    #[inline]
    pub fn neighbor_distance(&self) -> f32 {
        self.width.min(self.height) / NEIGHBOR_DIVISOR
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Inclusive containment in `[0, width] × [0, height]`
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT)
    }
}

/// Axis-aligned rectangle (min corner inclusive, max corner inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Axis-aligned bounding box of a `size` box rotated by `rotation` around `center`
    pub fn rotated_bounds(center: Vec2, size: Vec2, rotation: f32) -> Self {
        let (sin, cos) = rotation.sin_cos();
        let w = size.x * cos.abs() + size.y * sin.abs();
        let h = size.x * sin.abs() + size.y * cos.abs();
        Self::centered(center, Vec2::new(w, h))
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Strict overlap; rectangles that only share an edge don't intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}
