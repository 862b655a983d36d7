//! Collision detection between lasers, piranhas and the player
//!
//! Detection only: functions report what hit what and leave the response
//! (scoring, panic, removal) to the state machine.

use glam::Vec2;

use super::bounds::Rect;
use super::piranha::Piranha;
use super::projectile::{Projectile, ProjectileId};
use crate::consts::*;

/// A laser struck a piranha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserHit {
    pub projectile: ProjectileId,
    /// Index into the piranha slice
    pub piranha: usize,
    /// Laser position at impact
    pub point: Vec2,
}

/// Player hitbox, anchored at the player's bottom-left position
pub fn player_hitbox(player_pos: Vec2) -> Rect {
    Rect::new(
        Vec2::new(player_pos.x + PLAYER_HITBOX_LEFT, player_pos.y),
        Vec2::new(
            player_pos.x + PLAYER_HITBOX_RIGHT,
            player_pos.y + PLAYER_HITBOX_HEIGHT,
        ),
    )
}

/// Resolve lasers against piranhas, in firing order
///
/// Each laser destroys at most one piranha, and a piranha claimed by an
/// earlier laser is skipped by later ones.
pub fn laser_hits<'a>(
    projectiles: impl IntoIterator<Item = &'a Projectile>,
    piranhas: &[Piranha],
) -> Vec<LaserHit> {
    let mut claimed = vec![false; piranhas.len()];
    let mut hits = Vec::new();
    for laser in projectiles {
        // First live, unclaimed piranha in creation order
        let target = piranhas.iter().enumerate().position(|(i, p)| {
            !claimed[i] && !p.destroyed && p.frame().contains_point(laser.pos)
        });
        if let Some(i) = target {
            claimed[i] = true;
            hits.push(LaserHit {
                projectile: laser.id,
                piranha: i,
                point: laser.pos,
            });
        }
    }
    hits
}

/// Does any live piranha overlap the player's hitbox?
pub fn player_struck(player_pos: Vec2, piranhas: &[Piranha]) -> bool {
    let hitbox = player_hitbox(player_pos);
    piranhas
        .iter()
        .any(|p| !p.destroyed && p.frame().intersects(&hitbox))
}
