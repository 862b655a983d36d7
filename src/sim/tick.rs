//! Per-tick simulation driver
//!
//! Order within a tick:
//! 1. fire due timers (panic expiry, respawn)
//! 2. player control from the input snapshot
//! 3. advance and prune lasers
//! 4. advance the flock
//! 5. lasers vs piranhas, then piranhas vs player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::WorldBounds;
use super::collision::{laser_hits, player_struck};
use super::flock;
use super::projectile::AxisDirection;
use super::state::{Facing, GameEvent, GamePhase, GameState, Player};
use crate::assert_finite;
use crate::consts::*;

/// Controller snapshot for a single tick, captured once by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Right thumbstick; moves the player
    pub thumbstick: Vec2,
    /// D-pad; fires when the thumbstick is idle
    pub dpad: Vec2,
}

/// Advance the game state by one tick of `dt` time units
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    assert!(dt.is_finite() && dt >= 0.0, "dt must be finite and non-negative, got {dt}");
    assert_finite(input.thumbstick, "thumbstick");
    assert_finite(input.dpad, "dpad");

    state.time += f64::from(dt);
    state.time_ticks += 1;

    for action in state.timers.poll(state.time) {
        state.run_timer(action);
    }

    match state.phase {
        GamePhase::Playing => {
            if input.thumbstick != Vec2::ZERO {
                steer_player(&mut state.player, input.thumbstick, state.bounds);
            } else if input.dpad != Vec2::ZERO {
                if let Err(rejected) = state.fire(AxisDirection::from_dpad(input.dpad)) {
                    log::trace!("Shot dropped: {rejected}");
                }
            }
        }
        GamePhase::PlayerHit => sink_player(&mut state.player, dt),
    }

    let bounds = state.bounds;
    for id in state.projectiles.advance(dt, bounds) {
        log::debug!("Projectile {} expired", id);
        state.push_event(GameEvent::ProjectileExpired { id });
    }

    flock::advance(&mut state.piranhas, bounds, state.neighbor_index);

    resolve_laser_hits(state);

    if !state.is_game_over() && player_struck(state.player.pos, &state.piranhas) {
        state.player_hit();
    }
}

/// Destroy struck piranhas, remove spent lasers, then compact the swarm
fn resolve_laser_hits(state: &mut GameState) {
    let hits = laser_hits(state.projectiles.iter(), &state.piranhas);
    if hits.is_empty() {
        return;
    }
    let spent: Vec<_> = hits.iter().map(|h| h.projectile).collect();
    for hit in &hits {
        state.destroy_piranha(hit.piranha, hit.point);
    }
    state.projectiles.remove(&spent);
    state.compact();
}

/// Move the player by one thumbstick step
///
/// Each axis moves at PLAYER_MAX_SPEED; once the player is pinned past the
/// far edge of an axis, that axis crawls at PLAYER_EDGE_SPEED.
pub fn steer_player(player: &mut Player, stick: Vec2, bounds: WorldBounds) {
    player.facing = if stick.x < 0.0 { Facing::Left } else { Facing::Right };

    let mut x = player.pos.x;
    let mut speed = PLAYER_MAX_SPEED;
    let max_x = bounds.width - PLAYER_WIDTH;
    if x > max_x {
        x = max_x;
        speed = PLAYER_EDGE_SPEED;
    }
    x = (x + stick.x * speed).clamp(0.0, bounds.width);

    let mut y = player.pos.y;
    let mut speed = PLAYER_MAX_SPEED;
    let max_y = bounds.height - PLAYER_HEIGHT + PLAYER_TOP_HEADROOM;
    if y > max_y {
        y = max_y;
        speed = PLAYER_EDGE_SPEED;
    }
    y = (y + stick.y * speed).clamp(0.0, bounds.height);

    player.pos = Vec2::new(x, y);
    player.swimming = true;
}

/// Play out the exit animation while waiting to respawn
fn sink_player(player: &mut Player, dt: f32) {
    if let Some(sink) = &mut player.sink {
        let step = dt.min(sink.remaining);
        player.pos += sink.velocity * step;
        sink.remaining -= step;
        if sink.remaining <= 0.0 {
            player.sink = None;
        }
    }
}
