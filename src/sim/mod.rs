//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Caller-supplied timestep, no wall clock
//! - Seeded RNG only (swarm spawn)
//! - Stable iteration order (piranhas in spawn order, projectiles by id)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod collision;
pub mod flock;
pub mod neighbors;
pub mod piranha;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod timers;

pub use bounds::{Rect, WorldBounds};
pub use collision::{LaserHit, laser_hits, player_hitbox, player_struck};
pub use neighbors::NeighborGrid;
pub use piranha::{Piranha, PiranhaSkin};
pub use projectile::{AxisDirection, FireRejected, Projectile, ProjectileId, ProjectileSet};
pub use state::{Facing, GameEvent, GamePhase, GameState, Player, Sink};
pub use tick::{TickInput, steer_player, tick};
pub use timers::{TimerAction, TimerQueue};
