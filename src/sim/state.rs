//! Game state and core simulation types
//!
//! Session-only: nothing here outlives the process.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::WorldBounds;
use super::flock;
use super::piranha::Piranha;
use super::projectile::{AxisDirection, FireRejected, ProjectileId, ProjectileSet};
use super::timers::{TimerAction, TimerQueue};
use crate::consts::*;
use crate::settings::{NeighborIndex, PanicOverlap, Settings};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player in control
    Playing,
    /// Player was struck; waiting out the respawn delay (game over)
    PlayerHit,
}

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Sinking exit after a hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sink {
    pub velocity: Vec2,
    pub remaining: f32,
}

/// The diver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Bottom-left anchor
    pub pos: Vec2,
    pub facing: Facing,
    /// Has moved since the last reset (selects the swim animation)
    pub swimming: bool,
    pub sink: Option<Sink>,
}

impl Player {
    pub fn spawn(bounds: WorldBounds) -> Self {
        Self {
            pos: Vec2::new(bounds.center_x(), PLAYER_SPAWN_HEIGHT),
            facing: Facing::Right,
            swimming: false,
            sink: None,
        }
    }
}

/// Events for the audio and render collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ProjectileFired { id: ProjectileId, direction: AxisDirection },
    /// Silent despawn (left the world or finished its flight)
    ProjectileExpired { id: ProjectileId },
    PiranhaDestroyed { id: u32, at: Vec2 },
    /// Panic ring centered on the impact point
    PanicStarted { at: Vec2 },
    PanicEnded,
    PlayerHit,
    Respawned,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the swarm was spawned from
    pub seed: u64,
    pub bounds: WorldBounds,
    /// Difficulty/time multiplier applied to every cooldown
    pub speed_scale: f32,
    pub neighbor_index: NeighborIndex,
    pub panic_overlap: PanicOverlap,
    pub score: u64,
    pub phase: GamePhase,
    /// Simulation clock in time units
    pub time: f64,
    pub time_ticks: u64,
    pub player: Player,
    /// Live swarm in creation order
    pub piranhas: Vec<Piranha>,
    /// Swarm size at session start; never refilled
    pub initial_swarm_size: usize,
    pub projectiles: ProjectileSet,
    pub timers: TimerQueue,
    /// Bumped on every panic start; expiry timers carry the value they were scheduled with
    pub panic_generation: u32,
    pub panic_active: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with a freshly spawned swarm
    pub fn new(settings: &Settings, bounds: WorldBounds) -> Self {
        assert!(
            settings.speed_scale.is_finite() && settings.speed_scale > 0.0,
            "speed_scale must be positive, got {}",
            settings.speed_scale
        );
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let piranhas = (0..settings.swarm_size as u32)
            .map(|id| Piranha::spawn(id, bounds, &mut rng))
            .collect();
        Self::with_swarm(settings, bounds, piranhas)
    }

    /// Create a session around an explicit swarm (scenarios, tests)
    pub fn with_swarm(settings: &Settings, bounds: WorldBounds, piranhas: Vec<Piranha>) -> Self {
        let initial_swarm_size = piranhas.len();
        let mut state = Self {
            seed: settings.seed,
            bounds,
            speed_scale: settings.speed_scale,
            neighbor_index: settings.neighbor_index,
            panic_overlap: settings.panic_overlap,
            score: 0,
            phase: GamePhase::Playing,
            time: 0.0,
            time_ticks: 0,
            player: Player::spawn(bounds),
            piranhas,
            initial_swarm_size,
            projectiles: ProjectileSet::new(),
            timers: TimerQueue::new(),
            panic_generation: 0,
            panic_active: false,
            events: Vec::new(),
        };
        state.new_game();
        state
    }

    /// Reset score and player; the swarm carries over
    pub fn new_game(&mut self) {
        self.score = 0;
        self.player = Player::spawn(self.bounds);
        self.phase = GamePhase::Playing;
        log::info!(
            "New game: {} piranhas left, player at {:?}",
            self.piranhas.len(),
            self.player.pos
        );
    }

    /// Shooting and player collisions are suspended while true
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::PlayerHit
    }

    /// Layout collaborator reported new world extents
    pub fn resize(&mut self, bounds: WorldBounds) {
        self.bounds = bounds;
        flock::resize(&mut self.piranhas, bounds);
    }

    /// Fire a laser from the player's muzzle
    pub fn fire(&mut self, direction: Option<AxisDirection>) -> Result<ProjectileId, FireRejected> {
        if self.is_game_over() {
            return Err(FireRejected::GameOver);
        }
        let origin = self.player.pos + direction.map_or(Vec2::ZERO, AxisDirection::muzzle_offset);
        let id = self
            .projectiles
            .fire(origin, direction, self.bounds, self.speed_scale)?;
        if let Some(direction) = direction {
            self.events.push(GameEvent::ProjectileFired { id, direction });
        }
        Ok(id)
    }

    /// Score a kill and startle the swarm around the impact point
    pub fn destroy_piranha(&mut self, idx: usize, at: Vec2) {
        let piranha = &mut self.piranhas[idx];
        if piranha.destroyed {
            return;
        }
        piranha.destroyed = true;
        let id = piranha.id;
        self.score += SCORE_PER_PIRANHA;
        log::debug!("Piranha {} destroyed at {:?}, score {}", id, at, self.score);
        self.events.push(GameEvent::PiranhaDestroyed { id, at });
        self.start_panic(at);
    }

    /// Open (or restart) the global panic window
    pub fn start_panic(&mut self, at: Vec2) {
        for p in self.piranhas.iter_mut().filter(|p| !p.destroyed) {
            p.startled = true;
        }
        self.panic_generation += 1;
        self.panic_active = true;
        let due = self.time + f64::from(PANIC_DURATION * self.speed_scale);
        self.timers.schedule(
            due,
            TimerAction::EndPanic {
                generation: self.panic_generation,
            },
        );
        log::debug!("Panic #{} until t={:.3}", self.panic_generation, due);
        self.events.push(GameEvent::PanicStarted { at });
    }

    /// Expiry timer for panic start `generation` fired
    pub fn end_panic(&mut self, generation: u32) {
        if self.panic_overlap == PanicOverlap::Restart && generation != self.panic_generation {
            // A later panic restarted the window; its own timer closes it
            return;
        }
        if !self.panic_active {
            return;
        }
        for p in &mut self.piranhas {
            p.startled = false;
        }
        self.panic_active = false;
        log::debug!("Panic #{} over", generation);
        self.events.push(GameEvent::PanicEnded);
    }

    /// A piranha reached the player
    pub fn player_hit(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::PlayerHit;
        let drop = self.bounds.height + self.player.pos.y;
        self.player.sink = Some(Sink {
            velocity: Vec2::new(0.0, -drop / PLAYER_EXIT_DURATION),
            remaining: PLAYER_EXIT_DURATION,
        });
        let due = self.time + f64::from(RESPAWN_DELAY * self.speed_scale);
        self.timers.schedule(due, TimerAction::Respawn);
        log::info!("Player hit at score {}, respawn at t={:.3}", self.score, due);
        self.events.push(GameEvent::PlayerHit);
    }

    /// Apply a due timer
    pub fn run_timer(&mut self, action: TimerAction) {
        match action {
            TimerAction::EndPanic { generation } => self.end_panic(generation),
            TimerAction::Respawn => {
                self.new_game();
                self.events.push(GameEvent::Respawned);
            }
        }
    }

    /// Drop piranhas marked destroyed during this tick's scan
    pub fn compact(&mut self) {
        self.piranhas.retain(|p| !p.destroyed);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            seed: 5,
            ..Settings::default()
        }
    }

    #[test]
    fn test_new_session() {
        let state = GameState::new(&settings(), WorldBounds::new(1000.0, 700.0));
        assert_eq!(state.piranhas.len(), SWARM_SIZE);
        assert_eq!(state.initial_swarm_size, SWARM_SIZE);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(500.0, 64.0));
        // Creation order ids
        for (i, p) in state.piranhas.iter().enumerate() {
            assert_eq!(p.id, i as u32);
        }
    }

    #[test]
    fn test_same_seed_same_swarm() {
        let a = GameState::new(&settings(), WorldBounds::default());
        let b = GameState::new(&settings(), WorldBounds::default());
        for (p, q) in a.piranhas.iter().zip(&b.piranhas) {
            assert_eq!(p.pos, q.pos);
            assert_eq!(p.vel, q.vel);
        }
    }

    #[test]
    fn test_destroy_scores_and_startles() {
        let mut state = GameState::new(&settings(), WorldBounds::default());
        state.destroy_piranha(3, Vec2::new(10.0, 10.0));
        assert_eq!(state.score, 100);
        assert!(state.piranhas[3].destroyed);
        assert!(state.piranhas.iter().filter(|p| !p.destroyed).all(|p| p.startled));
        assert!(state.panic_active);

        // Double destroy is a no-op
        state.destroy_piranha(3, Vec2::new(10.0, 10.0));
        assert_eq!(state.score, 100);

        state.compact();
        assert_eq!(state.piranhas.len(), SWARM_SIZE - 1);
    }

    #[test]
    fn test_stale_panic_timer_is_ignored_on_restart() {
        let mut state = GameState::new(&settings(), WorldBounds::default());
        state.start_panic(Vec2::ZERO);
        state.start_panic(Vec2::ZERO);
        state.end_panic(1);
        assert!(state.panic_active);
        assert!(state.piranhas.iter().all(|p| p.startled));
        state.end_panic(2);
        assert!(!state.panic_active);
        assert!(state.piranhas.iter().all(|p| !p.startled));
    }

    #[test]
    fn test_first_expiry_clears_when_configured() {
        let mut cfg = settings();
        cfg.panic_overlap = PanicOverlap::FirstExpiryClears;
        let mut state = GameState::new(&cfg, WorldBounds::default());
        state.start_panic(Vec2::ZERO);
        state.start_panic(Vec2::ZERO);
        state.end_panic(1);
        assert!(!state.panic_active);
        assert!(state.piranhas.iter().all(|p| !p.startled));
    }

    #[test]
    fn test_fire_uses_muzzle_offset_and_emits_event() {
        let mut state = GameState::new(&settings(), WorldBounds::default());
        let id = state.fire(Some(AxisDirection::Right)).unwrap();
        let laser = state.projectiles.iter().next().unwrap();
        assert_eq!(laser.pos, Vec2::new(560.0, 94.0));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ProjectileFired {
                id,
                direction: AxisDirection::Right
            }]
        );
        assert_eq!(state.fire(None), Err(FireRejected::NoDirection));
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_player_hit_schedules_scaled_respawn() {
        let mut cfg = settings();
        cfg.speed_scale = 1.5;
        let mut state = GameState::new(&cfg, WorldBounds::default());
        state.player_hit();
        assert!(state.is_game_over());
        assert_eq!(state.timers.due_time(TimerAction::Respawn), Some(3.0));

        // Already game over: no second respawn, no shooting
        state.player_hit();
        assert_eq!(state.timers.len(), 1);
        assert_eq!(state.fire(Some(AxisDirection::Up)), Err(FireRejected::GameOver));
    }

    #[test]
    #[should_panic(expected = "speed_scale")]
    fn test_zero_speed_scale_panics() {
        let mut cfg = settings();
        cfg.speed_scale = 0.0;
        GameState::new(&cfg, WorldBounds::default());
    }
}
