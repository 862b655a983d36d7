//! Piranhas headless driver
//!
//! Runs a scripted session against the simulation and prints the final
//! frame snapshot as JSON. A real host replaces the script with controller
//! input and the log sink with an audio backend.
//!
//! Usage: piranhas [settings.json] [ticks]

use glam::Vec2;

use piranhas::audio::{AudioManager, LogSink};
use piranhas::consts::SIM_DT;
use piranhas::settings::Settings;
use piranhas::sim::{GameEvent, GameState, TickInput, WorldBounds, tick};
use piranhas::view::FrameSnapshot;

const DEFAULT_TICKS: u64 = 1800;
/// Ticks between scripted shots
const FIRE_INTERVAL: u64 = 20;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let ticks = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Bad tick count ({e}); running {DEFAULT_TICKS}");
            DEFAULT_TICKS
        }
        None => DEFAULT_TICKS,
    };

    let bounds = WorldBounds::new(settings.world_width, settings.world_height);
    let mut state = GameState::new(&settings, bounds);
    let mut audio = AudioManager::new(LogSink, settings.sfx_volume);
    log::info!(
        "Piranhas starting: seed {}, {} piranhas, {} neighbor index",
        settings.seed,
        state.piranhas.len(),
        settings.neighbor_index.as_str()
    );

    let mut kills = 0usize;
    let mut deaths = 0usize;
    for n in 0..ticks {
        tick(&mut state, &scripted_input(n), SIM_DT);

        let events = state.drain_events();
        for event in &events {
            match event {
                GameEvent::PiranhaDestroyed { id, .. } => {
                    kills += 1;
                    log::debug!("Piranha {id} destroyed, score {}", state.score);
                }
                GameEvent::PlayerHit => {
                    deaths += 1;
                    log::info!("Player hit at tick {n}, final score {}", state.score);
                }
                GameEvent::Respawned => log::info!("Respawned at tick {n}"),
                _ => {}
            }
        }
        audio.dispatch(&events);
    }

    log::info!(
        "Finished {ticks} ticks: {kills} kills, {deaths} deaths, {} piranhas left",
        state.piranhas.len()
    );

    match FrameSnapshot::capture(&state).to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to encode snapshot: {e}");
            std::process::exit(1);
        }
    }
}

/// Swim side to side and fire in a rotating direction
fn scripted_input(n: u64) -> TickInput {
    if n % FIRE_INTERVAL == 0 {
        let dpad = match (n / FIRE_INTERVAL) % 4 {
            0 => Vec2::Y,
            1 => Vec2::X,
            2 => Vec2::NEG_Y,
            _ => Vec2::NEG_X,
        };
        return TickInput {
            thumbstick: Vec2::ZERO,
            dpad,
        };
    }
    let phase = (n / 240) % 2;
    TickInput {
        thumbstick: Vec2::new(if phase == 0 { 0.6 } else { -0.6 }, 0.0),
        dpad: Vec2::ZERO,
    }
}
