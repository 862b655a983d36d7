//! Audio adapter
//!
//! The simulation only raises [`GameEvent`]s; this module turns them into
//! fire-and-forget sound requests for whatever audio backend the host has.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Laser fired
    Laser,
    /// Piranha destroyed
    PiranhaExplosion,
    /// Panic drum hit
    PanicDrums,
    /// Player struck
    PlayerExplosion,
}

impl SoundEffect {
    /// Volume hint relative to the sfx volume
    pub fn volume_hint(self) -> f32 {
        match self {
            SoundEffect::PiranhaExplosion => 0.2,
            _ => 1.0,
        }
    }
}

/// Sound for an event, if it has one
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::ProjectileFired { .. } => Some(SoundEffect::Laser),
        GameEvent::PiranhaDestroyed { .. } => Some(SoundEffect::PiranhaExplosion),
        GameEvent::PanicStarted { .. } => Some(SoundEffect::PanicDrums),
        GameEvent::PlayerHit => Some(SoundEffect::PlayerExplosion),
        // Expiry is a silent despawn
        GameEvent::ProjectileExpired { .. } | GameEvent::PanicEnded | GameEvent::Respawned => None,
    }
}

/// Audio collaborator
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Audio manager: applies volume settings and forwards to a sink
pub struct AudioManager<S: AudioSink> {
    sink: S,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, sfx_volume: f32) -> Self {
        Self {
            sink,
            sfx_volume: sfx_volume.clamp(0.0, 1.0),
            muted: false,
        }
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play the sounds for a batch of events, in order
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        if self.muted || self.sfx_volume <= 0.0 {
            return;
        }
        for effect in events.iter().filter_map(sound_for) {
            self.sink.play(effect, self.sfx_volume * effect.volume_hint());
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Sink for hosts without audio: logs what would have played
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {:?} @ {:.2}", effect, volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::AxisDirection;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.push((effect, volume));
        }
    }

    #[test]
    fn test_dispatch_maps_events_in_order() {
        let mut audio = AudioManager::new(Recorder::default(), 0.5);
        audio.dispatch(&[
            GameEvent::ProjectileFired {
                id: 0,
                direction: AxisDirection::Up,
            },
            GameEvent::ProjectileExpired { id: 0 },
            GameEvent::PiranhaDestroyed {
                id: 3,
                at: Vec2::ZERO,
            },
            GameEvent::PanicStarted { at: Vec2::ZERO },
        ]);
        assert_eq!(
            audio.sink().0,
            vec![
                (SoundEffect::Laser, 0.5),
                (SoundEffect::PiranhaExplosion, 0.1),
                (SoundEffect::PanicDrums, 0.5),
            ]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default(), 1.0);
        audio.set_muted(true);
        audio.dispatch(&[GameEvent::PlayerHit]);
        assert!(audio.sink().0.is_empty());
    }
}
