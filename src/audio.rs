//! Sound cue dispatch
//!
//! Cues are fire-and-forget. The default sink has no output device; it logs
//! each cue with its effective volume and keeps a tally.

use std::collections::HashMap;

use crate::sim::state::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits a brick that survives
    BrickHit,
    /// Ball takes a brick's last hitpoint
    BrickDestroyed,
    /// Ball hits the platform
    PlatformHit,
    /// Ball fell past the platform
    BallLost,
    /// Score crossed an extra-life threshold
    ExtraLife,
    /// Level cleared, next level follows
    LevelWon,
    /// Last level cleared (game won)
    AllLevelsWon,
    /// No lives left
    GameOver,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BrickHit { .. } => Some(Self::BrickHit),
            GameEvent::BrickDestroyed { .. } => Some(Self::BrickDestroyed),
            GameEvent::PlatformHit => Some(Self::PlatformHit),
            GameEvent::BallLost => Some(Self::BallLost),
            GameEvent::ExtraLife { .. } => Some(Self::ExtraLife),
            GameEvent::LevelCleared => Some(Self::LevelWon),
            GameEvent::AllLevelsCleared => Some(Self::AllLevelsWon),
            GameEvent::GameOver => Some(Self::GameOver),
            GameEvent::BallLaunched
            | GameEvent::WallHit(_)
            | GameEvent::IndestructibleBrickHit { .. }
            | GameEvent::Exit => None,
        }
    }
}

/// Anything that can play cues
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: HashMap<SoundEffect, u32>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: HashMap::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// How often `effect` was played
    pub fn count(&self, effect: SoundEffect) -> u32 {
        self.played.get(&effect).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.played.values().sum()
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        *self.played.entry(effect).or_default() += 1;

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("Cue {effect:?} at volume {vol:.2}");
    }
}
