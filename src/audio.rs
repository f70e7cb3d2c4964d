//! Sound effects as fire-and-forget side effects
//!
//! The simulation never waits on audio. Without a backend every call is a
//! no-op, so a missing sound device never changes how a match plays out.

use crate::sim::{GameEvent, Owner, StructureKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Match begins
    Start,
    /// Player tank fires
    PlayerFire,
    /// Enemy tank fires
    EnemyFire,
    /// Bullet absorbed by a structure that survives the hit
    Ricochet,
    /// Brick knocked out
    BrickBreak,
    /// Tank damaged but still standing
    TankHit,
    /// Tank destroyed
    Explosion,
    /// Headquarters lost
    BaseDestroyed,
    /// Two bullets cancelled mid-air
    BulletClash,
    /// Item appears on the map
    ItemAppear,
    /// Item collected
    ItemCollect,
    Victory,
    GameOver,
}

impl SoundEffect {
    /// The sound an event makes, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        let effect = match event {
            GameEvent::MatchStarted => Self::Start,
            GameEvent::Fire(Owner::Player) => Self::PlayerFire,
            GameEvent::Fire(Owner::Enemy(_)) => Self::EnemyFire,
            GameEvent::StructureHit(_) => Self::Ricochet,
            GameEvent::StructureDestroyed(StructureKind::Brick) => Self::BrickBreak,
            GameEvent::StructureDestroyed(_) => Self::Ricochet,
            GameEvent::HeadquartersDestroyed => Self::BaseDestroyed,
            GameEvent::PlayerHit | GameEvent::EnemyHit(_) => Self::TankHit,
            GameEvent::LifeLost | GameEvent::EnemyDestroyed(_) => Self::Explosion,
            GameEvent::ProjectilesCancelled => Self::BulletClash,
            GameEvent::ItemDropped(_) => Self::ItemAppear,
            GameEvent::ItemCollected(_) => Self::ItemCollect,
            GameEvent::ItemExpired(_) => return None,
            GameEvent::Victory => Self::Victory,
            GameEvent::Defeat => Self::GameOver,
        };
        Some(effect)
    }
}

/// Something that can make noise
pub trait AudioBackend {
    /// Start playing `effect` at `volume` (0.0 - 1.0). Must not block.
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend for headless runs: each sound becomes a trace log line
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("Playing {:?} at volume {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend available - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
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

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.play(effect, vol);
        }
    }

    /// Play whatever the last tick's events call for
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EnemyClass, ItemKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records what would have been played
    struct Recorder(Rc<RefCell<Vec<(SoundEffect, f32)>>>);

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push((effect, volume));
        }
    }

    fn recording() -> (AudioManager, Rc<RefCell<Vec<(SoundEffect, f32)>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let manager = AudioManager::new(Some(Box::new(Recorder(log.clone()))));
        (manager, log)
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Fire(Owner::Enemy(3))),
            Some(SoundEffect::EnemyFire)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::StructureDestroyed(StructureKind::Brick)),
            Some(SoundEffect::BrickBreak)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::StructureHit(StructureKind::Iron)),
            Some(SoundEffect::Ricochet)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EnemyDestroyed(EnemyClass::Fast)),
            Some(SoundEffect::Explosion)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ItemExpired(ItemKind::Gun)),
            None
        );
    }

    #[test]
    fn test_no_backend_is_silent_noop() {
        let mut manager = AudioManager::default();
        assert!(!manager.is_enabled());
        manager.play(SoundEffect::Explosion);
        manager.play_events(&[GameEvent::Victory]);
    }

    #[test]
    fn test_log_backend_enables_audio() {
        let mut manager = AudioManager::new(Some(Box::new(LogAudio)));
        assert!(manager.is_enabled());
        manager.play_events(&[GameEvent::MatchStarted, GameEvent::Defeat]);
    }

    #[test]
    fn test_play_events_uses_volume() {
        let (mut manager, log) = recording();
        manager.set_master_volume(0.5);
        manager.play_events(&[
            GameEvent::Fire(Owner::Player),
            GameEvent::ItemExpired(ItemKind::Star),
            GameEvent::HeadquartersDestroyed,
        ]);
        let played = log.borrow();
        assert_eq!(
            *played,
            vec![
                (SoundEffect::PlayerFire, 0.5),
                (SoundEffect::BaseDestroyed, 0.5)
            ]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let (mut manager, log) = recording();
        manager.set_muted(true);
        manager.play(SoundEffect::Start);
        assert!(log.borrow().is_empty());
    }
}
