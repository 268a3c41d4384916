//! Audio front-end
//!
//! The game never talks to a sound backend directly. It goes through an
//! [`AudioManager`], which checks the player's [`Options`] before forwarding
//! fire-and-forget calls to an [`AudioService`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::settings::Options;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fires
    Laser,
    /// Enemy fires
    AlienLaser,
    /// Enemy, bonus target or player blown up
    Explosion,
}

impl SoundEffect {
    /// Asset name the backend resolves
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Laser => "laser",
            SoundEffect::AlienLaser => "alien_laser",
            SoundEffect::Explosion => "explosion",
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerFired { .. } => Some(SoundEffect::Laser),
            GameEvent::EnemyFired { .. } => Some(SoundEffect::AlienLaser),
            GameEvent::EnemyDestroyed { .. }
            | GameEvent::BonusDestroyed { .. }
            | GameEvent::PlayerHit { .. } => Some(SoundEffect::Explosion),
            GameEvent::ObstacleDestroyed { .. }
            | GameEvent::EnemiesSpawned { .. }
            | GameEvent::BonusSpawned => None,
        }
    }
}

/// Sound backend. Calls are fire-and-forget.
pub trait AudioService {
    fn play(&mut self, effect: SoundEffect);
    /// Start the background loop from the beginning
    fn play_music(&mut self);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
    fn stop_music(&mut self);
}

/// Backend that plays nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioService for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
    fn play_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// A call received by [`RecordingAudio`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCall {
    Play(SoundEffect),
    PlayMusic,
    PauseMusic,
    ResumeMusic,
    StopMusic,
}

/// Backend that logs every call into a shared list
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    calls: Rc<RefCell<Vec<AudioCall>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the call log; stays valid after the backend is boxed
    pub fn log(&self) -> Rc<RefCell<Vec<AudioCall>>> {
        Rc::clone(&self.calls)
    }

    fn push(&self, call: AudioCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl AudioService for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.push(AudioCall::Play(effect));
    }
    fn play_music(&mut self) {
        self.push(AudioCall::PlayMusic);
    }
    fn pause_music(&mut self) {
        self.push(AudioCall::PauseMusic);
    }
    fn resume_music(&mut self) {
        self.push(AudioCall::ResumeMusic);
    }
    fn stop_music(&mut self) {
        self.push(AudioCall::StopMusic);
    }
}

/// Background music state as the manager last left it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioService>,
    music: MusicState,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullAudio))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioService>) -> Self {
        Self {
            backend,
            music: MusicState::Stopped,
        }
    }

    pub fn music_state(&self) -> MusicState {
        self.music
    }

    /// Play a sound effect if sound effects are enabled
    pub fn play(&mut self, effect: SoundEffect, options: &Options) {
        if options.sound_effects_enabled {
            self.backend.play(effect);
        }
    }

    /// Play the sounds belonging to a batch of simulation events
    pub fn play_events(&mut self, events: &[GameEvent], options: &Options) {
        for event in events {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect, options);
            }
        }
    }

    /// Restart the music loop from the top
    pub fn start_music(&mut self, options: &Options) {
        if !options.music_enabled {
            return;
        }
        if self.music != MusicState::Stopped {
            self.backend.stop_music();
        }
        self.backend.play_music();
        self.music = MusicState::Playing;
    }

    pub fn pause_music(&mut self) {
        if self.music == MusicState::Playing {
            self.backend.pause_music();
            self.music = MusicState::Paused;
        }
    }

    /// Continue paused music; music switched on while paused starts fresh
    pub fn resume_music(&mut self, options: &Options) {
        if !options.music_enabled {
            return;
        }
        match self.music {
            MusicState::Paused => {
                self.backend.resume_music();
                self.music = MusicState::Playing;
            }
            MusicState::Stopped => self.start_music(options),
            MusicState::Playing => {}
        }
    }

    pub fn stop_music(&mut self) {
        if self.music != MusicState::Stopped {
            self.backend.stop_music();
            self.music = MusicState::Stopped;
        }
    }

    /// Stop the music after it was switched off in the options
    pub fn sync_options(&mut self, options: &Options) {
        if !options.music_enabled {
            self.stop_music();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::HitSource;
    use glam::Vec2;

    fn recording() -> (AudioManager, Rc<RefCell<Vec<AudioCall>>>) {
        let backend = RecordingAudio::new();
        let log = backend.log();
        (AudioManager::new(Box::new(backend)), log)
    }

    #[test]
    fn test_effects_gated_by_options() {
        let (mut audio, log) = recording();
        let mut options = Options::default();
        audio.play(SoundEffect::Laser, &options);
        options.toggle_sound_effects();
        audio.play(SoundEffect::Explosion, &options);
        assert_eq!(*log.borrow(), vec![AudioCall::Play(SoundEffect::Laser)]);
    }

    #[test]
    fn test_music_lifecycle() {
        let (mut audio, log) = recording();
        let options = Options::default();
        audio.start_music(&options);
        audio.pause_music();
        audio.pause_music();
        audio.resume_music(&options);
        audio.stop_music();
        audio.stop_music();
        assert_eq!(
            *log.borrow(),
            vec![
                AudioCall::PlayMusic,
                AudioCall::PauseMusic,
                AudioCall::ResumeMusic,
                AudioCall::StopMusic,
            ]
        );
        assert_eq!(audio.music_state(), MusicState::Stopped);
    }

    #[test]
    fn test_music_disabled_never_starts() {
        let (mut audio, log) = recording();
        let mut options = Options::default();
        options.toggle_music();
        audio.start_music(&options);
        audio.resume_music(&options);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_turning_music_off_stops_it() {
        let (mut audio, log) = recording();
        let mut options = Options::default();
        audio.start_music(&options);
        options.toggle_music();
        audio.sync_options(&options);
        assert_eq!(log.borrow().last(), Some(&AudioCall::StopMusic));
    }

    #[test]
    fn test_event_sounds() {
        let (mut audio, log) = recording();
        let events = [
            GameEvent::PlayerFired { pos: Vec2::ZERO },
            GameEvent::ObstacleDestroyed { pos: Vec2::ZERO },
            GameEvent::EnemyFired { pos: Vec2::ZERO },
            GameEvent::PlayerHit {
                pos: Vec2::ZERO,
                source: HitSource::Body,
            },
        ];
        audio.play_events(&events, &Options::default());
        assert_eq!(
            *log.borrow(),
            vec![
                AudioCall::Play(SoundEffect::Laser),
                AudioCall::Play(SoundEffect::AlienLaser),
                AudioCall::Play(SoundEffect::Explosion),
            ]
        );
        assert_eq!(SoundEffect::AlienLaser.name(), "alien_laser");
    }
}
