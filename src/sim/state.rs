//! Play session state
//!
//! A [`Session`] owns every entity collection, the score, the session clock
//! and the seeded RNG. Everything here is deterministic given the seed and
//! the sequence of (now, input) pairs fed to [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{
    BonusTarget, Enemy, EnemyBullet, EnemyTier, ObstacleBlock, Player, PlayerBullet,
};
use super::formation::{Formation, build_obstacles, classic_grid};
use super::pool::Pool;
use super::spawner::Spawner;
use crate::config::GameConfig;

/// What damaged the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSource {
    Bullet,
    /// An enemy flew into the player
    Body,
}

/// Notable things that happened during a tick, drained by the presentation
/// layer to drive audio and particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerFired { pos: Vec2 },
    EnemyFired { pos: Vec2 },
    EnemyDestroyed { tier: EnemyTier, pos: Vec2, value: u32 },
    BonusDestroyed { pos: Vec2, value: u32 },
    ObstacleDestroyed { pos: Vec2 },
    PlayerHit { pos: Vec2, source: HitSource },
    EnemiesSpawned { count: usize },
    BonusSpawned,
}

/// Session time with pauses cut out
///
/// All cooldowns and spawn timers compare against [`SessionClock::elapsed`],
/// so nothing fires "late" after the player resumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionClock {
    pub started_at_ms: u64,
    pub paused_total_ms: u64,
    pub paused_at_ms: Option<u64>,
}

impl SessionClock {
    pub fn start(now_ms: u64) -> Self {
        Self {
            started_at_ms: now_ms,
            paused_total_ms: 0,
            paused_at_ms: None,
        }
    }

    /// Milliseconds of play since the session started
    pub fn elapsed(&self, now_ms: u64) -> u64 {
        let now = self.paused_at_ms.unwrap_or(now_ms);
        now.saturating_sub(self.started_at_ms)
            .saturating_sub(self.paused_total_ms)
    }

    pub fn is_suspended(&self) -> bool {
        self.paused_at_ms.is_some()
    }

    pub fn suspend(&mut self, now_ms: u64) {
        if self.paused_at_ms.is_none() {
            self.paused_at_ms = Some(now_ms);
        }
    }

    pub fn resume(&mut self, now_ms: u64) {
        if let Some(at) = self.paused_at_ms.take() {
            self.paused_total_ms += now_ms.saturating_sub(at);
        }
    }
}

/// Running totals for the end-of-session summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub ticks: u64,
    pub shots_fired: u32,
    pub enemies_destroyed: u32,
    pub bonuses_destroyed: u32,
    pub hits_taken: u32,
}

/// One play-through, from reset to game over or victory
#[derive(Debug, Clone)]
pub struct Session {
    /// Config the session was (re)built with
    pub config: GameConfig,
    /// Seed of the very first reset, for logging and replay
    pub seed: u64,
    /// Gameplay RNG; keeps running across resets
    pub rng: Pcg32,
    pub clock: SessionClock,
    pub player: Player,
    pub player_bullets: Pool<PlayerBullet>,
    pub enemy_bullets: Pool<EnemyBullet>,
    pub enemies: Pool<Enemy>,
    /// At most one bonus target on screen
    pub bonus: Option<BonusTarget>,
    pub obstacles: Pool<ObstacleBlock>,
    pub formation: Formation,
    pub spawner: Spawner,
    pub score: u64,
    pub stats: SessionStats,
    /// Events since the last [`Session::drain_events`]
    pub events: Vec<GameEvent>,
}

impl Session {
    /// Build a fresh session. `config` must already be validated.
    pub fn new(config: GameConfig, seed: u64, now_ms: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = Spawner::new(&config, 0, &mut rng);
        let mut session = Self {
            player: Player::new(&config),
            config,
            seed,
            rng,
            clock: SessionClock::start(now_ms),
            player_bullets: Pool::new(),
            enemy_bullets: Pool::new(),
            enemies: Pool::new(),
            bonus: None,
            obstacles: Pool::new(),
            formation: Formation::new(),
            spawner,
            score: 0,
            stats: SessionStats::default(),
            events: Vec::new(),
        };
        session.populate();
        session
    }

    /// Discard every live entity and start over with full lives and zero score
    pub fn reset(&mut self, now_ms: u64) {
        self.clock = SessionClock::start(now_ms);
        self.player = Player::new(&self.config);
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.bonus = None;
        self.obstacles.clear();
        self.formation = Formation::new();
        self.spawner = Spawner::new(&self.config, 0, &mut self.rng);
        self.score = 0;
        self.stats = SessionStats::default();
        self.events.clear();
        self.populate();
    }

    /// Swap the config (e.g. after a difficulty change) and reset
    pub fn reconfigure(&mut self, config: GameConfig, now_ms: u64) {
        self.config = config;
        self.reset(now_ms);
    }

    fn populate(&mut self) {
        self.obstacles.extend(build_obstacles(&self.config));
        if self.config.movement.spawns_waves() {
            let added = self
                .spawner
                .spawn_wave(0, &self.config, &mut self.enemies, &mut self.rng);
            self.events.push(GameEvent::EnemiesSpawned { count: added });
        } else {
            self.enemies.extend(classic_grid(&self.config, 0, &mut self.rng));
        }
        log::info!(
            "Session reset: seed={}, movement={}, enemies={}, obstacle blocks={}",
            self.seed,
            self.config.movement.as_str(),
            self.enemies.len(),
            self.obstacles.len()
        );
    }

    /// Session time for a driver timestamp
    pub fn now(&self, now_ms: u64) -> u64 {
        self.clock.elapsed(now_ms)
    }

    pub fn lives(&self) -> u32 {
        self.player.lives
    }

    pub fn suspend(&mut self, now_ms: u64) {
        self.clock.suspend(now_ms);
    }

    pub fn resume(&mut self, now_ms: u64) {
        self.clock.resume(now_ms);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Serializable copy of everything gameplay-visible
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            score: self.score,
            lives: self.player.lives,
            player: self.player.clone(),
            player_bullets: self.player_bullets.clone(),
            enemy_bullets: self.enemy_bullets.clone(),
            enemies: self.enemies.clone(),
            bonus: self.bonus.clone(),
            obstacles: self.obstacles.clone(),
            formation: self.formation.clone(),
            spawner: self.spawner.clone(),
            stats: self.stats.clone(),
        }
    }
}

/// Gameplay-visible session state, for pause checks and replay comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub score: u64,
    pub lives: u32,
    pub player: Player,
    pub player_bullets: Pool<PlayerBullet>,
    pub enemy_bullets: Pool<EnemyBullet>,
    pub enemies: Pool<Enemy>,
    pub bonus: Option<BonusTarget>,
    pub obstacles: Pool<ObstacleBlock>,
    pub formation: Formation,
    pub spawner: Spawner,
    pub stats: SessionStats,
}
