//! Timed enemy waves and bonus target appearances

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::{BonusTarget, Enemy, EnemyTier, Side};
use super::pool::{Entity, Pool};
use crate::config::GameConfig;
use crate::consts::*;

/// Spawn timers, in session milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub last_enemy_spawn_ms: u64,
    pub last_bonus_spawn_ms: u64,
    /// Current gap before the next bonus target
    pub bonus_interval_ms: u64,
}

impl Spawner {
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, now_ms: u64, rng: &mut R) -> Self {
        Self {
            last_enemy_spawn_ms: now_ms,
            last_bonus_spawn_ms: now_ms,
            bonus_interval_ms: config.bonus_interval_ms.sample(rng),
        }
    }

    /// Add a wave of free-descent enemies once the spawn delay has elapsed.
    ///
    /// Returns how many enemies were added (zero before the delay is up).
    pub fn maybe_spawn_enemies<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        config: &GameConfig,
        enemies: &mut Pool<Enemy>,
        rng: &mut R,
    ) -> usize {
        if now_ms.saturating_sub(self.last_enemy_spawn_ms) < config.enemy_spawn_delay_ms {
            return 0;
        }
        self.spawn_wave(now_ms, config, enemies, rng)
    }

    /// Add a wave immediately and restart the wave timer
    pub fn spawn_wave<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        config: &GameConfig,
        enemies: &mut Pool<Enemy>,
        rng: &mut R,
    ) -> usize {
        self.last_enemy_spawn_ms = now_ms;

        let count = config.enemy_spawn_count.sample(rng) as usize;
        for _ in 0..count {
            let x = rng.random_range(ENEMY_SPAWN_MARGIN..=config.screen_width - ENEMY_SPAWN_MARGIN);
            let y = rng.random_range(ENEMY_SPAWN_Y_MIN..=ENEMY_SPAWN_Y_MAX);
            let tier = EnemyTier::random(rng);
            enemies.push(Enemy::descending(
                Vec2::new(x, y),
                tier,
                now_ms,
                config.enemy_fire_cooldown_ms,
                rng,
            ));
        }
        log::debug!("Spawned {count} enemies at t={now_ms}ms");
        count
    }

    /// Launch a bonus target from a random side once the bonus interval has
    /// elapsed. A target still on screen is replaced.
    pub fn maybe_spawn_bonus<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        config: &GameConfig,
        bonus: &mut Option<BonusTarget>,
        rng: &mut R,
    ) -> bool {
        if now_ms.saturating_sub(self.last_bonus_spawn_ms) < self.bonus_interval_ms {
            return false;
        }
        self.last_bonus_spawn_ms = now_ms;
        self.bonus_interval_ms = config.bonus_interval_ms.sample(rng);

        let side = if rng.random_bool(0.5) { Side::Left } else { Side::Right };
        if bonus.as_ref().is_some_and(|b| b.is_alive()) {
            log::debug!("Bonus target replaced before leaving the screen");
        }
        *bonus = Some(BonusTarget::new(side, config));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MovementPolicy, Span};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (GameConfig, Spawner, Pcg32) {
        let config = GameConfig::with_movement(MovementPolicy::FreeDescent);
        let mut rng = Pcg32::seed_from_u64(11);
        let spawner = Spawner::new(&config, 0, &mut rng);
        (config, spawner, rng)
    }

    #[test]
    fn test_no_enemies_before_delay() {
        let (config, mut spawner, mut rng) = setup();
        let mut enemies = Pool::new();
        assert_eq!(spawner.maybe_spawn_enemies(1999, &config, &mut enemies, &mut rng), 0);
        assert!(enemies.is_empty());
        assert_eq!(spawner.last_enemy_spawn_ms, 0);
    }

    #[test]
    fn test_wave_spawns_within_bounds() {
        let (config, mut spawner, mut rng) = setup();
        let mut enemies = Pool::new();
        let mut now = 0;
        for _ in 0..50 {
            now += config.enemy_spawn_delay_ms;
            let added = spawner.maybe_spawn_enemies(now, &config, &mut enemies, &mut rng);
            assert!(config.enemy_spawn_count.contains(added as u32));
            assert_eq!(spawner.last_enemy_spawn_ms, now);
        }
        for enemy in enemies.iter() {
            assert!(enemy.pos.x >= ENEMY_SPAWN_MARGIN);
            assert!(enemy.pos.x <= SCREEN_WIDTH - ENEMY_SPAWN_MARGIN);
            assert!(enemy.pos.y >= ENEMY_SPAWN_Y_MIN && enemy.pos.y <= ENEMY_SPAWN_Y_MAX);
            assert!(!enemy.is_formation_member());
            assert_eq!(enemy.value, enemy.tier.points());
        }
    }

    #[test]
    fn test_fixed_count_wave() {
        let (mut config, mut spawner, mut rng) = setup();
        config.enemy_spawn_count = Span::new(3, 3);
        let mut enemies = Pool::new();
        assert_eq!(spawner.maybe_spawn_enemies(2000, &config, &mut enemies, &mut rng), 3);
        assert_eq!(enemies.len(), 3);
    }

    #[test]
    fn test_bonus_interval_resets() {
        let (config, mut spawner, mut rng) = setup();
        let mut bonus = None;
        let interval = spawner.bonus_interval_ms;
        assert!(!spawner.maybe_spawn_bonus(interval - 1, &config, &mut bonus, &mut rng));
        assert!(bonus.is_none());

        assert!(spawner.maybe_spawn_bonus(interval, &config, &mut bonus, &mut rng));
        assert!(bonus.is_some());
        assert_eq!(spawner.last_bonus_spawn_ms, interval);
        assert!(config.bonus_interval_ms.contains(spawner.bonus_interval_ms));
    }

    #[test]
    fn test_bonus_replaces_existing() {
        let (config, mut spawner, mut rng) = setup();
        let mut bonus = None;
        let mut now = 0;
        for _ in 0..10 {
            now += BONUS_INTERVAL_MAX_MS;
            assert!(spawner.maybe_spawn_bonus(now, &config, &mut bonus, &mut rng));
            let b = bonus.as_ref().unwrap();
            assert!(b.pos.x == -BONUS_ENTRY_OFFSET || b.pos.x == SCREEN_WIDTH + BONUS_ENTRY_OFFSET);
        }
    }
}
