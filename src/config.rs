//! Gameplay tunables
//!
//! Everything the simulation draws random values from lives here so it can be
//! validated once at startup. A `Session` assumes its config already passed
//! [`GameConfig::validate`].

use rand::Rng;
use rand::distr::uniform::SampleUniform;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::Difficulty;
use crate::sim::formation::ObstacleShape;

/// How enemies move once spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementPolicy {
    /// One shared horizontal direction, synchronized step-down on edge contact.
    /// The session starts with a full grid and clearing it wins the game.
    #[default]
    Formation,
    /// Each enemy descends on its own; the spawner keeps adding enemies and
    /// there is no victory condition.
    FreeDescent,
}

impl MovementPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementPolicy::Formation => "formation",
            MovementPolicy::FreeDescent => "free-descent",
        }
    }

    /// Whether the spawner adds timed enemy waves under this policy
    pub fn spawns_waves(&self) -> bool {
        matches!(self, MovementPolicy::FreeDescent)
    }

    /// Whether an empty enemy collection ends the session in victory
    pub fn clears_to_victory(&self) -> bool {
        matches!(self, MovementPolicy::Formation)
    }
}

/// An inclusive `[min, max]` range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T> Span<T>
where
    T: SampleUniform + PartialOrd + Copy,
{
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Draw a uniform value from the range (both ends included)
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.random_range(self.min..=self.max)
    }
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,

    pub movement: MovementPolicy,
    pub obstacle_shape: ObstacleShape,

    // === Player ===
    pub player_lives: u32,
    pub player_speed: f32,
    pub player_fire_cooldown_ms: u64,
    pub player_bullet_speed: f32,

    // === Enemies ===
    pub enemy_descent_speed: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_fire_cooldown_ms: Span<u64>,
    pub formation_speed: f32,
    pub formation_step_down: f32,

    // === Spawner ===
    pub enemy_spawn_delay_ms: u64,
    pub enemy_spawn_count: Span<u32>,
    pub bonus_interval_ms: Span<u64>,
    pub bonus_speed: f32,
    pub bonus_points: u32,

    // === Obstacles ===
    pub obstacle_amount: u32,
    pub obstacle_block_size: f32,
    pub obstacle_y: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            movement: MovementPolicy::Formation,
            obstacle_shape: ObstacleShape::Classic,

            player_lives: PLAYER_LIVES,
            player_speed: PLAYER_SPEED,
            player_fire_cooldown_ms: PLAYER_FIRE_COOLDOWN_MS,
            player_bullet_speed: PLAYER_BULLET_SPEED,

            enemy_descent_speed: ENEMY_DESCENT_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            enemy_fire_cooldown_ms: Span::new(
                ENEMY_FIRE_COOLDOWN_MIN_MS,
                ENEMY_FIRE_COOLDOWN_MAX_MS,
            ),
            formation_speed: FORMATION_SPEED,
            formation_step_down: FORMATION_STEP_DOWN,

            enemy_spawn_delay_ms: ENEMY_SPAWN_DELAY_MS,
            enemy_spawn_count: Span::new(ENEMY_SPAWN_MIN, ENEMY_SPAWN_MAX),
            bonus_interval_ms: Span::new(BONUS_INTERVAL_MIN_MS, BONUS_INTERVAL_MAX_MS),
            bonus_speed: BONUS_SPEED,
            bonus_points: BONUS_POINTS,

            obstacle_amount: OBSTACLE_AMOUNT,
            obstacle_block_size: OBSTACLE_BLOCK_SIZE,
            obstacle_y: OBSTACLE_Y,
        }
    }
}

impl GameConfig {
    /// Default config with the given movement policy
    pub fn with_movement(movement: MovementPolicy) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }

    /// Check every range and magnitude the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("player_speed", self.player_speed)?;
        positive("player_bullet_speed", self.player_bullet_speed)?;
        positive("enemy_descent_speed", self.enemy_descent_speed)?;
        positive("enemy_bullet_speed", self.enemy_bullet_speed)?;
        positive("bonus_speed", self.bonus_speed)?;
        positive("obstacle_block_size", self.obstacle_block_size)?;
        positive("formation_speed", self.formation_speed)?;
        // Zero is allowed: the formation then only reverses
        if !(self.formation_step_down >= 0.0 && self.formation_step_down.is_finite()) {
            return Err(ConfigError::Negative {
                name: "formation_step_down",
            });
        }

        if self.player_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if self.enemy_spawn_delay_ms == 0 {
            return Err(ConfigError::NonPositive {
                name: "enemy_spawn_delay_ms",
            });
        }
        if self.enemy_spawn_count.max == 0 {
            return Err(ConfigError::NonPositive {
                name: "enemy_spawn_count.max",
            });
        }

        let cooldown = self.enemy_fire_cooldown_ms;
        ordered("enemy_fire_cooldown_ms", cooldown.min as f64, cooldown.max as f64)?;
        let count = self.enemy_spawn_count;
        ordered("enemy_spawn_count", f64::from(count.min), f64::from(count.max))?;
        let bonus = self.bonus_interval_ms;
        ordered("bonus_interval_ms", bonus.min as f64, bonus.max as f64)?;

        // Spawn x is drawn from [margin, width - margin]
        if self.screen_width < 2.0 * ENEMY_SPAWN_MARGIN {
            return Err(ConfigError::InvalidRange {
                name: "enemy_spawn_x",
                min: f64::from(ENEMY_SPAWN_MARGIN),
                max: f64::from(self.screen_width - ENEMY_SPAWN_MARGIN),
            });
        }

        Ok(())
    }

    /// Apply a difficulty tier: harder tiers spawn and shoot more often
    pub fn for_difficulty(&self, difficulty: Difficulty) -> Self {
        let scale = difficulty.pace_scale();
        let scaled = |ms: u64| ((ms as f64) * scale).round().max(1.0) as u64;

        let mut config = self.clone();
        config.enemy_spawn_delay_ms = scaled(self.enemy_spawn_delay_ms);
        config.enemy_fire_cooldown_ms = Span::new(
            scaled(self.enemy_fire_cooldown_ms.min),
            scaled(self.enemy_fire_cooldown_ms.max),
        );
        config
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name })
    }
}

fn ordered(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min > max {
        Err(ConfigError::InvalidRange { name, min, max })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::with_movement(MovementPolicy::FreeDescent).validate().is_ok());
    }

    #[test]
    fn test_inverted_spawn_range_rejected() {
        let config = GameConfig {
            enemy_spawn_count: Span::new(5, 2),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRange {
                name: "enemy_spawn_count",
                min: 5.0,
                max: 2.0,
            })
        );
    }

    #[test]
    fn test_inverted_bonus_interval_rejected() {
        let config = GameConfig {
            bonus_interval_ms: Span::new(900, 100),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { name: "bonus_interval_ms", .. })
        ));
    }

    #[test]
    fn test_zero_lives_rejected() {
        let config = GameConfig {
            player_lives: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLives));
    }

    #[test]
    fn test_non_positive_speed_rejected() {
        let config = GameConfig {
            player_speed: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "player_speed" })
        );
    }

    #[test]
    fn test_non_positive_formation_speed_rejected() {
        let reversed = GameConfig {
            formation_speed: -60.0,
            ..Default::default()
        };
        assert_eq!(
            reversed.validate(),
            Err(ConfigError::NonPositive { name: "formation_speed" })
        );

        let nan_step = GameConfig {
            formation_step_down: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            nan_step.validate(),
            Err(ConfigError::Negative { name: "formation_step_down" })
        );

        let no_step = GameConfig {
            formation_step_down: 0.0,
            ..Default::default()
        };
        assert!(no_step.validate().is_ok());
    }

    #[test]
    fn test_span_sample_stays_inside() {
        let span = Span::new(750u64, 5000);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(span.contains(span.sample(&mut rng)));
        }
    }

    #[test]
    fn test_difficulty_scales_pace() {
        let base = GameConfig::default();
        let hard = base.for_difficulty(Difficulty::Hard);
        let easy = base.for_difficulty(Difficulty::Easy);
        assert!(hard.enemy_spawn_delay_ms < base.enemy_spawn_delay_ms);
        assert!(easy.enemy_spawn_delay_ms > base.enemy_spawn_delay_ms);
        assert_eq!(base.for_difficulty(Difficulty::Normal), base);
        assert!(hard.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "movement": "FreeDescent", "player_lives": 5 }"#).unwrap();
        assert_eq!(config.movement, MovementPolicy::FreeDescent);
        assert_eq!(config.player_lives, 5);
        assert_eq!(config.enemy_spawn_delay_ms, ENEMY_SPAWN_DELAY_MS);
    }
}
