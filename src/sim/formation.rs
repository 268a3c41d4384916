//! Shared formation movement, the classic invader grid, and shield layouts

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::{Enemy, EnemyMotion, EnemyTier, ObstacleBlock};
use super::pool::{Entity, Pool};
use crate::config::GameConfig;
use crate::consts::*;

/// Horizontal direction shared by every formation member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    /// +1 moving right, -1 moving left
    pub direction: f32,
}

impl Default for Formation {
    fn default() -> Self {
        Self { direction: 1.0 }
    }
}

impl Formation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current horizontal velocity for formation members
    pub fn velocity(&self, speed: f32) -> f32 {
        self.direction * speed
    }

    /// Apply the edge rule after members have moved.
    ///
    /// When any live member touches the edge it is heading towards, the
    /// direction flips and every member steps down once. Returns true if a
    /// reversal happened this frame.
    pub fn check_edges(
        &mut self,
        enemies: &mut Pool<Enemy>,
        screen_width: f32,
        step_down: f32,
    ) -> bool {
        let members = || enemies.iter().filter(|e| e.is_formation_member());

        let hit_right =
            self.direction > 0.0 && members().any(|e| e.bounds().right() >= screen_width);
        let hit_left = self.direction < 0.0 && members().any(|e| e.bounds().left() <= 0.0);
        if !hit_right && !hit_left {
            return false;
        }

        self.direction = -self.direction;
        for enemy in enemies.iter_mut().filter(|e| e.is_formation_member()) {
            enemy.pos.y += step_down;
        }
        true
    }
}

/// Full starting grid: rows top to bottom, yellow then green then red
pub fn classic_grid<R: Rng + ?Sized>(config: &GameConfig, now_ms: u64, rng: &mut R) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity((FORMATION_ROWS * FORMATION_COLS) as usize);
    for row in 0..FORMATION_ROWS {
        let tier = EnemyTier::for_formation_row(row);
        for col in 0..FORMATION_COLS {
            // Grid cells are laid out by their top-left corner
            let corner = Vec2::new(
                FORMATION_X_OFFSET + col as f32 * FORMATION_X_SPACING,
                FORMATION_Y_OFFSET + row as f32 * FORMATION_Y_SPACING,
            );
            let pos = corner + Enemy::SIZE / 2.0;
            enemies.push(Enemy::new(
                pos,
                tier,
                EnemyMotion::Formation { row, col },
                now_ms,
                config.enemy_fire_cooldown_ms,
                rng,
            ));
        }
    }
    enemies
}

/// Shield outline, one string per row, `x` marks a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleShape {
    /// Twelve columns wide with a wide arch
    #[default]
    Classic,
    /// Eleven columns wide, symmetric
    Compact,
}

const CLASSIC_SHAPE: [&str; 7] = [
    "  xxxxxxx",
    " xxxxxxxxx",
    "xxxxxxxxxxxx",
    "xxxxxxxxxxxx",
    "xxxxxxxxxxxx",
    "xxx      xxx",
    "xx        xx",
];

const COMPACT_SHAPE: [&str; 7] = [
    "  xxxxxxx  ",
    " xxxxxxxxx ",
    "xxxxxxxxxxx",
    "xxxxxxxxxxx",
    "xxxxxxxxxxx",
    "xxx     xxx",
    "xx       xx",
];

impl ObstacleShape {
    pub fn rows(&self) -> &'static [&'static str] {
        match self {
            ObstacleShape::Classic => &CLASSIC_SHAPE,
            ObstacleShape::Compact => &COMPACT_SHAPE,
        }
    }

    /// Number of blocks in one shield
    pub fn block_count(&self) -> usize {
        self.rows()
            .iter()
            .map(|row| row.chars().filter(|&c| c == 'x').count())
            .sum()
    }
}

/// Lay out `obstacle_amount` shields evenly across the screen
pub fn build_obstacles(config: &GameConfig) -> Vec<ObstacleBlock> {
    let amount = config.obstacle_amount;
    let size = config.obstacle_block_size;
    let shape = config.obstacle_shape;

    let mut blocks = Vec::with_capacity(shape.block_count() * amount as usize);
    for i in 0..amount {
        let x_start = i as f32 * (config.screen_width / amount as f32) + config.screen_width / 15.0;
        for (row, line) in shape.rows().iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                if c != 'x' {
                    continue;
                }
                let pos = Vec2::new(
                    x_start + col as f32 * size,
                    config.obstacle_y + row as f32 * size,
                );
                blocks.push(ObstacleBlock::new(pos, size));
            }
        }
    }
    blocks
}
