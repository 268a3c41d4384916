//! Entity kinds: player, enemies, projectiles, bonus target, obstacle blocks
//!
//! Entities are plain data with small per-kind movement rules. Positions are
//! centres in screen pixels, except obstacle blocks which are laid out by
//! their top-left corner.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pool::Entity;
use super::rect::Rect;
use crate::config::{GameConfig, Span};
use crate::consts::*;

/// Closed set of entity kinds, used by the renderer and by events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    PlayerBullet,
    Enemy,
    EnemyBullet,
    Bonus,
    Block,
}

// === Player ===

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Horizontal speed (pixels/second)
    pub speed: f32,
    pub lives: u32,
    pub fire_cooldown_ms: u64,
    /// Session time of the last shot
    pub last_shot_ms: u64,
    /// Set once the cooldown has elapsed since the last shot
    pub ready: bool,
}

impl Player {
    pub const SIZE: Vec2 = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);

    /// Player centred at the bottom of the screen
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                config.screen_width / 2.0,
                config.screen_height - PLAYER_BOTTOM_OFFSET,
            ),
            speed: config.player_speed,
            lives: config.player_lives,
            fire_cooldown_ms: config.player_fire_cooldown_ms,
            last_shot_ms: 0,
            ready: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Self::SIZE)
    }

    /// Move horizontally. `direction` is -1 (left), 0 or +1 (right).
    ///
    /// Leaving the screen completely on one side re-enters flush against the
    /// opposite edge.
    pub fn advance(&mut self, direction: f32, dt: f32, screen_width: f32) {
        if direction == 0.0 {
            return;
        }
        self.pos.x += direction.signum() * self.speed * dt;

        let half = Self::SIZE.x / 2.0;
        let bounds = self.bounds();
        if direction > 0.0 && bounds.left() >= screen_width {
            // Left edge snaps to 0
            self.pos.x = half;
        } else if direction < 0.0 && bounds.right() <= 0.0 {
            // Right edge snaps to the screen width
            self.pos.x = screen_width - half;
        }
    }

    /// Re-arm the gun once the cooldown has elapsed
    pub fn recharge(&mut self, now_ms: u64) {
        if !self.ready && now_ms.saturating_sub(self.last_shot_ms) >= self.fire_cooldown_ms {
            self.ready = true;
        }
    }

    /// Fire if ready; otherwise nothing happens
    pub fn try_fire(&mut self, now_ms: u64, bullet_speed: f32) -> Option<PlayerBullet> {
        self.recharge(now_ms);
        if !self.ready {
            return None;
        }
        self.ready = false;
        self.last_shot_ms = now_ms;
        Some(PlayerBullet::new(self.pos, bullet_speed))
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }
}

// === Projectiles ===

/// Laser fired by the player (moves up)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBullet {
    pub pos: Vec2,
    /// Vertical velocity, always negative (pixels/second)
    pub velocity: f32,
    pub alive: bool,
}

impl PlayerBullet {
    pub const SIZE: Vec2 = Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT);

    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            velocity: -speed.abs(),
            alive: true,
        }
    }

    /// Move up; gone once it has left the top of the screen
    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.velocity * dt;
        if self.bounds().bottom() < 0.0 {
            self.alive = false;
        }
    }
}

impl Entity for PlayerBullet {
    fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Self::SIZE)
    }
    fn is_alive(&self) -> bool {
        self.alive
    }
    fn destroy(&mut self) {
        self.alive = false;
    }
}

/// Laser fired by an enemy (moves down)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub pos: Vec2,
    /// Vertical velocity, always positive (pixels/second)
    pub velocity: f32,
    pub alive: bool,
}

impl EnemyBullet {
    pub const SIZE: Vec2 = Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT);

    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            velocity: speed.abs(),
            alive: true,
        }
    }

    pub fn advance(&mut self, dt: f32, screen_height: f32) {
        self.pos.y += self.velocity * dt;
        let bounds = self.bounds();
        if bounds.bottom() < 0.0 || bounds.top() > screen_height {
            self.alive = false;
        }
    }
}

impl Entity for EnemyBullet {
    fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Self::SIZE)
    }
    fn is_alive(&self) -> bool {
        self.alive
    }
    fn destroy(&mut self) {
        self.alive = false;
    }
}

// === Enemies ===

/// Enemy colour class, which fixes its point value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyTier {
    Red,
    Green,
    Yellow,
}

impl EnemyTier {
    pub const ALL: [EnemyTier; 3] = [EnemyTier::Red, EnemyTier::Green, EnemyTier::Yellow];

    pub fn points(&self) -> u32 {
        match self {
            EnemyTier::Red => RED_POINTS,
            EnemyTier::Green => GREEN_POINTS,
            EnemyTier::Yellow => YELLOW_POINTS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyTier::Red => "red",
            EnemyTier::Green => "green",
            EnemyTier::Yellow => "yellow",
        }
    }

    /// Uniformly random tier
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Tier for a row of the classic formation (top row is worth the most)
    pub fn for_formation_row(row: u32) -> Self {
        match row {
            0 => EnemyTier::Yellow,
            1 | 2 => EnemyTier::Green,
            _ => EnemyTier::Red,
        }
    }
}

/// How an individual enemy moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyMotion {
    /// Member of the shared formation, identified by its grid cell
    Formation { row: u32, col: u32 },
    /// Independent straight descent from where it spawned
    FreeDescent { origin_y: f32, offset: f32 },
}

/// An invader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub tier: EnemyTier,
    pub value: u32,
    pub motion: EnemyMotion,
    pub last_shot_ms: u64,
    /// Re-rolled after every shot
    pub fire_cooldown_ms: u64,
    pub alive: bool,
}

impl Enemy {
    pub const SIZE: Vec2 = Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT);

    pub fn new<R: Rng + ?Sized>(
        pos: Vec2,
        tier: EnemyTier,
        motion: EnemyMotion,
        now_ms: u64,
        cooldown: Span<u64>,
        rng: &mut R,
    ) -> Self {
        Self {
            pos,
            tier,
            value: tier.points(),
            motion,
            last_shot_ms: now_ms,
            fire_cooldown_ms: cooldown.sample(rng),
            alive: true,
        }
    }

    /// Free-descent enemy spawned at `pos`
    pub fn descending<R: Rng + ?Sized>(
        pos: Vec2,
        tier: EnemyTier,
        now_ms: u64,
        cooldown: Span<u64>,
        rng: &mut R,
    ) -> Self {
        let motion = EnemyMotion::FreeDescent {
            origin_y: pos.y,
            offset: 0.0,
        };
        Self::new(pos, tier, motion, now_ms, cooldown, rng)
    }

    /// Move one step.
    ///
    /// Formation members shift by the formation's horizontal velocity; free
    /// descenders fall at `descent_speed`. Either kind is removed once its top
    /// edge passes the bottom of the screen.
    pub fn advance(
        &mut self,
        dt: f32,
        formation_velocity: f32,
        descent_speed: f32,
        screen_height: f32,
    ) {
        match &mut self.motion {
            EnemyMotion::Formation { .. } => {
                self.pos.x += formation_velocity * dt;
            }
            EnemyMotion::FreeDescent { origin_y, offset } => {
                *offset += descent_speed * dt;
                self.pos.y = *origin_y + *offset;
            }
        }
        if self.bounds().top() >= screen_height {
            self.alive = false;
        }
    }

    pub fn is_formation_member(&self) -> bool {
        matches!(self.motion, EnemyMotion::Formation { .. })
    }

    /// Fire if strictly more than the current cooldown has elapsed since the
    /// last shot; a new random cooldown is drawn for the next one.
    pub fn try_fire<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        cooldown: Span<u64>,
        bullet_speed: f32,
        rng: &mut R,
    ) -> Option<EnemyBullet> {
        if now_ms.saturating_sub(self.last_shot_ms) <= self.fire_cooldown_ms {
            return None;
        }
        self.last_shot_ms = now_ms;
        self.fire_cooldown_ms = cooldown.sample(rng);
        Some(EnemyBullet::new(self.pos, bullet_speed))
    }
}

impl Entity for Enemy {
    fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Self::SIZE)
    }
    fn is_alive(&self) -> bool {
        self.alive
    }
    fn destroy(&mut self) {
        self.alive = false;
    }
}

// === Bonus target ===

/// Screen side a bonus target enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Saucer crossing the top of the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusTarget {
    pub pos: Vec2,
    /// Horizontal velocity; positive when entering from the left
    pub velocity: f32,
    pub value: u32,
    pub alive: bool,
}

impl BonusTarget {
    pub const SIZE: Vec2 = Vec2::new(BONUS_WIDTH, BONUS_HEIGHT);

    pub fn new(side: Side, config: &GameConfig) -> Self {
        let (x, velocity) = match side {
            Side::Left => (-BONUS_ENTRY_OFFSET, config.bonus_speed),
            Side::Right => (config.screen_width + BONUS_ENTRY_OFFSET, -config.bonus_speed),
        };
        Self {
            pos: Vec2::new(x, BONUS_Y),
            velocity,
            value: config.bonus_points,
            alive: true,
        }
    }

    pub fn advance(&mut self, dt: f32, screen_width: f32) {
        self.pos.x += self.velocity * dt;
        if self.pos.x < -BONUS_EXIT_MARGIN || self.pos.x > screen_width + BONUS_EXIT_MARGIN {
            self.alive = false;
        }
    }
}

impl Entity for BonusTarget {
    fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Self::SIZE)
    }
    fn is_alive(&self) -> bool {
        self.alive
    }
    fn destroy(&mut self) {
        self.alive = false;
    }
}

// === Obstacles ===

/// One destructible cell of a shield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleBlock {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub alive: bool,
}

impl ObstacleBlock {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size,
            alive: true,
        }
    }
}

impl Entity for ObstacleBlock {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }
    fn is_alive(&self) -> bool {
        self.alive
    }
    fn destroy(&mut self) {
        self.alive = false;
    }
}
