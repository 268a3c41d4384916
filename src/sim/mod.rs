//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes from the driver as (now, dt) pairs
//! - Seeded RNG only
//! - Stable iteration order (insertion order within each pool)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entities;
pub mod formation;
pub mod pool;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, resolve};
pub use entities::{
    BonusTarget, Enemy, EnemyBullet, EnemyMotion, EnemyTier, EntityKind, ObstacleBlock, Player,
    PlayerBullet, Side,
};
pub use formation::{Formation, ObstacleShape, build_obstacles, classic_grid};
pub use pool::{Entity, Pool};
pub use rect::Rect;
pub use spawner::Spawner;
pub use state::{GameEvent, HitSource, Session, SessionClock, SessionSnapshot, SessionStats};
pub use tick::{FrameClock, TickInput, tick};
