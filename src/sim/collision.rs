//! Collision resolution
//!
//! One resolution pass per tick. Every pairwise test only looks at entities
//! that are still alive at that point of the pass, so a bullet consumed by an
//! earlier test can never score a second time.

use serde::{Deserialize, Serialize};

use super::entities::{BonusTarget, Enemy, EnemyBullet, ObstacleBlock, Player, PlayerBullet};
use super::pool::{Entity, Pool};
use super::rect::Rect;
use super::state::{GameEvent, HitSource};

/// Outcome of one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionReport {
    /// Points earned this pass
    pub score_delta: u32,
    /// Set if anything damaged the player; callers take at most one life
    pub player_hit: bool,
    /// Enemies removed this pass, by bullet or by ramming the player
    pub enemies_destroyed: u32,
    pub bonus_destroyed: bool,
    pub events: Vec<GameEvent>,
}

/// Destroy every live entity in `pool` overlapping `area`, calling `on_hit`
/// for each. Returns the number destroyed.
fn destroy_overlapping<T: Entity>(
    pool: &mut Pool<T>,
    area: &Rect,
    mut on_hit: impl FnMut(&T),
) -> usize {
    let mut hits = 0;
    for item in pool.iter_mut() {
        if item.bounds().overlaps(area) {
            item.destroy();
            on_hit(&*item);
            hits += 1;
        }
    }
    hits
}

/// Resolve all collisions for this tick.
///
/// Order:
/// 1. player bullets against obstacles, then enemies, then the bonus target
/// 2. enemy bullets against obstacles, then the player
/// 3. enemy bodies against obstacles (enemy survives), then the player
pub fn resolve(
    player_bullets: &mut Pool<PlayerBullet>,
    enemy_bullets: &mut Pool<EnemyBullet>,
    enemies: &mut Pool<Enemy>,
    bonus: &mut Option<BonusTarget>,
    obstacles: &mut Pool<ObstacleBlock>,
    player: &Player,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    for bullet in player_bullets.iter_mut() {
        let area = bullet.bounds();

        let blocks = destroy_overlapping(obstacles, &area, |block| {
            report.events.push(GameEvent::ObstacleDestroyed {
                pos: block.bounds().center(),
            });
        });
        if blocks > 0 {
            bullet.destroy();
            continue;
        }

        let kills = destroy_overlapping(enemies, &area, |enemy| {
            report.score_delta += enemy.value;
            report.enemies_destroyed += 1;
            report.events.push(GameEvent::EnemyDestroyed {
                tier: enemy.tier,
                pos: enemy.pos,
                value: enemy.value,
            });
        });
        if kills > 0 {
            bullet.destroy();
            continue;
        }

        if let Some(target) = bonus.as_mut().filter(|b| b.is_alive()) {
            if target.bounds().overlaps(&area) {
                target.destroy();
                bullet.destroy();
                report.score_delta += target.value;
                report.bonus_destroyed = true;
                report.events.push(GameEvent::BonusDestroyed {
                    pos: target.pos,
                    value: target.value,
                });
            }
        }
    }

    let player_area = player.bounds();

    for bullet in enemy_bullets.iter_mut() {
        let area = bullet.bounds();

        let blocks = destroy_overlapping(obstacles, &area, |block| {
            report.events.push(GameEvent::ObstacleDestroyed {
                pos: block.bounds().center(),
            });
        });
        if blocks > 0 {
            bullet.destroy();
            continue;
        }

        if area.overlaps(&player_area) {
            bullet.destroy();
            report.player_hit = true;
            report.events.push(GameEvent::PlayerHit {
                pos: player.pos,
                source: HitSource::Bullet,
            });
        }
    }

    for enemy in enemies.iter_mut() {
        let area = enemy.bounds();

        destroy_overlapping(obstacles, &area, |block| {
            report.events.push(GameEvent::ObstacleDestroyed {
                pos: block.bounds().center(),
            });
        });

        if area.overlaps(&player_area) {
            // Ramming costs a life but is worth no points
            enemy.destroy();
            report.player_hit = true;
            report.enemies_destroyed += 1;
            report.events.push(GameEvent::PlayerHit {
                pos: enemy.pos,
                source: HitSource::Body,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, Span};
    use crate::consts::*;
    use crate::sim::entities::{EnemyTier, Side};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct World {
        player: Player,
        player_bullets: Pool<PlayerBullet>,
        enemy_bullets: Pool<EnemyBullet>,
        enemies: Pool<Enemy>,
        bonus: Option<BonusTarget>,
        obstacles: Pool<ObstacleBlock>,
        rng: Pcg32,
    }

    impl World {
        fn new() -> Self {
            Self {
                player: Player::new(&GameConfig::default()),
                player_bullets: Pool::new(),
                enemy_bullets: Pool::new(),
                enemies: Pool::new(),
                bonus: None,
                obstacles: Pool::new(),
                rng: Pcg32::seed_from_u64(5),
            }
        }

        fn enemy(&mut self, pos: Vec2, tier: EnemyTier) {
            let span = Span::new(ENEMY_FIRE_COOLDOWN_MIN_MS, ENEMY_FIRE_COOLDOWN_MAX_MS);
            let enemy = Enemy::descending(pos, tier, 0, span, &mut self.rng);
            self.enemies.push(enemy);
        }

        fn resolve(&mut self) -> CollisionReport {
            resolve(
                &mut self.player_bullets,
                &mut self.enemy_bullets,
                &mut self.enemies,
                &mut self.bonus,
                &mut self.obstacles,
                &self.player,
            )
        }
    }

    #[test]
    fn test_empty_world_is_quiet() {
        let mut world = World::new();
        let report = world.resolve();
        assert_eq!(report, CollisionReport::default());
    }

    #[test]
    fn test_player_bullet_kills_enemy_and_scores() {
        let mut world = World::new();
        let pos = Vec2::new(400.0, 200.0);
        world.enemy(pos, EnemyTier::Green);
        world.player_bullets.push(PlayerBullet::new(pos, PLAYER_BULLET_SPEED));

        let report = world.resolve();
        assert_eq!(report.score_delta, 200);
        assert_eq!(report.enemies_destroyed, 1);
        assert!(!report.player_hit);
        assert!(world.enemies.is_empty());
        assert!(world.player_bullets.is_empty());
    }

    #[test]
    fn test_obstacle_shields_enemy_behind_it() {
        let mut world = World::new();
        let pos = Vec2::new(400.0, 200.0);
        world.enemy(pos, EnemyTier::Yellow);
        world.obstacles.push(ObstacleBlock::new(pos - Vec2::splat(3.0), 6.0));
        world.player_bullets.push(PlayerBullet::new(pos, PLAYER_BULLET_SPEED));

        let report = world.resolve();
        assert_eq!(report.score_delta, 0);
        assert_eq!(report.enemies_destroyed, 0);
        assert!(world.obstacles.is_empty());
        assert!(world.player_bullets.is_empty());
        // The enemy overlapped the block too, so the block was already gone
        assert_eq!(world.enemies.len(), 1);
    }

    #[test]
    fn test_bullet_destroys_every_overlapping_enemy() {
        let mut world = World::new();
        world.enemy(Vec2::new(400.0, 200.0), EnemyTier::Red);
        world.enemy(Vec2::new(401.0, 205.0), EnemyTier::Yellow);
        world.player_bullets.push(PlayerBullet::new(Vec2::new(400.0, 200.0), PLAYER_BULLET_SPEED));

        let report = world.resolve();
        assert_eq!(report.score_delta, 400);
        assert_eq!(report.enemies_destroyed, 2);
    }

    #[test]
    fn test_consumed_bullet_skips_bonus() {
        let mut world = World::new();
        let mut target = BonusTarget::new(Side::Left, &GameConfig::default());
        target.pos = Vec2::new(400.0, 200.0);
        world.bonus = Some(target);
        world.enemy(Vec2::new(400.0, 200.0), EnemyTier::Red);
        world.player_bullets.push(PlayerBullet::new(Vec2::new(400.0, 200.0), PLAYER_BULLET_SPEED));

        let report = world.resolve();
        assert_eq!(report.score_delta, RED_POINTS);
        assert!(!report.bonus_destroyed);
        assert!(world.bonus.as_ref().is_some_and(|b| b.alive));
    }

    #[test]
    fn test_bonus_hit_scores() {
        let mut world = World::new();
        let mut target = BonusTarget::new(Side::Right, &GameConfig::default());
        target.pos = Vec2::new(640.0, BONUS_Y);
        world.bonus = Some(target);
        world
            .player_bullets
            .push(PlayerBullet::new(Vec2::new(640.0, BONUS_Y), PLAYER_BULLET_SPEED));

        let report = world.resolve();
        assert_eq!(report.score_delta, BONUS_POINTS);
        assert!(report.bonus_destroyed);
        assert!(world.bonus.as_ref().is_some_and(|b| !b.alive));
    }

    #[test]
    fn test_enemy_bullet_hits_player() {
        let mut world = World::new();
        let pos = world.player.pos;
        world.enemy_bullets.push(EnemyBullet::new(pos, ENEMY_BULLET_SPEED));
        world.enemy_bullets.push(EnemyBullet::new(pos + Vec2::X * 5.0, ENEMY_BULLET_SPEED));

        let report = world.resolve();
        assert!(report.player_hit);
        assert!(world.enemy_bullets.is_empty());
        let hits = report
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerHit { .. }))
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_enemy_bullet_blocked_by_obstacle() {
        let mut world = World::new();
        let pos = Vec2::new(300.0, 500.0);
        world.obstacles.push(ObstacleBlock::new(pos, 6.0));
        world.enemy_bullets.push(EnemyBullet::new(pos, ENEMY_BULLET_SPEED));

        let report = world.resolve();
        assert!(!report.player_hit);
        assert!(world.obstacles.is_empty());
        assert!(world.enemy_bullets.is_empty());
    }

    #[test]
    fn test_enemy_body_hits_player_without_score() {
        let mut world = World::new();
        let pos = world.player.pos;
        world.enemy(pos, EnemyTier::Yellow);

        let report = world.resolve();
        assert!(report.player_hit);
        assert_eq!(report.score_delta, 0);
        assert_eq!(report.enemies_destroyed, 1);
        assert!(world.enemies.is_empty());
    }

    #[test]
    fn test_enemy_body_erodes_obstacles_and_survives() {
        let mut world = World::new();
        let pos = Vec2::new(300.0, 400.0);
        world.enemy(pos, EnemyTier::Red);
        world.obstacles.push(ObstacleBlock::new(pos, 6.0));
        world.obstacles.push(ObstacleBlock::new(pos + Vec2::new(100.0, 0.0), 6.0));

        world.resolve();
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.obstacles.len(), 1);
    }

    #[test]
    fn test_enemy_killed_by_bullet_cannot_ram() {
        let mut world = World::new();
        let pos = world.player.pos;
        world.enemy(pos, EnemyTier::Red);
        world.player_bullets.push(PlayerBullet::new(pos, PLAYER_BULLET_SPEED));

        let report = world.resolve();
        assert_eq!(report.score_delta, RED_POINTS);
        assert!(!report.player_hit);
    }
}
