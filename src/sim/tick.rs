//! Per-frame simulation step
//!
//! Advances a [`Session`] by one frame. The order is fixed: input, movement,
//! spawning, collisions, scoring, end-of-session checks.

use super::collision::resolve;
use super::entities::Enemy;
use super::pool::Entity;
use super::state::{GameEvent, Session};
use crate::phase::PhaseTransition;

/// Input commands for a single tick (held keys, sampled by the driver)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Idle/demo mode - the simulation steers and shoots by itself
    pub idle_mode: bool,
}

impl TickInput {
    /// -1 (left), 0 or +1 (right); right wins when both are held
    pub fn direction(&self) -> f32 {
        if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        }
    }
}

/// Driver-supplied timing for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    /// Monotonic wall time in milliseconds
    pub now_ms: u64,
    /// Seconds since the previous frame
    pub dt: f32,
}

impl FrameClock {
    pub fn new(now_ms: u64, dt: f32) -> Self {
        Self { now_ms, dt }
    }

    /// Clock for frame `frame` of a fixed-rate run
    pub fn fixed(frame: u64, dt: f32) -> Self {
        let now_ms = (frame as f64 * f64::from(dt) * 1000.0).round() as u64;
        Self { now_ms, dt }
    }
}

/// Horizontal distance at which the autopilot stops steering
const AUTOPILOT_DEAD_ZONE: f32 = 6.0;

/// Advance the session by one frame.
///
/// Returns `GameOver` on the frame the last life is lost, `Victory` when a
/// formation session has no enemies left, otherwise `None`.
pub fn tick(
    session: &mut Session,
    input: &TickInput,
    frame: FrameClock,
) -> Option<PhaseTransition> {
    let now = session.now(frame.now_ms);
    let dt = frame.dt;
    session.stats.ticks += 1;

    let mut input = *input;
    if input.idle_mode {
        autopilot(session, &mut input);
    }

    // 1. Player input
    let width = session.config.screen_width;
    let height = session.config.screen_height;
    session.player.advance(input.direction(), dt, width);
    session.player.recharge(now);
    if input.fire {
        if let Some(bullet) = session.player.try_fire(now, session.config.player_bullet_speed) {
            session.events.push(GameEvent::PlayerFired { pos: bullet.pos });
            session.stats.shots_fired += 1;
            session.player_bullets.push(bullet);
        }
    }

    // 2. Movement
    let config = &session.config;
    let formation_velocity = session.formation.velocity(config.formation_speed);
    for enemy in session.enemies.iter_mut() {
        enemy.advance(dt, formation_velocity, config.enemy_descent_speed, height);
    }
    session
        .formation
        .check_edges(&mut session.enemies, width, config.formation_step_down);

    for bullet in session.enemy_bullets.iter_mut() {
        bullet.advance(dt, height);
    }
    for bullet in session.player_bullets.iter_mut() {
        bullet.advance(dt);
    }
    if let Some(bonus) = session.bonus.as_mut() {
        bonus.advance(dt, width);
    }

    for enemy in session.enemies.iter_mut() {
        let fired = enemy.try_fire(
            now,
            config.enemy_fire_cooldown_ms,
            config.enemy_bullet_speed,
            &mut session.rng,
        );
        if let Some(bullet) = fired {
            session.events.push(GameEvent::EnemyFired { pos: bullet.pos });
            session.enemy_bullets.push(bullet);
        }
    }

    // 3. Spawner
    if config.movement.spawns_waves() {
        let added = session.spawner.maybe_spawn_enemies(
            now,
            config,
            &mut session.enemies,
            &mut session.rng,
        );
        if added > 0 {
            session.events.push(GameEvent::EnemiesSpawned { count: added });
        }
    }
    if session
        .spawner
        .maybe_spawn_bonus(now, config, &mut session.bonus, &mut session.rng)
    {
        session.events.push(GameEvent::BonusSpawned);
    }

    // 4. Collisions
    let report = resolve(
        &mut session.player_bullets,
        &mut session.enemy_bullets,
        &mut session.enemies,
        &mut session.bonus,
        &mut session.obstacles,
        &session.player,
    );

    // 5. Score and lives
    session.score += u64::from(report.score_delta);
    session.stats.enemies_destroyed += report.enemies_destroyed;
    if report.bonus_destroyed {
        session.stats.bonuses_destroyed += 1;
    }
    if report.player_hit {
        // One life per frame, however many things hit at once
        session.player.lives = session.player.lives.saturating_sub(1);
        session.stats.hits_taken += 1;
        log::info!("Player hit, {} lives left", session.player.lives);
    }
    session.events.extend(report.events);

    // 6. Cleanup and end-of-session checks
    session.player_bullets.compact();
    session.enemy_bullets.compact();
    session.enemies.compact();
    session.obstacles.compact();
    if session.bonus.as_ref().is_some_and(|b| !b.is_alive()) {
        session.bonus = None;
    }

    if session.player.is_dead() {
        log::info!("Game over, final score {}", session.score);
        return Some(PhaseTransition::GameOver);
    }
    if session.config.movement.clears_to_victory() && session.enemies.is_empty() {
        log::info!("All enemies cleared, final score {}", session.score);
        return Some(PhaseTransition::Victory);
    }
    None
}

/// Steer toward the lowest enemy and keep shooting
fn autopilot(session: &Session, input: &mut TickInput) {
    input.fire = true;
    input.left = false;
    input.right = false;

    let target = session
        .enemies
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|e: &Enemy| e.pos.x);
    let Some(target_x) = target else {
        return;
    };

    let dx = target_x - session.player.pos.x;
    if dx > AUTOPILOT_DEAD_ZONE {
        input.right = true;
    } else if dx < -AUTOPILOT_DEAD_ZONE {
        input.left = true;
    }
}
