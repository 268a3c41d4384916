//! Visual-only effects: particle bursts and the scrolling starfield
//!
//! These run on their own RNG so they never perturb the gameplay stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::render::{Color, rgb};
use crate::sim::{GameEvent, HitSource};

/// Particle lifetime (seconds)
pub const PARTICLE_LIFETIME: f32 = 0.75;
/// Particles per explosion
pub const EXPLOSION_PARTICLES: usize = 30;
/// Particles per hit burst
pub const HIT_PARTICLES: usize = 15;
/// Maximum live particles
pub const MAX_PARTICLES: usize = 512;
/// Background stars
pub const STAR_COUNT: usize = 100;

const EXPLOSION_COLORS: [Color; 4] = [
    rgb(255, 100, 0),
    rgb(255, 50, 0),
    rgb(255, 0, 0),
    rgb(200, 0, 0),
];

const HIT_COLORS: [Color; 4] = [
    rgb(255, 255, 0),
    rgb(255, 200, 0),
    rgb(255, 150, 0),
    rgb(255, 100, 0),
];

/// Visual particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// 1 when spawned, fades to 0
    pub life: f32,
    pub size: f32,
}

/// One background star
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    /// Fall speed (pixels/second)
    pub speed: f32,
    pub size: f32,
}

/// Particles and stars driven by simulation events
#[derive(Debug, Clone)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    bounds: Vec2,
    rng: Pcg32,
}

impl Effects {
    pub fn new(screen_width: f32, screen_height: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..screen_width),
                    rng.random_range(0.0..screen_height),
                ),
                speed: rng.random_range(20.0..90.0),
                size: rng.random_range(1.0..3.0),
            })
            .collect();
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
            stars,
            bounds: Vec2::new(screen_width, screen_height),
            rng,
        }
    }

    /// Spawn bursts for the events of one tick
    pub fn apply_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::EnemyDestroyed { pos, .. } | GameEvent::BonusDestroyed { pos, .. } => {
                    self.burst(*pos, HIT_PARTICLES, &HIT_COLORS);
                }
                GameEvent::PlayerHit { pos, source } => {
                    let count = match source {
                        HitSource::Bullet => EXPLOSION_PARTICLES,
                        HitSource::Body => EXPLOSION_PARTICLES * 2,
                    };
                    self.burst(*pos, count, &EXPLOSION_COLORS);
                }
                _ => {}
            }
        }
    }

    fn burst(&mut self, pos: Vec2, count: usize, palette: &[Color]) {
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(60.0..300.0);
            let color = palette[self.rng.random_range(0..palette.len())];
            self.particles.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                color,
                life: 1.0,
                size: self.rng.random_range(2.0..5.0),
            });
        }
    }

    /// Age particles and scroll the starfield
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.vel *= 0.96;
            p.life -= dt / PARTICLE_LIFETIME;
        }
        self.particles.retain(|p| p.life > 0.0);

        for star in &mut self.stars {
            star.pos.y += star.speed * dt;
            if star.pos.y > self.bounds.y {
                star.pos.y -= self.bounds.y;
                star.pos.x = self.rng.random_range(0.0..self.bounds.x);
            }
        }
    }

    pub fn clear_particles(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effects() -> Effects {
        Effects::new(1280.0, 720.0, 99)
    }

    #[test]
    fn test_starfield_size() {
        let fx = effects();
        assert_eq!(fx.stars.len(), STAR_COUNT);
        assert!(fx.particles.is_empty());
    }

    #[test]
    fn test_burst_sizes() {
        let mut fx = effects();
        fx.apply_events(&[GameEvent::EnemyDestroyed {
            tier: crate::sim::EnemyTier::Red,
            pos: Vec2::new(100.0, 100.0),
            value: 100,
        }]);
        assert_eq!(fx.particles.len(), HIT_PARTICLES);

        fx.apply_events(&[GameEvent::PlayerHit {
            pos: Vec2::ZERO,
            source: HitSource::Body,
        }]);
        assert_eq!(fx.particles.len(), HIT_PARTICLES + 2 * EXPLOSION_PARTICLES);
    }

    #[test]
    fn test_particles_expire() {
        let mut fx = effects();
        fx.apply_events(&[GameEvent::PlayerHit {
            pos: Vec2::ZERO,
            source: HitSource::Bullet,
        }]);
        for _ in 0..44 {
            fx.update(1.0 / 60.0);
        }
        assert_eq!(fx.particles.len(), EXPLOSION_PARTICLES);
        for _ in 0..2 {
            fx.update(1.0 / 60.0);
        }
        assert!(fx.particles.is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let mut fx = effects();
        let hit = GameEvent::PlayerHit {
            pos: Vec2::ZERO,
            source: HitSource::Body,
        };
        for _ in 0..20 {
            fx.apply_events(std::slice::from_ref(&hit));
        }
        assert_eq!(fx.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_stars_wrap() {
        let mut fx = effects();
        for _ in 0..2000 {
            fx.update(1.0 / 60.0);
        }
        assert!(fx.stars.iter().all(|s| s.pos.y >= 0.0 && s.pos.y <= 720.0));
    }
}
