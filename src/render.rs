//! Renderer interface and scene drawing
//!
//! The core only pushes draw calls; it never reads anything back. A real
//! frontend implements [`Renderer`] on top of its graphics API; the headless
//! [`DrawList`] records commands for the native driver and for tests.

use glam::Vec2;

use crate::effects::Effects;
use crate::settings::Options;
use crate::sim::{EnemyTier, Entity, EntityKind, Session};

/// RGBA color, components in 0-1
pub type Color = [f32; 4];

/// Opaque color from 8-bit channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

pub const WHITE: Color = rgb(255, 255, 255);
pub const BACKGROUND: Color = rgb(30, 30, 30);
pub const PLAYER_COLOR: Color = rgb(80, 220, 100);
pub const LASER_COLOR: Color = rgb(255, 255, 255);
pub const ALIEN_LASER_COLOR: Color = rgb(255, 80, 80);
pub const BONUS_COLOR: Color = rgb(220, 60, 220);
pub const OBSTACLE_COLOR: Color = rgb(241, 79, 80);
pub const HIGHLIGHT: Color = rgb(255, 215, 0);

pub fn tier_color(tier: EnemyTier) -> Color {
    match tier {
        EnemyTier::Red => rgb(240, 60, 60),
        EnemyTier::Green => rgb(60, 200, 90),
        EnemyTier::Yellow => rgb(240, 220, 60),
    }
}

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A single draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    /// Game entity, positioned by its centre
    Entity {
        kind: EntityKind,
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    /// Untyped square (particles, stars, menu backdrops)
    Quad { pos: Vec2, size: f32, color: Color },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        align: TextAlign,
    },
    /// Scanline overlay on top of everything drawn so far
    CrtOverlay,
}

/// Draw sink implemented by the presentation layer
pub trait Renderer {
    fn submit(&mut self, command: DrawCommand);

    fn clear(&mut self, color: Color) {
        self.submit(DrawCommand::Clear(color));
    }

    fn entity(&mut self, kind: EntityKind, pos: Vec2, size: Vec2, color: Color) {
        self.submit(DrawCommand::Entity {
            kind,
            pos,
            size,
            color,
        });
    }

    fn quad(&mut self, pos: Vec2, size: f32, color: Color) {
        self.submit(DrawCommand::Quad { pos, size, color });
    }

    fn crt_overlay(&mut self) {
        self.submit(DrawCommand::CrtOverlay);
    }
}

/// Headless renderer that records every command of a frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of entity draws of one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Entity { kind: k, .. } if *k == kind))
            .count()
    }

    /// All text drawn this frame
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

impl Renderer for DrawList {
    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Text helper usable through `&mut dyn Renderer`
pub fn draw_text(
    renderer: &mut dyn Renderer,
    text: impl Into<String>,
    pos: Vec2,
    size: f32,
    color: Color,
    align: TextAlign,
) {
    renderer.submit(DrawCommand::Text {
        text: text.into(),
        pos,
        size,
        color,
        align,
    });
}

/// Background, entities, particles and HUD for a session in progress
pub fn draw_session(renderer: &mut dyn Renderer, session: &Session, effects: &Effects) {
    renderer.clear(BACKGROUND);

    for star in &effects.stars {
        renderer.quad(star.pos, star.size, WHITE);
    }

    for block in session.obstacles.iter() {
        let bounds = block.bounds();
        renderer.entity(EntityKind::Block, bounds.center(), bounds.size, OBSTACLE_COLOR);
    }
    for enemy in session.enemies.iter() {
        let bounds = enemy.bounds();
        renderer.entity(EntityKind::Enemy, enemy.pos, bounds.size, tier_color(enemy.tier));
    }
    if let Some(bonus) = session.bonus.as_ref().filter(|b| b.is_alive()) {
        renderer.entity(EntityKind::Bonus, bonus.pos, bonus.bounds().size, BONUS_COLOR);
    }
    for bullet in session.enemy_bullets.iter() {
        renderer.entity(
            EntityKind::EnemyBullet,
            bullet.pos,
            bullet.bounds().size,
            ALIEN_LASER_COLOR,
        );
    }
    for bullet in session.player_bullets.iter() {
        renderer.entity(EntityKind::PlayerBullet, bullet.pos, bullet.bounds().size, LASER_COLOR);
    }
    let player = &session.player;
    renderer.entity(EntityKind::Player, player.pos, player.bounds().size, PLAYER_COLOR);

    for p in &effects.particles {
        let mut color = p.color;
        color[3] = p.life.clamp(0.0, 1.0);
        renderer.quad(p.pos, p.size, color);
    }

    draw_hud(renderer, session);
}

/// Score top-left, lives top-right
pub fn draw_hud(renderer: &mut dyn Renderer, session: &Session) {
    let width = session.config.screen_width;
    draw_text(
        renderer,
        format!("SCORE: {}", session.score),
        Vec2::new(20.0, 20.0),
        28.0,
        WHITE,
        TextAlign::Left,
    );
    draw_text(
        renderer,
        format!("LIVES: {}", session.lives()),
        Vec2::new(width - 20.0, 20.0),
        28.0,
        WHITE,
        TextAlign::Right,
    );
}

/// Title plus a vertical list of entries, the selected one highlighted
pub fn draw_menu(
    renderer: &mut dyn Renderer,
    title: &str,
    entries: &[String],
    selected: usize,
    screen: Vec2,
) {
    draw_text(
        renderer,
        title,
        Vec2::new(screen.x / 2.0, screen.y / 4.0),
        64.0,
        WHITE,
        TextAlign::Center,
    );
    let top = screen.y / 2.0 - 30.0 * entries.len() as f32 / 2.0;
    for (i, entry) in entries.iter().enumerate() {
        let (label, color) = if i == selected {
            (format!("> {entry} <"), HIGHLIGHT)
        } else {
            (entry.clone(), WHITE)
        };
        draw_text(
            renderer,
            label,
            Vec2::new(screen.x / 2.0, top + i as f32 * 50.0),
            32.0,
            color,
            TextAlign::Center,
        );
    }
}

/// Scanlines on top of the finished frame when the CRT option is on
pub fn finish_frame(renderer: &mut dyn Renderer, options: &Options) {
    if options.crt_effect {
        renderer.crt_overlay();
    }
}
