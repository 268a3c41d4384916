//! Game over screen

use glam::Vec2;

use super::{GameContext, InputEvent, Key, PhaseCommand, PhaseState, PhaseTransition, is_confirm};
use crate::highscores::{format_age, unix_now};
use crate::render::{BACKGROUND, HIGHLIGHT, Renderer, TextAlign, WHITE, draw_text};

#[derive(Debug, Clone, Default)]
pub struct GameOverState;

impl PhaseState for GameOverState {
    fn handle_event(&mut self, _ctx: &mut GameContext, event: InputEvent) -> Option<PhaseCommand> {
        let InputEvent::KeyDown(key) = event;
        if key == Key::Escape {
            Some(PhaseTransition::QuitToMenu.into())
        } else if is_confirm(key) {
            Some(PhaseTransition::Restart.into())
        } else {
            None
        }
    }

    fn draw(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        renderer.clear(BACKGROUND);
        draw_results(
            renderer,
            ctx,
            "GAME OVER",
            "Press ENTER to restart or ESC for the menu",
        );
    }
}

/// Shared layout for the end-of-session screens
pub(super) fn draw_results(
    renderer: &mut dyn Renderer,
    ctx: &GameContext,
    title: &str,
    prompt: &str,
) {
    let center = ctx.screen() / 2.0;
    draw_text(
        renderer,
        title,
        center - Vec2::new(0.0, 120.0),
        72.0,
        WHITE,
        TextAlign::Center,
    );
    draw_text(
        renderer,
        format!("Final Score: {}", ctx.session.score),
        center - Vec2::new(0.0, 30.0),
        36.0,
        WHITE,
        TextAlign::Center,
    );
    if let Some(rank) = ctx.last_rank {
        draw_text(
            renderer,
            format!("New high score! Rank #{rank}"),
            center + Vec2::new(0.0, 20.0),
            28.0,
            HIGHLIGHT,
            TextAlign::Center,
        );
    } else if let Some(best) = ctx.high_scores.entries.first() {
        draw_text(
            renderer,
            format!(
                "Best: {} ({})",
                best.score,
                format_age(best.timestamp, unix_now())
            ),
            center + Vec2::new(0.0, 20.0),
            28.0,
            WHITE,
            TextAlign::Center,
        );
    }
    draw_text(
        renderer,
        prompt,
        center + Vec2::new(0.0, 90.0),
        24.0,
        WHITE,
        TextAlign::Center,
    );
}
