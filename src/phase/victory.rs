//! Victory screen after the formation is cleared

use super::game_over::draw_results;
use super::{GameContext, InputEvent, Key, PhaseCommand, PhaseState, PhaseTransition, is_confirm};
use crate::render::{BACKGROUND, Renderer};

#[derive(Debug, Clone, Default)]
pub struct VictoryState;

impl PhaseState for VictoryState {
    fn handle_event(&mut self, _ctx: &mut GameContext, event: InputEvent) -> Option<PhaseCommand> {
        let InputEvent::KeyDown(key) = event;
        if key == Key::Escape {
            Some(PhaseTransition::QuitToMenu.into())
        } else if is_confirm(key) {
            Some(PhaseTransition::PlayAgain.into())
        } else {
            None
        }
    }

    fn draw(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        renderer.clear(BACKGROUND);
        draw_results(
            renderer,
            ctx,
            "VICTORY!",
            "Press ENTER to play again or ESC for the menu",
        );
    }
}
