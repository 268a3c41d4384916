//! Main menu: Start, Options, Quit

use super::{Cursor, GameContext, InputEvent, PhaseCommand, PhaseState, PhaseTransition, is_confirm};
use crate::render::{BACKGROUND, Renderer, draw_menu};
use crate::sim::{FrameClock, TickInput};

const ENTRIES: [&str; 3] = ["Start", "Options", "Quit"];

#[derive(Debug, Clone)]
pub struct MenuState {
    pub cursor: Cursor,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            cursor: Cursor::new(ENTRIES.len()),
        }
    }
}

impl PhaseState for MenuState {
    fn handle_event(&mut self, _ctx: &mut GameContext, event: InputEvent) -> Option<PhaseCommand> {
        let InputEvent::KeyDown(key) = event;
        if self.cursor.navigate(key) || !is_confirm(key) {
            return None;
        }
        match self.cursor.index {
            0 => Some(PhaseTransition::Start.into()),
            1 => Some(PhaseTransition::ViewOptions.into()),
            _ => Some(PhaseCommand::Quit),
        }
    }

    fn update(
        &mut self,
        ctx: &mut GameContext,
        _input: &TickInput,
        frame: FrameClock,
    ) -> Option<PhaseCommand> {
        ctx.effects.update(frame.dt);
        None
    }

    fn draw(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        renderer.clear(BACKGROUND);
        let entries: Vec<String> = ENTRIES.iter().map(|e| e.to_string()).collect();
        draw_menu(renderer, "SPACE INVADERS", &entries, self.cursor.index, ctx.screen());
    }

    fn enter(&mut self, _ctx: &mut GameContext) {
        self.cursor.reset();
    }
}
