//! Pause menu drawn over the frozen playfield

use super::{
    Cursor, GameContext, InputEvent, Key, PhaseCommand, PhaseState, PhaseTransition, is_confirm,
};
use crate::render::{Renderer, draw_menu, draw_session};
use crate::settings::{Options, on_off};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Resume,
    Crt,
    Music,
    Sound,
    QuitToMenu,
}

const ENTRIES: [Entry; 5] = [
    Entry::Resume,
    Entry::Crt,
    Entry::Music,
    Entry::Sound,
    Entry::QuitToMenu,
];

impl Entry {
    fn label(&self, options: &Options) -> String {
        match self {
            Entry::Resume => "Resume".to_string(),
            Entry::Crt => format!("CRT Effect: {}", on_off(options.crt_effect)),
            Entry::Music => format!("Music: {}", on_off(options.music_enabled)),
            Entry::Sound => format!("Sound Effects: {}", on_off(options.sound_effects_enabled)),
            Entry::QuitToMenu => "Quit to Menu".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PausedState {
    pub cursor: Cursor,
}

impl Default for PausedState {
    fn default() -> Self {
        Self {
            cursor: Cursor::new(ENTRIES.len()),
        }
    }
}

impl PhaseState for PausedState {
    fn handle_event(&mut self, ctx: &mut GameContext, event: InputEvent) -> Option<PhaseCommand> {
        let InputEvent::KeyDown(key) = event;
        if key == Key::Escape {
            return Some(PhaseTransition::Resume.into());
        }
        if self.cursor.navigate(key) || !is_confirm(key) {
            return None;
        }

        match ENTRIES[self.cursor.index] {
            Entry::Resume => return Some(PhaseTransition::Resume.into()),
            Entry::Crt => ctx.options.toggle_crt(),
            Entry::Music => {
                ctx.options.toggle_music();
                ctx.audio.sync_options(&ctx.options);
            }
            Entry::Sound => ctx.options.toggle_sound_effects(),
            Entry::QuitToMenu => return Some(PhaseTransition::QuitToMenu.into()),
        }
        ctx.persist_options();
        None
    }

    fn draw(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        draw_session(renderer, &ctx.session, &ctx.effects);
        let entries: Vec<String> = ENTRIES.iter().map(|e| e.label(&ctx.options)).collect();
        draw_menu(renderer, "PAUSED", &entries, self.cursor.index, ctx.screen());
    }

    fn enter(&mut self, _ctx: &mut GameContext) {
        self.cursor.reset();
    }
}
