//! Options screen reachable from the main menu

use super::{
    Cursor, GameContext, InputEvent, Key, PhaseCommand, PhaseState, PhaseTransition, is_confirm,
};
use crate::render::{BACKGROUND, Renderer, draw_menu};
use crate::settings::{Options, on_off};
use crate::sim::{FrameClock, TickInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Crt,
    Music,
    Sound,
    Fullscreen,
    Difficulty,
    Back,
}

const ENTRIES: [Entry; 6] = [
    Entry::Crt,
    Entry::Music,
    Entry::Sound,
    Entry::Fullscreen,
    Entry::Difficulty,
    Entry::Back,
];

impl Entry {
    fn label(&self, options: &Options) -> String {
        match self {
            Entry::Crt => format!("CRT Effect: {}", on_off(options.crt_effect)),
            Entry::Music => format!("Music: {}", on_off(options.music_enabled)),
            Entry::Sound => format!("Sound Effects: {}", on_off(options.sound_effects_enabled)),
            Entry::Fullscreen => format!("Fullscreen: {}", on_off(options.fullscreen)),
            Entry::Difficulty => format!("Difficulty: {}", options.difficulty.as_str()),
            Entry::Back => "Back".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptionsState {
    pub cursor: Cursor,
}

impl Default for OptionsState {
    fn default() -> Self {
        Self {
            cursor: Cursor::new(ENTRIES.len()),
        }
    }
}

impl PhaseState for OptionsState {
    fn handle_event(&mut self, ctx: &mut GameContext, event: InputEvent) -> Option<PhaseCommand> {
        let InputEvent::KeyDown(key) = event;
        if key == Key::Escape {
            return Some(PhaseTransition::Back.into());
        }
        if self.cursor.navigate(key) || !is_confirm(key) {
            return None;
        }

        let options = &mut ctx.options;
        match ENTRIES[self.cursor.index] {
            Entry::Crt => options.toggle_crt(),
            Entry::Music => {
                options.toggle_music();
                ctx.audio.sync_options(options);
            }
            Entry::Sound => options.toggle_sound_effects(),
            Entry::Fullscreen => options.toggle_fullscreen(),
            Entry::Difficulty => options.cycle_difficulty(),
            Entry::Back => return Some(PhaseTransition::Back.into()),
        }
        None
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
        let entries: Vec<String> = ENTRIES.iter().map(|e| e.label(&ctx.options)).collect();
        draw_menu(renderer, "OPTIONS", &entries, self.cursor.index, ctx.screen());
    }

    fn enter(&mut self, _ctx: &mut GameContext) {
        self.cursor.reset();
    }
}
