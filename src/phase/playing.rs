//! Active gameplay

use super::{GameContext, InputEvent, Key, PhaseCommand, PhaseState, PhaseTransition};
use crate::render::{Renderer, draw_session};
use crate::sim::{FrameClock, TickInput, tick};

#[derive(Debug, Clone, Default)]
pub struct PlayingState;

impl PhaseState for PlayingState {
    fn handle_event(&mut self, _ctx: &mut GameContext, event: InputEvent) -> Option<PhaseCommand> {
        match event {
            InputEvent::KeyDown(Key::Escape) => Some(PhaseTransition::Pause.into()),
            _ => None,
        }
    }

    fn update(
        &mut self,
        ctx: &mut GameContext,
        input: &TickInput,
        frame: FrameClock,
    ) -> Option<PhaseCommand> {
        let transition = tick(&mut ctx.session, input, frame);

        let events = ctx.session.drain_events();
        ctx.audio.play_events(&events, &ctx.options);
        ctx.effects.apply_events(&events);
        ctx.effects.update(frame.dt);

        transition.map(PhaseCommand::Transition)
    }

    fn draw(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        draw_session(renderer, &ctx.session, &ctx.effects);
    }
}
