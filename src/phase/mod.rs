//! Game phase state machine
//!
//! Each phase owns its input handling, per-frame update and drawing. The
//! [`Game`] manager dispatches to the current phase and performs at most one
//! transition per call, applying its side effects (session reset, session
//! clock, music, high scores).

mod game_over;
mod menu;
mod options;
mod paused;
mod playing;
mod victory;

use std::path::PathBuf;

use glam::Vec2;

pub use game_over::GameOverState;
pub use menu::MenuState;
pub use options::OptionsState;
pub use paused::PausedState;
pub use playing::PlayingState;
pub use victory::VictoryState;

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::effects::Effects;
use crate::highscores::{HighScores, Outcome, unix_now};
use crate::render::{Renderer, finish_frame};
use crate::settings::Options;
use crate::sim::{FrameClock, Session, TickInput};

/// Discrete game phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
    Victory,
    Options,
}

/// Named edges of the phase graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTransition {
    Start,
    ViewOptions,
    Back,
    Pause,
    Resume,
    QuitToMenu,
    GameOver,
    Victory,
    Restart,
    PlayAgain,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game over",
            GamePhase::Victory => "victory",
            GamePhase::Options => "options",
        }
    }

    /// Target phase of `transition`, or None if it is not legal from here
    pub fn apply(self, transition: PhaseTransition) -> Option<GamePhase> {
        use GamePhase as P;
        use PhaseTransition as T;
        match (self, transition) {
            (P::Menu, T::Start) => Some(P::Playing),
            (P::Menu, T::ViewOptions) => Some(P::Options),
            (P::Options, T::Back) => Some(P::Menu),
            (P::Playing, T::Pause) => Some(P::Paused),
            (P::Playing, T::GameOver) => Some(P::GameOver),
            (P::Playing, T::Victory) => Some(P::Victory),
            (P::Paused, T::Resume) => Some(P::Playing),
            (P::Paused, T::QuitToMenu) => Some(P::Menu),
            (P::GameOver, T::Restart) => Some(P::Playing),
            (P::GameOver, T::QuitToMenu) => Some(P::Menu),
            (P::Victory, T::PlayAgain) => Some(P::Playing),
            (P::Victory, T::QuitToMenu) => Some(P::Menu),
            _ => None,
        }
    }
}

/// What a phase asks the manager to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseCommand {
    Transition(PhaseTransition),
    /// Leave the process (only offered by the main menu)
    Quit,
}

impl From<PhaseTransition> for PhaseCommand {
    fn from(transition: PhaseTransition) -> Self {
        PhaseCommand::Transition(transition)
    }
}

/// Menu and pause keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Confirm,
    Escape,
}

/// Discrete input events (key presses); held keys arrive as [`TickInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
}

/// Everything the phases share
pub struct GameContext {
    pub session: Session,
    pub effects: Effects,
    pub options: Options,
    pub audio: AudioManager,
    pub high_scores: HighScores,
    /// Config before difficulty scaling
    pub base_config: GameConfig,
    /// Rank of the last finished session, if it made the board
    pub last_rank: Option<usize>,
    pub options_path: Option<PathBuf>,
    pub scores_path: Option<PathBuf>,
}

impl GameContext {
    pub fn screen(&self) -> Vec2 {
        Vec2::new(
            self.base_config.screen_width,
            self.base_config.screen_height,
        )
    }

    /// Write options to disk if a path is configured; failures are logged
    pub fn persist_options(&self) {
        if let Some(path) = &self.options_path {
            if let Err(err) = self.options.save(path) {
                log::warn!("Could not save options: {err}");
            }
        }
    }

    fn persist_scores(&self) {
        if let Some(path) = &self.scores_path {
            if let Err(err) = self.high_scores.save(path) {
                log::warn!("Could not save high scores: {err}");
            }
        }
    }
}

/// Behaviour of one phase
pub trait PhaseState {
    /// React to a key press
    fn handle_event(&mut self, ctx: &mut GameContext, event: InputEvent) -> Option<PhaseCommand>;

    /// Per-frame update
    fn update(
        &mut self,
        _ctx: &mut GameContext,
        _input: &TickInput,
        _frame: FrameClock,
    ) -> Option<PhaseCommand> {
        None
    }

    fn draw(&self, ctx: &GameContext, renderer: &mut dyn Renderer);

    /// Called when the phase becomes current
    fn enter(&mut self, _ctx: &mut GameContext) {}
}

/// Wrapping cursor over a fixed list of menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub index: usize,
    pub len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn up(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
    }

    pub fn down(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Move on Up/Down; returns true if the key was a navigation key
    pub fn navigate(&mut self, key: Key) -> bool {
        match key {
            Key::Up => self.up(),
            Key::Down => self.down(),
            _ => return false,
        }
        true
    }
}

/// True for the keys that activate a menu entry
pub fn is_confirm(key: Key) -> bool {
    matches!(key, Key::Confirm | Key::Fire)
}

#[derive(Default)]
struct PhaseStates {
    menu: MenuState,
    options: OptionsState,
    playing: PlayingState,
    paused: PausedState,
    game_over: GameOverState,
    victory: VictoryState,
}

/// Phase manager: owns the shared context and one state per phase
pub struct Game {
    phase: GamePhase,
    states: PhaseStates,
    ctx: GameContext,
    quit: bool,
}

impl Game {
    /// Start in the main menu. `config` must already be validated.
    pub fn new(
        config: GameConfig,
        options: Options,
        high_scores: HighScores,
        audio: AudioManager,
        seed: u64,
    ) -> Self {
        let session = Session::new(config.for_difficulty(options.difficulty), seed, 0);
        let effects = Effects::new(config.screen_width, config.screen_height, seed ^ 0x5eed);
        Self {
            phase: GamePhase::Menu,
            states: PhaseStates::default(),
            ctx: GameContext {
                session,
                effects,
                options,
                audio,
                high_scores,
                base_config: config,
                last_rank: None,
                options_path: None,
                scores_path: None,
            },
            quit: false,
        }
    }

    /// Persist options and high scores to these files as they change
    pub fn with_storage(mut self, options_path: PathBuf, scores_path: PathBuf) -> Self {
        self.ctx.options_path = Some(options_path);
        self.ctx.scores_path = Some(scores_path);
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    pub fn session(&self) -> &Session {
        &self.ctx.session
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn dispatch<R>(&mut self, f: impl FnOnce(&mut dyn PhaseState, &mut GameContext) -> R) -> R {
        let Game {
            phase, states, ctx, ..
        } = self;
        let state: &mut dyn PhaseState = match phase {
            GamePhase::Menu => &mut states.menu,
            GamePhase::Options => &mut states.options,
            GamePhase::Playing => &mut states.playing,
            GamePhase::Paused => &mut states.paused,
            GamePhase::GameOver => &mut states.game_over,
            GamePhase::Victory => &mut states.victory,
        };
        f(state, ctx)
    }

    fn current(&self) -> &dyn PhaseState {
        match self.phase {
            GamePhase::Menu => &self.states.menu,
            GamePhase::Options => &self.states.options,
            GamePhase::Playing => &self.states.playing,
            GamePhase::Paused => &self.states.paused,
            GamePhase::GameOver => &self.states.game_over,
            GamePhase::Victory => &self.states.victory,
        }
    }

    /// Feed a key press to the current phase
    pub fn handle_event(&mut self, event: InputEvent, now_ms: u64) {
        let command = self.dispatch(|state, ctx| state.handle_event(ctx, event));
        self.execute(command, now_ms);
    }

    /// Run one frame of the current phase
    pub fn update(&mut self, input: &TickInput, frame: FrameClock) {
        let command = self.dispatch(|state, ctx| state.update(ctx, input, frame));
        self.execute(command, frame.now_ms);
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.current().draw(&self.ctx, renderer);
        finish_frame(renderer, &self.ctx.options);
    }

    fn execute(&mut self, command: Option<PhaseCommand>, now_ms: u64) {
        match command {
            Some(PhaseCommand::Transition(transition)) => {
                self.transition(transition, now_ms);
            }
            Some(PhaseCommand::Quit) => {
                log::info!("Quit requested");
                self.quit = true;
            }
            None => {}
        }
    }

    /// Perform a transition if it is legal from the current phase.
    ///
    /// Returns false (and changes nothing) otherwise.
    pub fn transition(&mut self, transition: PhaseTransition, now_ms: u64) -> bool {
        let Some(next) = self.phase.apply(transition) else {
            log::warn!(
                "Ignoring {:?} while in {}",
                transition,
                self.phase.as_str()
            );
            return false;
        };

        let ctx = &mut self.ctx;
        match transition {
            PhaseTransition::Start | PhaseTransition::Restart | PhaseTransition::PlayAgain => {
                let config = ctx.base_config.for_difficulty(ctx.options.difficulty);
                ctx.session.reconfigure(config, now_ms);
                ctx.effects.clear_particles();
                ctx.audio.start_music(&ctx.options);
            }
            PhaseTransition::Pause => {
                ctx.session.suspend(now_ms);
                ctx.audio.pause_music();
            }
            PhaseTransition::Resume => {
                ctx.session.resume(now_ms);
                ctx.audio.resume_music(&ctx.options);
            }
            PhaseTransition::QuitToMenu => {
                ctx.audio.stop_music();
            }
            PhaseTransition::GameOver | PhaseTransition::Victory => {
                let outcome = if transition == PhaseTransition::Victory {
                    Outcome::Victory
                } else {
                    Outcome::GameOver
                };
                ctx.last_rank = ctx.high_scores.add_score(
                    ctx.session.score,
                    ctx.options.difficulty,
                    outcome,
                    unix_now(),
                );
                if ctx.last_rank.is_some() {
                    ctx.persist_scores();
                }
                ctx.audio.stop_music();
            }
            PhaseTransition::Back => {
                ctx.persist_options();
            }
            PhaseTransition::ViewOptions => {}
        }

        log::info!("Phase {} -> {}", self.phase.as_str(), next.as_str());
        self.phase = next;
        self.dispatch(|state, ctx| state.enter(ctx));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHASES: [GamePhase; 6] = [
        GamePhase::Menu,
        GamePhase::Playing,
        GamePhase::Paused,
        GamePhase::GameOver,
        GamePhase::Victory,
        GamePhase::Options,
    ];

    const ALL_TRANSITIONS: [PhaseTransition; 10] = [
        PhaseTransition::Start,
        PhaseTransition::ViewOptions,
        PhaseTransition::Back,
        PhaseTransition::Pause,
        PhaseTransition::Resume,
        PhaseTransition::QuitToMenu,
        PhaseTransition::GameOver,
        PhaseTransition::Victory,
        PhaseTransition::Restart,
        PhaseTransition::PlayAgain,
    ];

    #[test]
    fn test_transition_table() {
        assert_eq!(GamePhase::Menu.apply(PhaseTransition::Start), Some(GamePhase::Playing));
        assert_eq!(GamePhase::Playing.apply(PhaseTransition::Pause), Some(GamePhase::Paused));
        assert_eq!(GamePhase::Paused.apply(PhaseTransition::Resume), Some(GamePhase::Playing));
        assert_eq!(GamePhase::GameOver.apply(PhaseTransition::Restart), Some(GamePhase::Playing));
        assert_eq!(GamePhase::Victory.apply(PhaseTransition::PlayAgain), Some(GamePhase::Playing));
        assert_eq!(GamePhase::Menu.apply(PhaseTransition::Pause), None);
        assert_eq!(GamePhase::Playing.apply(PhaseTransition::Start), None);
        assert_eq!(GamePhase::Options.apply(PhaseTransition::QuitToMenu), None);
    }

    #[test]
    fn test_menu_reachable_from_every_non_playing_phase() {
        for phase in ALL_PHASES {
            if phase == GamePhase::Playing || phase == GamePhase::Menu {
                continue;
            }
            let reaches_menu = ALL_TRANSITIONS
                .iter()
                .any(|t| phase.apply(*t) == Some(GamePhase::Menu));
            assert!(reaches_menu, "{} cannot reach the menu", phase.as_str());
        }
    }

    #[test]
    fn test_only_playing_can_end_a_session() {
        for phase in ALL_PHASES {
            for t in [PhaseTransition::GameOver, PhaseTransition::Victory] {
                assert_eq!(phase.apply(t).is_some(), phase == GamePhase::Playing);
            }
        }
    }

    #[test]
    fn test_cursor_wraps() {
        let mut cursor = Cursor::new(3);
        cursor.up();
        assert_eq!(cursor.index, 2);
        cursor.down();
        assert_eq!(cursor.index, 0);
        assert!(cursor.navigate(Key::Down));
        assert!(!cursor.navigate(Key::Confirm));
        assert_eq!(cursor.index, 1);
    }

    #[test]
    fn test_illegal_transition_is_ignored() {
        let mut game = Game::new(
            GameConfig::default(),
            Options::default(),
            HighScores::new(),
            AudioManager::default(),
            1,
        );
        assert!(!game.transition(PhaseTransition::Pause, 0));
        assert_eq!(game.phase(), GamePhase::Menu);
        assert!(game.transition(PhaseTransition::Start, 0));
        assert_eq!(game.phase(), GamePhase::Playing);
    }
}
