use std::time::Duration;

use crossterm::event::Event;
use pairing_engine::{ExerciseSession, GameState, MasteryLog, PendingTransition};
use ratatui::Frame;

use crate::{
    command::play::screen::ExerciseScreen,
    tui::{App, RenderMode, Runtime},
};

const RENDER_RATE: f64 = 30.0;

/// How long each pending transition stays on screen before it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionDelays {
    pub error_flash: Duration,
    pub section_advance: Duration,
}

impl TransitionDelays {
    pub fn for_transition(self, pending: PendingTransition) -> Duration {
        match pending {
            PendingTransition::ClearErrorFlash => self.error_flash,
            PendingTransition::SectionComplete => self.section_advance,
        }
    }
}

#[derive(Debug)]
pub struct PlayApp {
    screen: ExerciseScreen,
    delays: TransitionDelays,
}

impl PlayApp {
    pub fn new(state: GameState, delays: TransitionDelays) -> Self {
        Self {
            screen: ExerciseScreen::new(state),
            delays,
        }
    }

    pub fn into_session(self) -> ExerciseSession<MasteryLog> {
        self.screen.into_session()
    }

    /// Keeps the runtime timer in step with the pending transition.
    fn schedule(&self, runtime: &mut Runtime) {
        match self.screen.pending() {
            Some(pending) if !runtime.has_timer() => {
                runtime.set_timer(self.delays.for_transition(pending));
            }
            Some(_) => {}
            None => runtime.cancel_timer(),
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::throttled_from_rate(RENDER_RATE));
        self.schedule(runtime);
    }

    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        self.screen.handle_event(&event);
        self.schedule(runtime);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn on_timer(&mut self, runtime: &mut Runtime) {
        self.screen.commit_pending();
        self.schedule(runtime);
    }
}
