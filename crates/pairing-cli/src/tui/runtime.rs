use std::{io, time::Duration};

use super::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Terminal event loop hosting an [`App`].
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Schedules [`App::on_timer`] after `after`. Only one timer is armed at a time.
    pub fn set_timer(&mut self, after: Duration) {
        self.events.set_timer(after);
    }

    pub fn cancel_timer(&mut self) {
        self.events.cancel_timer();
    }

    #[must_use]
    pub fn has_timer(&self) -> bool {
        self.events.has_timer()
    }

    /// Runs `app` until [`App::should_exit`] returns `true`.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Timer => app.on_timer(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
