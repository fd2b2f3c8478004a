use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render after every state change.
    #[default]
    OnDirty,
    /// Render after state changes, at most once per interval.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Produces timer, render and terminal events in that priority.
#[derive(Debug)]
pub(super) struct EventLoop {
    render_mode: RenderMode,
    timer: Option<Instant>,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            render_mode: RenderMode::default(),
            timer: None,
            last_render: past_time,
            dirty: true,
        }
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Arms the timer, replacing any earlier deadline.
    pub(super) fn set_timer(&mut self, after: Duration) {
        self.timer = Some(Instant::now() + after);
    }

    pub(super) fn cancel_timer(&mut self) {
        self.timer = None;
    }

    pub(super) fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Blocks until the timer fires, a render is due or a terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(deadline) = self.timer
                && now >= deadline
            {
                self.timer = None;
                self.dirty = true;
                return Ok(TuiEvent::Timer);
            }

            let do_render = match self.render_mode {
                RenderMode::OnDirty => self.dirty,
                RenderMode::Throttled(interval) => {
                    self.dirty && now.duration_since(self.last_render) >= interval
                }
            };
            if do_render {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [self.timer, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}
