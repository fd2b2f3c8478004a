use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// Application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Use this to configure the render mode.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Called when the timer armed with [`Runtime::set_timer`] fires.
    fn on_timer(&mut self, runtime: &mut Runtime);
}
