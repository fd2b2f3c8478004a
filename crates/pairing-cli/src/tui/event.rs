use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The one-shot timer expired.
    Timer,
    Render,
    Crossterm(CrosstermEvent),
}
