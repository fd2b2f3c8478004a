//! Exercise logic built on top of [`crate::core`].
//!
//! - [`compute_score`] / [`Score`] - penalty scoring against the original deck size
//! - [`ErrorSet`] - word-level error tracking, session and accumulative
//! - [`build_retry_deck`] - corrective deck of historically wrong words
//! - [`GameState`] - the state machine, driven through [`GameState::dispatch`]
//! - [`ExerciseSession`] - a state plus an [`ExerciseObserver`] receiving results
//! - [`GameSnapshot`] / [`MasteryReport`] - read-only views for rendering and persistence
//!
//! # Game Flow
//!
//! 1. Build a [`GameState`] from the full deck; it is shuffled and split into sections
//! 2. Dispatch [`Action::Select`] for one prompt card and one meaning card
//! 3. A match or mismatch may leave a [`PendingTransition`]; after its own delay the
//!    caller dispatches [`Action::CommitPendingTransition`]
//! 4. When the last section is cleared the state is complete
//! 5. [`Action::StartRetry`] replays only the words that were ever wrong
//!
//! # Example
//!
//! ```
//! use pairing_engine::{Action, CardRef, GameConfig, GameState, PairingWord};
//!
//! let words = vec![
//!     PairingWord::new("1", "k1", "山", "mountain"),
//!     PairingWord::new("2", "k2", "川", "river"),
//! ];
//! let mut state = GameState::new(words, GameConfig::default());
//!
//! state.dispatch(Action::Select(CardRef::prompt("1")));
//! state.dispatch(Action::Select(CardRef::meaning("1")));
//! state.dispatch(Action::Select(CardRef::prompt("2")));
//! state.dispatch(Action::Select(CardRef::meaning("2")));
//! state.dispatch(Action::CommitPendingTransition);
//!
//! assert!(state.is_complete());
//! assert_eq!(state.score().value(), 100);
//! ```

pub use self::{
    action::*, config::*, game_state::*, mastery::*, retry::*, score::*, session::*,
    snapshot::*, stats::*, word_errors::*,
};

mod action;
mod config;
mod game_state;
mod mastery;
mod retry;
mod score;
mod session;
mod snapshot;
mod stats;
mod word_errors;
