//! In-memory engine for the word/meaning matching-pairs exercise.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - plain data (words, cards, sections) and the seeded shuffler
//! - [`engine`] - scoring, error tracking, retry decks and the game state machine
//!
//! Everything is synchronous. Delays such as the error flash or the pause before
//! a section advances are owned by the caller, which drives them through
//! [`Action::CommitPendingTransition`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
