use serde::{Deserialize, Serialize};

use crate::{
    core::{CardRef, WordId, WordKey},
    engine::{GameMode, Score},
};

/// Input accepted by [`GameState::dispatch`](crate::GameState::dispatch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "type", content = "card", rename_all = "camelCase")]
pub enum Action {
    /// Selects one card. Reselecting on the same side replaces the previous choice.
    Select(CardRef),
    /// Applies the [`PendingTransition`] left by the last selection, if any.
    CommitPendingTransition,
    /// Starts a retry pass over every word that was ever wrong.
    StartRetry,
    /// Reshuffles the full deck and clears all progress.
    Restart,
}

/// Deferred step the caller must commit after its own delay.
///
/// While one is pending, [`Action::Select`] is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "camelCase")]
pub enum PendingTransition {
    /// A mismatch is being shown; committing clears the error highlight.
    ClearErrorFlash,
    /// Every pair of the section is matched; committing advances or finishes.
    SectionComplete,
}

/// Observable result of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameEvent {
    PairMatched {
        word_id: WordId,
    },
    PairMismatched {
        prompt: CardRef,
        meaning: CardRef,
        key: WordKey,
        /// `true` if this key entered the session error set for the first time.
        first_error: bool,
        /// `false` for a retry decoy, which never counts as an error.
        penalized: bool,
    },
    /// First resolution of a word in this run, right or wrong.
    WordResolved {
        word_id: WordId,
        is_correct: bool,
    },
    SectionAdvanced {
        index: usize,
        total: usize,
    },
    RetryStarted {
        word_count: usize,
        decoy: Option<WordId>,
        base_score: Score,
    },
    GameComplete {
        final_score: Score,
        mode: GameMode,
    },
    Restarted {
        total_words: usize,
    },
}
