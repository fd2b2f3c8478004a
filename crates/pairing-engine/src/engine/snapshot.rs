use serde::Serialize;

use crate::{
    core::{CardRef, PairingWord, WordId, WordKey},
    engine::{ExerciseStats, GameMode, GameState, PendingTransition, Score},
};

/// Owned, read-only view of a [`GameState`] for rendering and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub is_complete: bool,
    pub current_section_index: usize,
    pub section_count: usize,
    /// Current section in prompt-column order.
    pub prompts: Vec<PairingWord>,
    /// Current section in meaning-column order.
    pub meanings: Vec<PairingWord>,
    pub matched_pairs: Vec<WordId>,
    pub error_cards: Vec<CardRef>,
    pub selected_cards: Vec<CardRef>,
    pub score: Score,
    pub base_score_for_next_retry: Option<Score>,
    pub original_total_words: usize,
    pub global_errors: Vec<WordKey>,
    pub session_errors: Vec<WordKey>,
    pub pending: Option<PendingTransition>,
    pub stats: ExerciseStats,
}

impl GameSnapshot {
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let section = state.current_section();
        Self {
            mode: state.mode(),
            is_complete: state.is_complete(),
            current_section_index: state.current_section_index(),
            section_count: state.section_count(),
            prompts: section.map(|s| s.words().to_vec()).unwrap_or_default(),
            meanings: section
                .map(|s| s.meanings().cloned().collect())
                .unwrap_or_default(),
            matched_pairs: state.matched_pairs().iter().cloned().collect(),
            error_cards: state.error_cards().iter().cloned().collect(),
            selected_cards: state.selection().cards().map(|c| c.card_ref()).collect(),
            score: state.score(),
            base_score_for_next_retry: state.base_score_for_next_retry(),
            original_total_words: state.original_total_words(),
            global_errors: state.global_errors().iter().cloned().collect(),
            session_errors: state.session_errors().iter().cloned().collect(),
            pending: state.pending(),
            stats: state.stats().clone(),
        }
    }
}

impl GameState {
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_state(self)
    }
}
