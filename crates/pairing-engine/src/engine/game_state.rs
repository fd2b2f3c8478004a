use std::{
    collections::{BTreeMap, BTreeSet, btree_map::Entry},
    mem,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::{
    core::{
        CardRef, DeckSeed, DeckShuffler, PairingWord, Section, SelectedCard, Selection, WordId,
        partition_into_sections,
    },
    engine::{
        Action, ErrorSet, ExerciseStats, GameConfig, GameEvent, PendingTransition, RecordedError,
        Score, accumulative_score, build_retry_deck, compute_score, record_error,
    },
};

/// Which deck the current pass is drawn from.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Every word of the deck.
    #[default]
    #[display("normal")]
    Normal,
    /// Only words that were ever wrong, plus an occasional decoy.
    #[display("retry")]
    Retry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GamePhase {
    Playing(GameMode),
    Complete,
}

/// Complete state of one matching exercise.
///
/// All mutation goes through [`GameState::dispatch`]. Invalid input (a card that
/// is not on the board, an already matched pair, a selection during a pending
/// transition) is ignored and logged at `debug` level.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    shuffler: DeckShuffler,
    deck: Vec<PairingWord>,
    mode: GameMode,
    is_complete: bool,
    sections: Vec<Section>,
    current_section_index: usize,
    matched_pairs: BTreeSet<WordId>,
    selection: Selection,
    error_cards: BTreeSet<CardRef>,
    session_errors: ErrorSet,
    global_errors: ErrorSet,
    score: Score,
    base_score_for_next_retry: Option<Score>,
    original_total_words: usize,
    pending: Option<PendingTransition>,
    first_attempts: BTreeMap<WordId, bool>,
    decoys: BTreeSet<WordId>,
    stats: ExerciseStats,
}

impl GameState {
    /// Starts a normal pass over `words` with a randomly seeded shuffler.
    #[must_use]
    pub fn new(words: Vec<PairingWord>, config: GameConfig) -> Self {
        Self::with_shuffler(words, config, DeckShuffler::new())
    }

    /// Like [`GameState::new`] but reproducible.
    #[must_use]
    pub fn with_seed(words: Vec<PairingWord>, config: GameConfig, seed: DeckSeed) -> Self {
        Self::with_shuffler(words, config, DeckShuffler::with_seed(seed))
    }

    #[must_use]
    pub fn with_shuffler(
        words: Vec<PairingWord>,
        config: GameConfig,
        shuffler: DeckShuffler,
    ) -> Self {
        let mut state = Self {
            config,
            shuffler,
            deck: dedup_by_id(words),
            mode: GameMode::Normal,
            is_complete: false,
            sections: Vec::new(),
            current_section_index: 0,
            matched_pairs: BTreeSet::new(),
            selection: Selection::new(),
            error_cards: BTreeSet::new(),
            session_errors: ErrorSet::new(),
            global_errors: ErrorSet::new(),
            score: Score::PERFECT,
            base_score_for_next_retry: None,
            original_total_words: 0,
            pending: None,
            first_attempts: BTreeMap::new(),
            decoys: BTreeSet::new(),
            stats: ExerciseStats::new(),
        };
        state.start_fresh();
        state
    }

    /// Applies `action` and returns what happened.
    ///
    /// An action that is not applicable in the current state returns no events
    /// and leaves the state untouched.
    pub fn dispatch(&mut self, action: Action) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match action {
            Action::Select(card) => self.select(&card, &mut events),
            Action::CommitPendingTransition => self.commit_pending_transition(&mut events),
            Action::StartRetry => self.start_retry(&mut events),
            Action::Restart => self.restart(&mut events),
        }
        events
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Full deck in its shuffled order.
    #[must_use]
    pub fn words(&self) -> &[PairingWord] {
        &self.deck
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        if self.is_complete {
            GamePhase::Complete
        } else {
            GamePhase::Playing(self.mode)
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn current_section_index(&self) -> usize {
        self.current_section_index
    }

    /// `None` only for an empty deck.
    #[must_use]
    pub fn current_section(&self) -> Option<&Section> {
        self.sections.get(self.current_section_index)
    }

    /// Ids matched in the current section.
    #[must_use]
    pub fn matched_pairs(&self) -> &BTreeSet<WordId> {
        &self.matched_pairs
    }

    #[must_use]
    pub fn is_matched(&self, id: &WordId) -> bool {
        self.matched_pairs.contains(id)
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Cards flagged by the last mismatch, until the flash is committed.
    #[must_use]
    pub fn error_cards(&self) -> &BTreeSet<CardRef> {
        &self.error_cards
    }

    #[must_use]
    pub fn is_error_card(&self, card: &CardRef) -> bool {
        self.error_cards.contains(card)
    }

    /// Errors of the current section, not yet merged into [`Self::global_errors`].
    #[must_use]
    pub fn session_errors(&self) -> &ErrorSet {
        &self.session_errors
    }

    /// Every word that erred since the last restart.
    #[must_use]
    pub fn global_errors(&self) -> &ErrorSet {
        &self.global_errors
    }

    /// The set the score is computed from.
    #[must_use]
    pub fn effective_errors(&self) -> ErrorSet {
        self.global_errors.union(&self.session_errors)
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Score at the moment the current retry pass was entered.
    #[must_use]
    pub fn base_score_for_next_retry(&self) -> Option<Score> {
        self.base_score_for_next_retry
    }

    #[must_use]
    pub fn original_total_words(&self) -> usize {
        self.original_total_words
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingTransition> {
        self.pending
    }

    /// `true` while a pending transition blocks selections.
    #[must_use]
    pub fn is_input_locked(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn can_retry(&self) -> bool {
        self.is_complete && !self.global_errors.is_empty()
    }

    #[must_use]
    pub fn is_decoy(&self, id: &WordId) -> bool {
        self.decoys.contains(id)
    }

    /// Whether `id` has been reported through [`GameEvent::WordResolved`].
    #[must_use]
    pub fn is_resolved(&self, id: &WordId) -> bool {
        self.first_attempts.contains_key(id)
    }

    /// Result reported for `id` the first time it was resolved, if it has been.
    ///
    /// Tracked per word, so two words sharing prompt text keep separate results.
    #[must_use]
    pub fn first_attempt(&self, id: &WordId) -> Option<bool> {
        self.first_attempts.get(id).copied()
    }

    #[must_use]
    pub fn stats(&self) -> &ExerciseStats {
        &self.stats
    }

    fn start_fresh(&mut self) {
        self.deck = self.shuffler.shuffle(mem::take(&mut self.deck));
        self.original_total_words = self.deck.len();
        self.sections = build_sections(&self.deck, &self.config, &mut self.shuffler);
        self.mode = GameMode::Normal;
        self.is_complete = self.deck.is_empty();
        self.global_errors.clear();
        self.score = Score::PERFECT;
        self.base_score_for_next_retry = None;
        self.first_attempts.clear();
        self.decoys.clear();
        self.stats = ExerciseStats::new();
        self.reset_pass();

        if self.is_complete {
            info!("empty deck, exercise is complete");
        } else {
            debug!(
                words = self.original_total_words,
                sections = self.sections.len(),
                "exercise started"
            );
        }
    }

    fn reset_pass(&mut self) {
        self.current_section_index = 0;
        self.matched_pairs.clear();
        self.selection.clear();
        self.error_cards.clear();
        self.session_errors.clear();
        self.pending = None;
    }

    fn select(&mut self, card: &CardRef, events: &mut Vec<GameEvent>) {
        if self.is_complete {
            debug!(%card, "selection ignored, exercise complete");
            return;
        }
        if let Some(pending) = self.pending {
            debug!(%card, ?pending, "selection ignored, transition pending");
            return;
        }
        if self.matched_pairs.contains(&card.word_id) {
            debug!(%card, "selection ignored, already matched");
            return;
        }
        let Some(word) = self
            .current_section()
            .and_then(|section| section.word(&card.word_id))
            .cloned()
        else {
            debug!(%card, "selection ignored, not in current section");
            return;
        };

        if let Some(replaced) = self.selection.select(SelectedCard::new(word, card.side)) {
            trace!(replaced = %replaced.card_ref(), %card, "selection replaced");
        }
        if let Some((prompt, meaning)) = self.selection.take_pair() {
            if prompt.word().id == meaning.word().id {
                self.resolve_match(prompt.into_word(), events);
            } else {
                self.resolve_mismatch(&prompt, &meaning, events);
            }
        }
    }

    fn resolve_match(&mut self, word: PairingWord, events: &mut Vec<GameEvent>) {
        self.matched_pairs.insert(word.id.clone());
        self.stats.record_match();
        debug!(word_id = %word.id, "pair matched");
        events.push(GameEvent::PairMatched {
            word_id: word.id.clone(),
        });
        self.report_first_resolution(&word.id, true, events);

        let section_len = self.current_section().map_or(0, Section::len);
        if self.matched_pairs.len() >= section_len {
            debug!(section = self.current_section_index, "section cleared");
            self.pending = Some(PendingTransition::SectionComplete);
        }
    }

    fn resolve_mismatch(
        &mut self,
        prompt: &SelectedCard,
        meaning: &SelectedCard,
        events: &mut Vec<GameEvent>,
    ) {
        self.stats.record_mismatch();
        let key = prompt.word().key();
        let penalized = !self.decoys.contains(&prompt.word().id);

        let first_error = if penalized {
            let RecordedError {
                updated,
                is_first_error,
            } = record_error(&self.session_errors, &key);
            self.session_errors = updated;
            self.score = accumulative_score(
                &self.global_errors,
                &self.session_errors,
                self.original_total_words,
            );
            is_first_error
        } else {
            false
        };
        debug!(
            prompt = %prompt.card_ref(),
            meaning = %meaning.card_ref(),
            %key,
            first_error,
            penalized,
            score = %self.score,
            "pair mismatched"
        );

        self.error_cards = BTreeSet::from([prompt.card_ref(), meaning.card_ref()]);
        self.pending = Some(PendingTransition::ClearErrorFlash);
        events.push(GameEvent::PairMismatched {
            prompt: prompt.card_ref(),
            meaning: meaning.card_ref(),
            key,
            first_error,
            penalized,
        });
        if penalized {
            self.report_first_resolution(&prompt.word().id, false, events);
        }
    }

    fn report_first_resolution(
        &mut self,
        id: &WordId,
        is_correct: bool,
        events: &mut Vec<GameEvent>,
    ) {
        if let Entry::Vacant(entry) = self.first_attempts.entry(id.clone()) {
            entry.insert(is_correct);
            events.push(GameEvent::WordResolved {
                word_id: id.clone(),
                is_correct,
            });
        }
    }

    fn commit_pending_transition(&mut self, events: &mut Vec<GameEvent>) {
        let Some(pending) = self.pending.take() else {
            trace!("nothing to commit");
            return;
        };
        match pending {
            PendingTransition::ClearErrorFlash => self.error_cards.clear(),
            PendingTransition::SectionComplete => self.complete_section(events),
        }
    }

    fn complete_section(&mut self, events: &mut Vec<GameEvent>) {
        self.global_errors.merge(&self.session_errors);
        self.session_errors.clear();
        self.selection.clear();
        self.error_cards.clear();
        self.stats.record_section_cleared();

        let next = self.current_section_index + 1;
        if next < self.sections.len() {
            self.current_section_index = next;
            self.matched_pairs.clear();
            info!(section = next + 1, total = self.sections.len(), "section advanced");
            events.push(GameEvent::SectionAdvanced {
                index: next,
                total: self.sections.len(),
            });
        } else {
            self.finish(events);
        }
    }

    fn finish(&mut self, events: &mut Vec<GameEvent>) {
        self.score = compute_score(self.global_errors.len(), self.original_total_words);
        self.is_complete = true;
        if self.mode.is_retry() {
            self.stats.record_retry_pass();
        }
        info!(
            mode = %self.mode,
            score = %self.score,
            wrong_words = self.global_errors.len(),
            "exercise complete"
        );
        events.push(GameEvent::GameComplete {
            final_score: self.score,
            mode: self.mode,
        });
    }

    fn start_retry(&mut self, events: &mut Vec<GameEvent>) {
        if !self.is_complete {
            debug!("retry ignored, exercise in progress");
            return;
        }
        if self.global_errors.is_empty() {
            debug!("retry ignored, no wrong words");
            return;
        }

        let base_score = self.score;
        let retry = build_retry_deck(&self.deck, &self.global_errors, &mut self.shuffler);
        let decoy = retry.decoy().cloned();
        let word_count = retry.len();

        self.decoys = decoy.iter().cloned().collect();
        self.sections = build_sections(retry.words(), &self.config, &mut self.shuffler);
        self.base_score_for_next_retry = Some(base_score);
        self.score = base_score;
        self.mode = GameMode::Retry;
        self.is_complete = false;
        self.reset_pass();

        info!(
            words = word_count,
            decoy = ?decoy,
            base_score = %base_score,
            "retry started"
        );
        events.push(GameEvent::RetryStarted {
            word_count,
            decoy,
            base_score,
        });
    }

    fn restart(&mut self, events: &mut Vec<GameEvent>) {
        self.start_fresh();
        info!(words = self.original_total_words, "exercise restarted");
        events.push(GameEvent::Restarted {
            total_words: self.original_total_words,
        });
        if self.is_complete {
            events.push(GameEvent::GameComplete {
                final_score: self.score,
                mode: self.mode,
            });
        }
    }
}

/// Applies `action` to an owned state, returning the new state and its events.
#[must_use]
pub fn reduce(mut state: GameState, action: Action) -> (GameState, Vec<GameEvent>) {
    let events = state.dispatch(action);
    (state, events)
}

fn build_sections(
    words: &[PairingWord],
    config: &GameConfig,
    shuffler: &mut DeckShuffler,
) -> Vec<Section> {
    partition_into_sections(words, config.section_size())
        .into_iter()
        .map(|chunk| Section::new(chunk, shuffler))
        .collect()
}

fn dedup_by_id(words: Vec<PairingWord>) -> Vec<PairingWord> {
    let mut seen = BTreeSet::new();
    words
        .into_iter()
        .filter(|word| {
            let fresh = seen.insert(word.id.clone());
            if !fresh {
                warn!(word_id = %word.id, "dropping word with duplicate id");
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::core::{CardSide, WordKey};

    fn words(n: usize) -> Vec<PairingWord> {
        (0..n)
            .map(|i| {
                PairingWord::new(
                    format!("w{i}"),
                    format!("k{}", i / 2),
                    format!("word{i}"),
                    format!("meaning{i}"),
                )
            })
            .collect()
    }

    fn state(n: usize, section_size: usize) -> GameState {
        GameState::with_seed(
            words(n),
            GameConfig::new(section_size),
            DeckSeed::from_bytes([7; 16]),
        )
    }

    fn section_ids(state: &GameState) -> Vec<WordId> {
        state
            .current_section()
            .unwrap()
            .words()
            .iter()
            .map(|w| w.id.clone())
            .collect()
    }

    fn match_pair(state: &mut GameState, id: &WordId) -> Vec<GameEvent> {
        let mut events = state.dispatch(Action::Select(CardRef::prompt(id.clone())));
        events.extend(state.dispatch(Action::Select(CardRef::meaning(id.clone()))));
        events
    }

    fn mismatch(state: &mut GameState, prompt: &WordId, meaning: &WordId) -> Vec<GameEvent> {
        let mut events = state.dispatch(Action::Select(CardRef::prompt(prompt.clone())));
        events.extend(state.dispatch(Action::Select(CardRef::meaning(meaning.clone()))));
        events.extend(state.dispatch(Action::CommitPendingTransition));
        events
    }

    /// Matches every remaining pair of the current section and commits.
    fn clear_section(state: &mut GameState) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for id in section_ids(state) {
            if !state.is_matched(&id) {
                events.extend(match_pair(state, &id));
            }
        }
        events.extend(state.dispatch(Action::CommitPendingTransition));
        events
    }

    fn key_of(state: &GameState, id: &WordId) -> WordKey {
        state.words().iter().find(|w| &w.id == id).unwrap().key()
    }

    #[test]
    fn test_perfect_run() {
        let mut state = state(5, 5);
        assert_eq!(state.section_count(), 1);
        assert_eq!(state.phase(), GamePhase::Playing(GameMode::Normal));

        let events = clear_section(&mut state);

        assert!(state.is_complete());
        assert_eq!(state.phase(), GamePhase::Complete);
        assert_eq!(state.score().value(), 100);
        assert!(state.global_errors().is_empty());
        assert!(!state.can_retry());
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameComplete {
                final_score: Score::PERFECT,
                mode: GameMode::Normal,
            })
        );
    }

    #[test]
    fn test_single_mistake_scores_80() {
        let mut state = state(5, 5);
        let ids = section_ids(&state);
        let a = &ids[0];

        let events = mismatch(&mut state, a, &ids[1]);
        assert!(events.contains(&GameEvent::WordResolved {
            word_id: a.clone(),
            is_correct: false,
        }));
        assert_eq!(state.score().value(), 80);

        clear_section(&mut state);

        assert!(state.is_complete());
        assert_eq!(state.score().value(), 80);
        assert_eq!(
            state.global_errors(),
            &[key_of(&state, a)].into_iter().collect::<ErrorSet>()
        );
    }

    #[test]
    fn test_retry_keeps_score() {
        let mut state = state(5, 5);
        let ids = section_ids(&state);
        mismatch(&mut state, &ids[0], &ids[1]);
        clear_section(&mut state);
        assert!(state.can_retry());

        let events = state.dispatch(Action::StartRetry);
        let Some(GameEvent::RetryStarted {
            word_count,
            decoy: Some(decoy),
            base_score,
        }) = events.first()
        else {
            panic!("unexpected events: {events:?}");
        };
        assert_eq!(*word_count, 2);
        assert_ne!(decoy, &ids[0]);
        assert_eq!(base_score.value(), 80);
        assert_eq!(state.mode(), GameMode::Retry);
        assert_eq!(state.score().value(), 80);
        assert_eq!(state.base_score_for_next_retry(), Some(*base_score));
        assert_eq!(state.original_total_words(), 5);

        let events = clear_section(&mut state);

        assert!(state.is_complete());
        assert_eq!(state.score().value(), 80);
        assert_eq!(state.stats().retry_passes(), 1);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::WordResolved { .. }))
        );
        assert!(events.contains(&GameEvent::GameComplete {
            final_score: Score::new(80),
            mode: GameMode::Retry,
        }));
    }

    #[test]
    fn test_repeated_mistake_counts_once() {
        let mut state = state(5, 5);
        let ids = section_ids(&state);

        let first = mismatch(&mut state, &ids[0], &ids[1]);
        let second = mismatch(&mut state, &ids[0], &ids[2]);
        assert!(first.iter().any(|e| matches!(
            e,
            GameEvent::PairMismatched {
                first_error: true,
                ..
            }
        )));
        assert!(second.iter().any(|e| matches!(
            e,
            GameEvent::PairMismatched {
                first_error: false,
                ..
            }
        )));

        clear_section(&mut state);
        assert_eq!(state.global_errors().len(), 1);
        assert_eq!(state.score().value(), 80);
        assert_eq!(state.stats().wrong_attempts(), 2);
    }

    #[test]
    fn test_match_is_idempotent() {
        let mut state = state(5, 5);
        let ids = section_ids(&state);

        assert!(!match_pair(&mut state, &ids[0]).is_empty());
        assert!(match_pair(&mut state, &ids[0]).is_empty());
        assert_eq!(state.matched_pairs().len(), 1);
        assert_eq!(state.stats().correct_pairs(), 1);
    }

    #[test]
    fn test_mismatch_locks_input_until_commit() {
        let mut state = state(5, 5);
        let ids = section_ids(&state);

        state.dispatch(Action::Select(CardRef::prompt(ids[0].clone())));
        state.dispatch(Action::Select(CardRef::meaning(ids[1].clone())));
        assert_eq!(state.pending(), Some(PendingTransition::ClearErrorFlash));
        assert!(state.is_error_card(&CardRef::prompt(ids[0].clone())));
        assert!(state.is_error_card(&CardRef::meaning(ids[1].clone())));
        assert!(state.selection().is_empty());

        assert!(match_pair(&mut state, &ids[2]).is_empty());

        assert!(state.dispatch(Action::CommitPendingTransition).is_empty());
        assert!(state.error_cards().is_empty());
        assert!(!state.is_input_locked());
        assert!(!match_pair(&mut state, &ids[2]).is_empty());
    }

    #[test]
    fn test_selection_replaces_same_side() {
        let mut state = state(5, 5);
        let ids = section_ids(&state);

        state.dispatch(Action::Select(CardRef::prompt(ids[0].clone())));
        state.dispatch(Action::Select(CardRef::prompt(ids[1].clone())));
        assert_eq!(state.selection().len(), 1);
        assert!(state.selection().is_selected(&CardRef::prompt(ids[1].clone())));

        let events = state.dispatch(Action::Select(CardRef::meaning(ids[1].clone())));
        assert_eq!(
            events.first(),
            Some(&GameEvent::PairMatched {
                word_id: ids[1].clone()
            })
        );
        assert!(state.global_errors().is_empty());
        assert!(state.session_errors().is_empty());
    }

    #[test]
    fn test_unknown_card_is_ignored() {
        let mut state = state(5, 5);
        let before = state.selection().clone();
        let events = state.dispatch(Action::Select(CardRef::new(CardSide::Prompt, "missing")));
        assert!(events.is_empty());
        assert_eq!(state.selection(), &before);
    }

    #[test]
    fn test_empty_deck_is_complete() {
        let mut state = state(0, 5);
        assert!(state.is_complete());
        assert_eq!(state.score(), Score::PERFECT);
        assert!(state.current_section().is_none());
        assert!(state.dispatch(Action::StartRetry).is_empty());
        assert!(state.dispatch(Action::CommitPendingTransition).is_empty());
        assert_eq!(
            state.dispatch(Action::Restart),
            vec![
                GameEvent::Restarted { total_words: 0 },
                GameEvent::GameComplete {
                    final_score: Score::PERFECT,
                    mode: GameMode::Normal,
                },
            ]
        );
        assert!(state.is_complete());
    }

    #[test]
    fn test_sections_advance_and_merge_errors() {
        let mut state = state(12, 5);
        assert_eq!(state.section_count(), 3);
        assert_eq!(state.sections()[2].len(), 2);

        let first = section_ids(&state);
        mismatch(&mut state, &first[0], &first[1]);
        let events = clear_section(&mut state);
        assert!(events.contains(&GameEvent::SectionAdvanced { index: 1, total: 3 }));
        assert_eq!(state.global_errors().len(), 1);
        assert!(state.session_errors().is_empty());
        assert!(state.matched_pairs().is_empty());

        // cards of a finished section are no longer selectable
        assert!(match_pair(&mut state, &first[0]).is_empty());

        let second = section_ids(&state);
        mismatch(&mut state, &second[3], &second[4]);
        assert_eq!(state.score(), compute_score(2, 12));
        clear_section(&mut state);
        clear_section(&mut state);

        assert!(state.is_complete());
        assert_eq!(state.score().value(), 83);
        assert_eq!(state.stats().sections_cleared(), 3);
    }

    #[test]
    fn test_retry_spanning_sections() {
        let mut state = state(8, 2);
        for _ in 0..4 {
            let ids = section_ids(&state);
            mismatch(&mut state, &ids[0], &ids[1]);
            clear_section(&mut state);
        }
        assert_eq!(state.global_errors().len(), 4);

        state.dispatch(Action::StartRetry);
        assert_eq!(state.section_count(), 2);
        assert!(state.sections().iter().all(|s| s.words().iter().all(|w| !state.is_decoy(&w.id))));

        clear_section(&mut state);
        assert!(!state.is_complete());
        clear_section(&mut state);
        assert!(state.is_complete());
        assert_eq!(state.score().value(), 50);
    }

    #[test]
    fn test_decoy_mismatch_is_not_penalized() {
        let mut state = state(5, 5);
        let ids = section_ids(&state);
        mismatch(&mut state, &ids[0], &ids[1]);
        clear_section(&mut state);

        let Some(GameEvent::RetryStarted {
            decoy: Some(decoy), ..
        }) = state.dispatch(Action::StartRetry).into_iter().next()
        else {
            panic!("expected a decoy");
        };

        let events = mismatch(&mut state, &decoy, &ids[0]);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::PairMismatched {
                penalized: false,
                first_error: false,
                ..
            }
        )));
        assert!(state.session_errors().is_empty());
        assert_eq!(state.score().value(), 80);

        clear_section(&mut state);
        assert_eq!(state.global_errors().len(), 1);
    }

    #[test]
    fn test_word_resolved_reported_once() {
        let mut state = state(5, 5);
        let ids = section_ids(&state);

        mismatch(&mut state, &ids[0], &ids[1]);
        let events = match_pair(&mut state, &ids[0]);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::WordResolved { .. }))
        );

        let events = match_pair(&mut state, &ids[1]);
        assert!(events.contains(&GameEvent::WordResolved {
            word_id: ids[1].clone(),
            is_correct: true,
        }));
        assert!(state.is_resolved(&ids[1]));
        assert_eq!(state.first_attempt(&ids[0]), Some(false));
        assert_eq!(state.first_attempt(&ids[1]), Some(true));
        assert_eq!(state.first_attempt(&ids[2]), None);
    }

    #[test]
    fn test_restart_clears_everything() {
        let mut state = state(5, 5);
        let ids = section_ids(&state);
        mismatch(&mut state, &ids[0], &ids[1]);
        clear_section(&mut state);
        state.dispatch(Action::StartRetry);

        let events = state.dispatch(Action::Restart);
        assert_eq!(events, vec![GameEvent::Restarted { total_words: 5 }]);
        assert_eq!(state.mode(), GameMode::Normal);
        assert!(!state.is_complete());
        assert!(state.global_errors().is_empty());
        assert_eq!(state.score(), Score::PERFECT);
        assert_eq!(state.base_score_for_next_retry(), None);
        assert_eq!(state.stats(), &ExerciseStats::new());
        assert!(!state.is_resolved(&ids[0]));

        let events = clear_section(&mut state);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::WordResolved { .. }))
                .count(),
            5
        );
    }

    #[test]
    fn test_retry_ignored_while_playing() {
        let mut state = state(5, 5);
        let ids = section_ids(&state);
        mismatch(&mut state, &ids[0], &ids[1]);
        assert!(state.dispatch(Action::StartRetry).is_empty());
        assert_eq!(state.mode(), GameMode::Normal);
    }

    #[test]
    fn test_duplicate_ids_are_dropped() {
        let mut deck = words(3);
        deck.push(PairingWord::new("w1", "k9", "other", "other meaning"));
        let state = GameState::new(deck, GameConfig::default());
        assert_eq!(state.original_total_words(), 3);
        assert!(state.words().iter().all(|w| w.word != "other"));
    }

    #[test]
    fn test_zero_section_size_is_clamped() {
        let state = state(3, 0);
        assert_eq!(state.section_count(), 3);
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = state(9, 4);
        let b = state(9, 4);
        assert_eq!(a.words(), b.words());
        assert_eq!(a.sections(), b.sections());
    }

    #[test]
    fn test_reduce() {
        let state = state(2, 5);
        let ids = section_ids(&state);
        let (state, events) = reduce(state, Action::Select(CardRef::prompt(ids[0].clone())));
        assert!(events.is_empty());
        let (state, events) = reduce(state, Action::Select(CardRef::meaning(ids[0].clone())));
        assert_eq!(events.len(), 2);
        assert_eq!(state.matched_pairs().len(), 1);
    }

    fn action_strategy(n: usize) -> impl Strategy<Value = Action> {
        prop_oneof![
            4 => (any::<bool>(), 0..n).prop_map(|(prompt, i)| {
                let side = if prompt { CardSide::Prompt } else { CardSide::Meaning };
                Action::Select(CardRef::new(side, format!("w{i}")))
            }),
            2 => Just(Action::CommitPendingTransition),
            1 => Just(Action::StartRetry),
        ]
    }

    /// Plays correctly until complete, returning `false` if it never gets there.
    fn play_out(state: &mut GameState) -> bool {
        for _ in 0..200 {
            if state.is_complete() {
                return true;
            }
            state.dispatch(Action::CommitPendingTransition);
            let next = state.current_section().and_then(|section| {
                section
                    .words()
                    .iter()
                    .find(|w| !state.is_matched(&w.id))
                    .map(|w| w.id.clone())
            });
            if let Some(id) = next {
                match_pair(state, &id);
            }
        }
        state.is_complete()
    }

    proptest! {
        #[test]
        fn prop_global_errors_never_shrink(
            actions in prop::collection::vec(action_strategy(7), 0..200),
        ) {
            let mut state = state(7, 3);
            for action in actions {
                let before = state.global_errors().clone();
                state.dispatch(action);
                prop_assert!(state.global_errors().is_superset(&before));
                prop_assert!(state.score().value() <= 100);
                if let Some(section) = state.current_section() {
                    prop_assert!(state.matched_pairs().len() <= section.len());
                }
            }
        }

        #[test]
        fn prop_never_stuck(
            actions in prop::collection::vec(action_strategy(6), 0..100),
        ) {
            let mut state = state(6, 4);
            for action in actions {
                state.dispatch(action);
            }
            prop_assert!(play_out(&mut state));
        }
    }
}
