use serde::Serialize;

use crate::{
    core::{KanjiId, PairingWord, WordId},
    engine::{Action, GameEvent, GameState, Score},
};

/// Receiver for results that outlive the exercise, such as mastery storage.
pub trait ExerciseObserver {
    /// Called once per word, on its first resolution since the last restart.
    fn on_word_resolved(&mut self, word: &PairingWord, is_correct: bool);

    /// Called when a normal or retry pass completes.
    ///
    /// An empty deck is complete from the start and reports a perfect score when
    /// the session is created and on every restart.
    fn on_game_complete(&mut self, final_score: Score);
}

impl ExerciseObserver for () {
    fn on_word_resolved(&mut self, _word: &PairingWord, _is_correct: bool) {}

    fn on_game_complete(&mut self, _final_score: Score) {}
}

impl<O> ExerciseObserver for &mut O
where
    O: ExerciseObserver + ?Sized,
{
    fn on_word_resolved(&mut self, word: &PairingWord, is_correct: bool) {
        (**self).on_word_resolved(word, is_correct);
    }

    fn on_game_complete(&mut self, final_score: Score) {
        (**self).on_game_complete(final_score);
    }
}

/// A [`GameState`] wired to an [`ExerciseObserver`].
///
/// # Example
///
/// ```
/// use pairing_engine::{
///     Action, CardRef, ExerciseSession, GameConfig, GameState, MasteryLog, PairingWord,
/// };
///
/// let words = vec![PairingWord::new("1", "k1", "山", "mountain")];
/// let state = GameState::new(words, GameConfig::default());
/// let mut session = ExerciseSession::new(state, MasteryLog::new());
///
/// session.dispatch(Action::Select(CardRef::prompt("1")));
/// session.dispatch(Action::Select(CardRef::meaning("1")));
/// session.dispatch(Action::CommitPendingTransition);
///
/// assert_eq!(session.observer().resolutions().len(), 1);
/// assert_eq!(session.observer().completions().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ExerciseSession<O = ()> {
    state: GameState,
    observer: O,
}

impl<O> ExerciseSession<O>
where
    O: ExerciseObserver,
{
    #[must_use]
    pub fn new(state: GameState, mut observer: O) -> Self {
        if state.words().is_empty() {
            observer.on_game_complete(state.score());
        }
        Self { state, observer }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    #[must_use]
    pub fn into_parts(self) -> (GameState, O) {
        (self.state, self.observer)
    }

    /// Dispatches `action` and forwards the resulting events to the observer.
    pub fn dispatch(&mut self, action: Action) -> Vec<GameEvent> {
        let events = self.state.dispatch(action);
        for event in &events {
            match event {
                GameEvent::WordResolved {
                    word_id,
                    is_correct,
                } => {
                    if let Some(word) = self.state.words().iter().find(|w| &w.id == word_id) {
                        self.observer.on_word_resolved(word, *is_correct);
                    }
                }
                GameEvent::GameComplete { final_score, .. } => {
                    self.observer.on_game_complete(*final_score);
                }
                _ => {}
            }
        }
        events
    }
}

/// One entry of a [`MasteryLog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordResolution {
    pub word_id: WordId,
    pub kanji_id: KanjiId,
    pub word: String,
    pub is_correct: bool,
}

/// Observer that records everything it is told, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryLog {
    resolutions: Vec<WordResolution>,
    completions: Vec<Score>,
}

impl MasteryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn resolutions(&self) -> &[WordResolution] {
        &self.resolutions
    }

    /// Final score of every completed pass.
    #[must_use]
    pub fn completions(&self) -> &[Score] {
        &self.completions
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.resolutions.iter().filter(|r| r.is_correct).count()
    }
}

impl ExerciseObserver for MasteryLog {
    fn on_word_resolved(&mut self, word: &PairingWord, is_correct: bool) {
        self.resolutions.push(WordResolution {
            word_id: word.id.clone(),
            kanji_id: word.kanji_id.clone(),
            word: word.word.clone(),
            is_correct,
        });
    }

    fn on_game_complete(&mut self, final_score: Score) {
        self.completions.push(final_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{CardRef, DeckSeed},
        engine::GameConfig,
    };

    fn session<O: ExerciseObserver>(observer: O) -> ExerciseSession<O> {
        let words = (0..3)
            .map(|i| PairingWord::new(format!("w{i}"), "k", format!("word{i}"), format!("m{i}")))
            .collect();
        let state =
            GameState::with_seed(words, GameConfig::default(), DeckSeed::from_bytes([1; 16]));
        ExerciseSession::new(state, observer)
    }

    fn ids<O: ExerciseObserver>(session: &ExerciseSession<O>) -> Vec<WordId> {
        session.state().words().iter().map(|w| w.id.clone()).collect()
    }

    fn select_pair<O: ExerciseObserver>(
        session: &mut ExerciseSession<O>,
        prompt: &WordId,
        meaning: &WordId,
    ) {
        session.dispatch(Action::Select(CardRef::prompt(prompt.clone())));
        session.dispatch(Action::Select(CardRef::meaning(meaning.clone())));
        session.dispatch(Action::CommitPendingTransition);
    }

    #[test]
    fn test_log_records_first_attempts_and_passes() {
        let mut session = session(MasteryLog::new());
        let ids = ids(&session);

        select_pair(&mut session, &ids[0], &ids[1]);
        for id in &ids {
            select_pair(&mut session, id, id);
        }
        assert!(session.state().is_complete());

        session.dispatch(Action::StartRetry);
        for id in &ids {
            select_pair(&mut session, id, id);
        }
        assert!(session.state().is_complete());

        let log = session.observer();
        assert_eq!(log.resolutions().len(), 3);
        assert_eq!(log.correct_count(), 2);
        assert_eq!(log.resolutions()[0].word_id, ids[0]);
        assert!(!log.resolutions()[0].is_correct);
        assert_eq!(log.completions(), &[Score::new(67), Score::new(67)]);
    }

    #[test]
    fn test_borrowed_observer() {
        let mut log = MasteryLog::new();
        {
            let mut session = session(&mut log);
            let ids = ids(&session);
            for id in &ids {
                select_pair(&mut session, id, id);
            }
        }
        assert_eq!(log.correct_count(), 3);
        assert_eq!(log.completions(), &[Score::PERFECT]);
    }

    #[test]
    fn test_empty_deck_reports_completion() {
        let state = GameState::new(Vec::new(), GameConfig::default());
        let mut session = ExerciseSession::new(state, MasteryLog::new());
        assert_eq!(session.observer().completions(), &[Score::PERFECT]);

        session.dispatch(Action::Restart);
        assert_eq!(
            session.observer().completions(),
            &[Score::PERFECT, Score::PERFECT]
        );
        assert!(session.observer().resolutions().is_empty());
    }

    #[test]
    fn test_unit_observer() {
        let mut session = session(());
        let ids = ids(&session);
        for id in &ids {
            select_pair(&mut session, id, id);
        }
        let (state, ()) = session.into_parts();
        assert!(state.is_complete());
    }
}
