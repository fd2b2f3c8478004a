use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    core::{KanjiId, WordId},
    engine::{FirstAttemptStats, GameState, Score},
};

/// First-attempt result of a single word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordResult {
    pub word_id: WordId,
    pub word: String,
    pub meaning: String,
    pub is_correct: bool,
}

/// End-of-exercise payload for mastery storage.
///
/// Every word of the deck is listed under its kanji. A word counts as correct
/// unless its first resolution was a mismatch, so words fixed in a retry pass
/// stay incorrect. Words never played count as correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryReport {
    pub final_score: Score,
    pub stats: FirstAttemptStats,
    pub words_by_kanji: BTreeMap<KanjiId, Vec<WordResult>>,
}

impl MasteryReport {
    /// Builds the report from the first-attempt results and the current
    /// errors, including those of an unfinished section.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let errors = state.effective_errors();
        let mut words_by_kanji: BTreeMap<KanjiId, Vec<WordResult>> = BTreeMap::new();
        for word in state.words() {
            words_by_kanji
                .entry(word.kanji_id.clone())
                .or_default()
                .push(WordResult {
                    word_id: word.id.clone(),
                    word: word.word.clone(),
                    meaning: word.meaning.clone(),
                    is_correct: state.first_attempt(&word.id) != Some(false),
                });
        }
        for results in words_by_kanji.values_mut() {
            results.sort_by(|a, b| a.word_id.cmp(&b.word_id));
        }

        Self {
            final_score: state.score(),
            stats: FirstAttemptStats::from_errors(state.words().len(), &errors),
            words_by_kanji,
        }
    }

    #[must_use]
    pub fn incorrect_words(&self) -> impl Iterator<Item = &WordResult> {
        self.words_by_kanji
            .values()
            .flatten()
            .filter(|result| !result.is_correct)
    }
}
