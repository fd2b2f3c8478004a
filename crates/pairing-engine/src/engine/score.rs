use serde::{Deserialize, Serialize};

use crate::engine::ErrorSet;

/// Exercise score, an integer in `0..=100`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct Score(u8);

impl Default for Score {
    fn default() -> Self {
        Self::PERFECT
    }
}

impl Score {
    pub const PERFECT: Self = Self(100);
    pub const ZERO: Self = Self(0);

    /// Creates a score, saturating at 100.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_perfect(self) -> bool {
        self.0 == 100
    }

    #[must_use]
    pub const fn tier(self) -> ScoreTier {
        match self.0 {
            90.. => ScoreTier::Excellent,
            80..=89 => ScoreTier::Good,
            _ => ScoreTier::NeedsPractice,
        }
    }
}

/// Coarse grading of a [`Score`] for result presentation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "camelCase")]
pub enum ScoreTier {
    /// 90 and above.
    Excellent,
    /// 80 to 89.
    Good,
    /// Below 80.
    NeedsPractice,
}

/// Computes the score from the number of distinct wrong words.
///
/// Every wrong word costs `100 / original_total_words` points. The denominator is
/// always the size of the deck the exercise started with, so a retry over a
/// smaller subset can never raise the score above what the original mistakes
/// capped it at.
///
/// An empty deck scores 100: there is nothing to get wrong.
///
/// # Example
///
/// ```
/// use pairing_engine::compute_score;
///
/// assert_eq!(compute_score(0, 5).value(), 100);
/// assert_eq!(compute_score(1, 5).value(), 80);
/// assert_eq!(compute_score(1, 3).value(), 67);
/// assert_eq!(compute_score(9, 5).value(), 0);
/// assert_eq!(compute_score(3, 0).value(), 100);
/// ```
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn compute_score(global_error_count: usize, original_total_words: usize) -> Score {
    if original_total_words == 0 {
        return Score::PERFECT;
    }
    let penalty_per_word = 100.0 / original_total_words as f64;
    let raw_score = 100.0 - global_error_count as f64 * penalty_per_word;
    Score(round_percent(raw_score))
}

/// Computes the score from the union of the accumulative and the current pass's
/// error sets.
///
/// A word wrong in both is counted once, so repeating an old mistake costs nothing
/// while a fresh mistake is penalized the first time it happens.
#[must_use]
pub fn accumulative_score(
    global_errors: &ErrorSet,
    session_errors: &ErrorSet,
    original_total_words: usize,
) -> Score {
    compute_score(
        global_errors.union_len(session_errors),
        original_total_words,
    )
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_percent(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

/// How many words were answered right the first time they were played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstAttemptStats {
    pub total_words: usize,
    pub correct_first_attempt: usize,
    pub error_words: usize,
    /// `correct_first_attempt / total_words` as a rounded percentage.
    pub first_attempt_accuracy: u8,
}

impl FirstAttemptStats {
    /// Counts one wrong word per key in `global_errors`, the same count the
    /// score is penalized by.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn from_errors(total_words: usize, global_errors: &ErrorSet) -> Self {
        let error_words = global_errors.len().min(total_words);
        let correct_first_attempt = total_words - error_words;
        let first_attempt_accuracy = if total_words == 0 {
            100
        } else {
            round_percent(correct_first_attempt as f64 / total_words as f64 * 100.0)
        };
        Self {
            total_words,
            correct_first_attempt,
            error_words,
            first_attempt_accuracy,
        }
    }
}
