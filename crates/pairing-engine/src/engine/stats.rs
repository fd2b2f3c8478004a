use serde::Serialize;

/// Running counters for a single exercise run.
///
/// Reset by [`Action::Restart`](crate::Action::Restart), kept across retry passes.
///
/// # Example
///
/// ```
/// use pairing_engine::ExerciseStats;
///
/// let mut stats = ExerciseStats::new();
/// stats.record_match();
/// stats.record_mismatch();
///
/// assert_eq!(stats.attempts(), 2);
/// assert_eq!(stats.correct_pairs(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseStats {
    correct_pairs: usize,
    wrong_attempts: usize,
    sections_cleared: usize,
    retry_passes: usize,
}

impl ExerciseStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            correct_pairs: 0,
            wrong_attempts: 0,
            sections_cleared: 0,
            retry_passes: 0,
        }
    }

    #[must_use]
    pub const fn correct_pairs(&self) -> usize {
        self.correct_pairs
    }

    #[must_use]
    pub const fn wrong_attempts(&self) -> usize {
        self.wrong_attempts
    }

    /// Total pair attempts, right or wrong.
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.correct_pairs + self.wrong_attempts
    }

    #[must_use]
    pub const fn sections_cleared(&self) -> usize {
        self.sections_cleared
    }

    /// Number of retry passes played to completion.
    #[must_use]
    pub const fn retry_passes(&self) -> usize {
        self.retry_passes
    }

    pub fn record_match(&mut self) {
        self.correct_pairs += 1;
    }

    pub fn record_mismatch(&mut self) {
        self.wrong_attempts += 1;
    }

    pub fn record_section_cleared(&mut self) {
        self.sections_cleared += 1;
    }

    pub fn record_retry_pass(&mut self) {
        self.retry_passes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = ExerciseStats::new();
        stats.record_match();
        stats.record_match();
        stats.record_mismatch();
        stats.record_section_cleared();
        stats.record_retry_pass();

        assert_eq!(stats.correct_pairs(), 2);
        assert_eq!(stats.wrong_attempts(), 1);
        assert_eq!(stats.attempts(), 3);
        assert_eq!(stats.sections_cleared(), 1);
        assert_eq!(stats.retry_passes(), 1);
    }
}
