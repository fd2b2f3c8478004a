use std::collections::{BTreeSet, btree_set};

use serde::{Deserialize, Serialize};

use crate::core::WordKey;

/// Set of word keys that produced at least one wrong match.
///
/// The same type backs both the per-pass set and the accumulative set; the
/// accumulative one only ever grows until the exercise restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorSet(BTreeSet<WordKey>);

/// Result of [`record_error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedError {
    pub updated: ErrorSet,
    /// `true` if the key was not yet in the input set.
    pub is_first_error: bool,
}

/// Adds `key` to a copy of `errors`, reporting whether it was new.
#[must_use]
pub fn record_error(errors: &ErrorSet, key: &WordKey) -> RecordedError {
    let mut updated = errors.clone();
    let is_first_error = updated.insert(key.clone());
    RecordedError {
        updated,
        is_first_error,
    }
}

impl ErrorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &WordKey) -> bool {
        self.0.contains(key)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, WordKey> {
        self.0.iter()
    }

    /// Inserts `key`, returning `true` if this is its first error in the set.
    pub fn insert(&mut self, key: WordKey) -> bool {
        self.0.insert(key)
    }

    /// Adds every key of `other`.
    pub fn merge(&mut self, other: &ErrorSet) {
        self.0.extend(other.iter().cloned());
    }

    #[must_use]
    pub fn union(&self, other: &ErrorSet) -> ErrorSet {
        let mut union = self.clone();
        union.merge(other);
        union
    }

    /// Size of `self ∪ other` without allocating the union.
    #[must_use]
    pub fn union_len(&self, other: &ErrorSet) -> usize {
        self.len() + other.iter().filter(|key| !self.contains(key)).count()
    }

    #[must_use]
    pub fn is_superset(&self, other: &ErrorSet) -> bool {
        self.0.is_superset(&other.0)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<WordKey> for ErrorSet {
    fn from_iter<I: IntoIterator<Item = WordKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<WordKey> for ErrorSet {
    fn extend<I: IntoIterator<Item = WordKey>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ErrorSet {
    type Item = &'a WordKey;
    type IntoIter = btree_set::Iter<'a, WordKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
