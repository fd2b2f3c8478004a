use super::{
    deck::DeckShuffler,
    word::{PairingWord, WordId},
};

/// A batch of words presented together.
///
/// The prompt column keeps deck order. The meaning column is an independent
/// permutation drawn when the section is built, so a card's row never hints at
/// its partner. Sections are rebuilt rather than mutated when the deck changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    words: Vec<PairingWord>,
    meaning_order: Vec<usize>,
}

impl Section {
    pub fn new(words: Vec<PairingWord>, shuffler: &mut DeckShuffler) -> Self {
        let meaning_order = shuffler.shuffle((0..words.len()).collect());
        Self {
            words,
            meaning_order,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in prompt-column order.
    #[must_use]
    pub fn words(&self) -> &[PairingWord] {
        &self.words
    }

    /// Words in meaning-column order.
    pub fn meanings(&self) -> impl Iterator<Item = &PairingWord> + '_ {
        self.meaning_order.iter().map(|&i| &self.words[i])
    }

    #[must_use]
    pub fn word(&self, id: &WordId) -> Option<&PairingWord> {
        self.words.iter().find(|word| &word.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &WordId) -> bool {
        self.word(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::DeckSeed;

    fn words(n: usize) -> Vec<PairingWord> {
        (0..n)
            .map(|i| PairingWord::new(format!("w{i}"), "k", format!("word{i}"), format!("m{i}")))
            .collect()
    }

    #[test]
    fn test_meanings_are_permutation_of_prompts() {
        let mut shuffler = DeckShuffler::with_seed(DeckSeed::from_bytes([3; 16]));
        let section = Section::new(words(5), &mut shuffler);

        let prompts: BTreeSet<_> = section.words().iter().map(|w| w.id.clone()).collect();
        let meanings: BTreeSet<_> = section.meanings().map(|w| w.id.clone()).collect();

        assert_eq!(section.len(), 5);
        assert_eq!(prompts, meanings);
    }

    #[test]
    fn test_lookup_by_id() {
        let mut shuffler = DeckShuffler::new();
        let section = Section::new(words(3), &mut shuffler);

        assert_eq!(section.word(&WordId::from("w1")).unwrap().word, "word1");
        assert!(!section.contains(&WordId::from("w9")));
    }
}
