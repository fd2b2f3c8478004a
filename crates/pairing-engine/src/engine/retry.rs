use crate::{
    core::{DeckShuffler, PairingWord, WordId},
    engine::ErrorSet,
};

/// Words replayed in a retry pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryDeck {
    words: Vec<PairingWord>,
    decoy: Option<WordId>,
}

impl RetryDeck {
    /// Words in play order.
    #[must_use]
    pub fn words(&self) -> &[PairingWord] {
        &self.words
    }

    #[must_use]
    pub fn into_words(self) -> Vec<PairingWord> {
        self.words
    }

    /// Id of the known-correct word added to keep a single wrong word playable.
    #[must_use]
    pub fn decoy(&self) -> Option<&WordId> {
        self.decoy.as_ref()
    }

    #[must_use]
    pub fn is_decoy(&self, id: &WordId) -> bool {
        self.decoy.as_ref() == Some(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Selects every word whose key is in `error_keys`, shuffled.
///
/// A matching round with a single pair has nothing to mismatch against, so when
/// exactly one key is wrong one random known-correct word is added as a decoy.
/// If the deck has no correct word to borrow, the single wrong word is returned
/// alone.
pub fn build_retry_deck(
    all_words: &[PairingWord],
    error_keys: &ErrorSet,
    shuffler: &mut DeckShuffler,
) -> RetryDeck {
    let (mut words, correct): (Vec<_>, Vec<_>) = all_words
        .iter()
        .cloned()
        .partition(|word| error_keys.contains(&word.key()));

    let decoy = if error_keys.len() == 1 {
        shuffler.choose(&correct).cloned()
    } else {
        None
    };
    let decoy_id = decoy.as_ref().map(|word| word.id.clone());
    words.extend(decoy);

    RetryDeck {
        words: shuffler.shuffle(words),
        decoy: decoy_id,
    }
}
