use serde::{Deserialize, Serialize};

use super::word::{PairingWord, WordId};

/// Column a card is shown in.
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
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum CardSide {
    #[display("prompt")]
    Prompt,
    #[display("meaning")]
    Meaning,
}

impl CardSide {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            CardSide::Prompt => CardSide::Meaning,
            CardSide::Meaning => CardSide::Prompt,
        }
    }
}

/// Address of a single card on the board.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{side}:{word_id}")]
#[serde(rename_all = "camelCase")]
pub struct CardRef {
    pub side: CardSide,
    pub word_id: WordId,
}

impl CardRef {
    #[must_use]
    pub fn new(side: CardSide, word_id: impl Into<WordId>) -> Self {
        Self {
            side,
            word_id: word_id.into(),
        }
    }

    #[must_use]
    pub fn prompt(word_id: impl Into<WordId>) -> Self {
        Self::new(CardSide::Prompt, word_id)
    }

    #[must_use]
    pub fn meaning(word_id: impl Into<WordId>) -> Self {
        Self::new(CardSide::Meaning, word_id)
    }
}

/// A card the player has tapped and not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedCard {
    word: PairingWord,
    side: CardSide,
}

impl SelectedCard {
    #[must_use]
    pub fn new(word: PairingWord, side: CardSide) -> Self {
        Self { word, side }
    }

    #[must_use]
    pub fn word(&self) -> &PairingWord {
        &self.word
    }

    #[must_use]
    pub fn side(&self) -> CardSide {
        self.side
    }

    #[must_use]
    pub fn card_ref(&self) -> CardRef {
        CardRef::new(self.side, self.word.id.clone())
    }

    #[must_use]
    pub fn into_word(self) -> PairingWord {
        self.word
    }
}

/// Current selection: at most one card per side.
///
/// Selecting a card on a side that already holds one replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    prompt: Option<SelectedCard>,
    meaning: Option<SelectedCard>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `card` into its side's slot and returns the card it replaced.
    pub fn select(&mut self, card: SelectedCard) -> Option<SelectedCard> {
        let slot = match card.side {
            CardSide::Prompt => &mut self.prompt,
            CardSide::Meaning => &mut self.meaning,
        };
        slot.replace(card)
    }

    /// Removes and returns `(prompt, meaning)` once both sides are filled.
    pub fn take_pair(&mut self) -> Option<(SelectedCard, SelectedCard)> {
        if self.prompt.is_none() || self.meaning.is_none() {
            return None;
        }
        Some((self.prompt.take()?, self.meaning.take()?))
    }

    pub fn clear(&mut self) {
        self.prompt = None;
        self.meaning = None;
    }

    #[must_use]
    pub fn get(&self, side: CardSide) -> Option<&SelectedCard> {
        match side {
            CardSide::Prompt => self.prompt.as_ref(),
            CardSide::Meaning => self.meaning.as_ref(),
        }
    }

    #[must_use]
    pub fn is_selected(&self, card: &CardRef) -> bool {
        self.get(card.side)
            .is_some_and(|selected| selected.word.id == card.word_id)
    }

    pub fn cards(&self) -> impl Iterator<Item = &SelectedCard> {
        self.prompt.iter().chain(self.meaning.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompt.is_none() && self.meaning.is_none()
    }
}
