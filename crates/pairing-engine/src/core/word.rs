use std::fmt;

use serde::{Deserialize, Serialize};

/// Synthetic per-example key of a [`PairingWord`].
///
/// Two words are the same underlying item iff their ids are equal. Matching is
/// always decided on ids, never on rendered text.
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
    derive_more::From,
)]
#[serde(transparent)]
pub struct WordId(String);

impl WordId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of the parent character a word is listed under.
///
/// Used to group per-word results into per-character mastery rollups.
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
    derive_more::From,
)]
#[serde(transparent)]
pub struct KanjiId(String);

impl KanjiId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KanjiId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Word-level error key: the prompt-side text of a word.
///
/// Error sets are keyed by this, so every deck entry sharing the same prompt text
/// shares the same error history.
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
    derive_more::From,
)]
#[serde(transparent)]
pub struct WordKey(String);

impl WordKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WordKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Which reading of the parent character a word exemplifies.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum ReadingType {
    Kun,
    On,
    #[default]
    Exception,
}

impl ReadingType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ReadingType::Kun => "kun",
            ReadingType::On => "on",
            ReadingType::Exception => "exception",
        }
    }
}

impl fmt::Display for ReadingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One playable prompt/meaning pair.
///
/// Words are immutable once loaded; the engine only ever clones them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingWord {
    pub id: WordId,
    pub kanji_id: KanjiId,
    /// Prompt-side text (e.g. `学生`).
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub furigana: String,
    /// Romanized reading.
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub reading_type: ReadingType,
    #[serde(default)]
    pub reading_id: u32,
}

impl PairingWord {
    /// Creates a word with empty reading metadata.
    #[must_use]
    pub fn new(
        id: impl Into<WordId>,
        kanji_id: impl Into<KanjiId>,
        word: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kanji_id: kanji_id.into(),
            word: word.into(),
            meaning: meaning.into(),
            furigana: String::new(),
            reading: String::new(),
            reading_type: ReadingType::default(),
            reading_id: 0,
        }
    }

    #[must_use]
    pub fn with_reading(
        self,
        furigana: impl Into<String>,
        reading: impl Into<String>,
        reading_type: ReadingType,
        reading_id: u32,
    ) -> Self {
        Self {
            furigana: furigana.into(),
            reading: reading.into(),
            reading_type,
            reading_id,
            ..self
        }
    }

    /// Returns the key this word is tracked under in error sets.
    #[must_use]
    pub fn key(&self) -> WordKey {
        WordKey::new(self.word.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_key_is_prompt_text() {
        let word = PairingWord::new("1-on-1-3", "1", "学生", "student");
        assert_eq!(word.key(), WordKey::from("学生"));
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let json = r#"{"id":"7-kun-1-2","kanjiId":"7","word":"水","meaning":"water"}"#;
        let word: PairingWord = serde_json::from_str(json).unwrap();

        assert_eq!(word.id, WordId::from("7-kun-1-2"));
        assert_eq!(word.kanji_id, KanjiId::from("7"));
        assert_eq!(word.furigana, "");
        assert_eq!(word.reading_type, ReadingType::Exception);
        assert_eq!(word.reading_id, 0);
    }

    #[test]
    fn test_serialize_reading_type_lowercase() {
        let word = PairingWord::new("a", "k", "山", "mountain").with_reading(
            "やま",
            "yama",
            ReadingType::Kun,
            2,
        );
        let value = serde_json::to_value(&word).unwrap();

        assert_eq!(value["readingType"], "kun");
        assert_eq!(value["readingId"], 2);
        assert_eq!(value["furigana"], "やま");
    }
}
