use std::path::PathBuf;

use pairing_engine::{
    DEFAULT_SECTION_SIZE, DeckSeed, GameConfig, KanjiId, PairingWord, ReadingType,
};
use rand::Rng as _;
use serde::Deserialize;
use tracing::{info, warn};

use crate::util;

/// Options shared by every command that loads a deck.
#[derive(Debug, Clone, clap::Args)]
pub struct DeckArgs {
    /// Path to the deck JSON file (word list, kanji lesson or vocabulary list)
    pub deck: PathBuf,
    /// Language of the meaning column
    #[clap(long, value_enum, default_value_t = MeaningLanguage::En)]
    pub lang: MeaningLanguage,
    /// Number of pairs shown per section
    #[clap(long, default_value_t = DEFAULT_SECTION_SIZE)]
    pub section_size: usize,
    /// Shuffle seed as 32 hex digits; random when omitted
    #[clap(long)]
    pub seed: Option<DeckSeed>,
}

impl DeckArgs {
    pub fn config(&self) -> GameConfig {
        GameConfig::new(self.section_size)
    }

    /// Returns the given seed or draws a fresh one.
    pub fn seed(&self) -> DeckSeed {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    pub fn load_words(&self) -> anyhow::Result<Vec<PairingWord>> {
        let file: DeckFile = util::read_json_file("deck", &self.deck)?;
        let words = file.into_words(self.lang);
        if words.is_empty() {
            warn!(path = %self.deck.display(), "deck has no words");
        } else {
            info!(path = %self.deck.display(), words = words.len(), "deck loaded");
        }
        Ok(words)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MeaningLanguage {
    #[default]
    En,
    Id,
}

/// Accepted deck file layouts.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeckFile {
    Words { words: Vec<PairingWord> },
    Lesson { kanji: Vec<LessonKanji> },
    Vocabulary { vocabulary: Vec<VocabularyEntry> },
}

#[derive(Debug, Clone, Deserialize)]
pub struct LessonKanji {
    id: u32,
    #[serde(default)]
    character: String,
    #[serde(default)]
    readings: LessonReadings,
    /// Examples not tied to a kun or on reading.
    #[serde(default)]
    examples: Vec<LessonExample>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LessonReadings {
    #[serde(default)]
    kun: Vec<LessonReading>,
    #[serde(default)]
    on: Vec<LessonReading>,
    #[serde(default)]
    exception: Option<LessonExceptionReading>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LessonReading {
    id: u32,
    #[serde(default)]
    examples: Vec<LessonExample>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LessonExceptionReading {
    #[serde(default)]
    examples: Vec<LessonExample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LessonExample {
    id: u32,
    word: String,
    #[serde(default)]
    furigana: String,
    #[serde(default)]
    romanji: String,
    meanings: LessonMeanings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LessonMeanings {
    #[serde(default)]
    en: String,
    #[serde(default)]
    id: String,
}

/// Vocabulary word; the prompt is its kanji spelling, or its kana when it has none.
#[derive(Debug, Clone, Deserialize)]
pub struct VocabularyEntry {
    id: u32,
    #[serde(default)]
    kanji: String,
    #[serde(default)]
    hiragana: String,
    #[serde(default)]
    romaji: String,
    meanings: LessonMeanings,
}

impl LessonMeanings {
    fn get(&self, lang: MeaningLanguage) -> &str {
        match lang {
            MeaningLanguage::En => &self.en,
            MeaningLanguage::Id => &self.id,
        }
    }
}

impl DeckFile {
    pub fn into_words(self, lang: MeaningLanguage) -> Vec<PairingWord> {
        match self {
            DeckFile::Words { words } => words,
            DeckFile::Lesson { kanji } => kanji
                .iter()
                .flat_map(|kanji| kanji.pairing_words(lang))
                .collect(),
            DeckFile::Vocabulary { vocabulary } => vocabulary
                .iter()
                .filter_map(|entry| entry.pairing_word(lang))
                .collect(),
        }
    }
}

impl VocabularyEntry {
    fn pairing_word(&self, lang: MeaningLanguage) -> Option<PairingWord> {
        let meaning = self.meanings.get(lang);
        let (prompt, furigana) = if self.kanji.is_empty() {
            (self.hiragana.as_str(), "")
        } else {
            (self.kanji.as_str(), self.hiragana.as_str())
        };
        if prompt.is_empty() || meaning.is_empty() {
            warn!(id = self.id, word = %prompt, "skipping incomplete vocabulary entry");
            return None;
        }

        let id = format!("vocab-{}", self.id);
        Some(
            PairingWord::new(id.as_str(), id.as_str(), prompt, meaning).with_reading(
                furigana,
                self.romaji.as_str(),
                ReadingType::Exception,
                0,
            ),
        )
    }
}

impl LessonKanji {
    fn pairing_words(&self, lang: MeaningLanguage) -> Vec<PairingWord> {
        let kun = self
            .readings
            .kun
            .iter()
            .flat_map(|r| r.examples.iter().map(move |ex| (ReadingType::Kun, r.id, ex)));
        let on = self
            .readings
            .on
            .iter()
            .flat_map(|r| r.examples.iter().map(move |ex| (ReadingType::On, r.id, ex)));
        let exception = self
            .readings
            .exception
            .iter()
            .flat_map(|r| &r.examples)
            .chain(&self.examples)
            .map(|ex| (ReadingType::Exception, 0, ex));

        let kanji_id = KanjiId::new(self.id.to_string());
        kun.chain(on)
            .chain(exception)
            .filter(|(_, _, ex)| {
                let has_meaning = !ex.meanings.get(lang).is_empty();
                if !has_meaning {
                    warn!(
                        kanji = %self.character,
                        word = %ex.word,
                        "skipping example without meaning"
                    );
                }
                has_meaning
            })
            .map(|(reading_type, reading_id, ex)| {
                PairingWord::new(
                    format!("{}-{reading_type}-{reading_id}-{}", self.id, ex.id),
                    kanji_id.clone(),
                    ex.word.as_str(),
                    ex.meanings.get(lang),
                )
                .with_reading(
                    ex.furigana.as_str(),
                    ex.romanji.as_str(),
                    reading_type,
                    reading_id,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LESSON: &str = r#"{
        "kanji": [{
            "id": 12,
            "character": "学",
            "strokes": 8,
            "readings": {
                "kun": [{
                    "id": 1,
                    "furigana": "まな",
                    "examples": [{
                        "id": 3, "word": "学ぶ", "furigana": "まなぶ", "romanji": "manabu",
                        "meanings": { "en": "to learn", "id": "belajar" }
                    }]
                }],
                "on": [{
                    "id": 2,
                    "examples": [{
                        "id": 4, "word": "学生", "furigana": "がくせい", "romanji": "gakusei",
                        "meanings": { "en": "student", "id": "murid" }
                    }]
                }]
            },
            "examples": [{
                "id": 9, "word": "大学", "furigana": "だいがく", "romanji": "daigaku",
                "meanings": { "en": "university", "id": "" }
            }]
        }]
    }"#;

    #[test]
    fn test_lesson_flattens_readings() {
        let file: DeckFile = serde_json::from_str(LESSON).unwrap();
        let words = file.into_words(MeaningLanguage::En);

        let ids: Vec<_> = words.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["12-kun-1-3", "12-on-2-4", "12-exception-0-9"]);

        let student = &words[1];
        assert_eq!(student.kanji_id, KanjiId::from("12"));
        assert_eq!(student.word, "学生");
        assert_eq!(student.meaning, "student");
        assert_eq!(student.furigana, "がくせい");
        assert_eq!(student.reading, "gakusei");
        assert_eq!(student.reading_type, ReadingType::On);
        assert_eq!(student.reading_id, 2);
    }

    #[test]
    fn test_lesson_skips_missing_translation() {
        let file: DeckFile = serde_json::from_str(LESSON).unwrap();
        let words = file.into_words(MeaningLanguage::Id);

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].meaning, "belajar");
    }

    #[test]
    fn test_word_list() {
        let json = r#"{ "words": [
            { "id": "a", "kanjiId": "1", "word": "山", "meaning": "mountain" },
            { "id": "b", "kanjiId": "2", "word": "川", "meaning": "river", "readingType": "kun", "readingId": 1 }
        ] }"#;
        let file: DeckFile = serde_json::from_str(json).unwrap();
        let words = file.into_words(MeaningLanguage::Id);

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].reading_type, ReadingType::Exception);
        assert_eq!(words[1].reading_type, ReadingType::Kun);
    }

    #[test]
    fn test_vocabulary_prompt_falls_back_to_kana() {
        let json = r#"{ "vocabulary": [
            { "id": 1, "kanji": "水", "hiragana": "みず", "romaji": "mizu",
              "meanings": { "en": "water", "id": "air" } },
            { "id": 2, "kanji": "", "hiragana": "これ", "romaji": "kore",
              "meanings": { "en": "this", "id": "ini" } },
            { "id": 3, "hiragana": "あれ", "romaji": "are",
              "meanings": { "en": "", "id": "itu" } }
        ] }"#;
        let file: DeckFile = serde_json::from_str(json).unwrap();
        let words = file.into_words(MeaningLanguage::En);

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].id.as_str(), "vocab-1");
        assert_eq!(words[0].word, "水");
        assert_eq!(words[0].furigana, "みず");
        assert_eq!(words[0].reading, "mizu");
        assert_eq!(words[1].word, "これ");
        assert_eq!(words[1].furigana, "");
        assert_eq!(words[1].key().as_str(), "これ");
    }

    #[test]
    fn test_unknown_layout_fails() {
        assert!(serde_json::from_str::<DeckFile>(r#"{ "cards": [] }"#).is_err());
    }
}
