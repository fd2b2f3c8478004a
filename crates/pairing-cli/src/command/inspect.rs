use std::{collections::BTreeMap, path::PathBuf};

use pairing_engine::{DeckSeed, GameState, KanjiId, PairingWord, WordId};
use serde::Serialize;

use crate::{deck::DeckArgs, logging, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InspectArg {
    #[clap(flatten)]
    deck: DeckArgs,
    /// Output file path (stdout when omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckOverview {
    word_count: usize,
    duplicate_ids: usize,
    words_per_kanji: BTreeMap<KanjiId, usize>,
    seed: DeckSeed,
    section_size: usize,
    sections: Vec<SectionPlan>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SectionPlan {
    prompts: Vec<WordId>,
    meanings: Vec<WordId>,
}

fn overview(words: Vec<PairingWord>, args: &DeckArgs, seed: DeckSeed) -> DeckOverview {
    let loaded = words.len();
    let state = GameState::with_seed(words, args.config(), seed);

    let mut words_per_kanji: BTreeMap<KanjiId, usize> = BTreeMap::new();
    for word in state.words() {
        *words_per_kanji.entry(word.kanji_id.clone()).or_default() += 1;
    }
    let sections = state
        .sections()
        .iter()
        .map(|section| SectionPlan {
            prompts: section.words().iter().map(|w| w.id.clone()).collect(),
            meanings: section.meanings().map(|w| w.id.clone()).collect(),
        })
        .collect();

    DeckOverview {
        word_count: state.original_total_words(),
        duplicate_ids: loaded - state.original_total_words(),
        words_per_kanji,
        seed,
        section_size: state.config().section_size(),
        sections,
    }
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let InspectArg { deck, output } = arg;

    logging::init_stderr();

    let words = deck.load_words()?;
    let overview = overview(words, deck, deck.seed());
    Output::save_json(&overview, output.clone())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    #[derive(Debug, clap::Parser)]
    struct TestArgs {
        #[clap(flatten)]
        deck: DeckArgs,
    }

    #[test]
    fn test_overview_plan() {
        let args = TestArgs::parse_from([
            "test",
            "deck.json",
            "--section-size",
            "2",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
        ]);
        let words = vec![
            PairingWord::new("a", "1", "山", "mountain"),
            PairingWord::new("b", "1", "川", "river"),
            PairingWord::new("c", "2", "木", "tree"),
            PairingWord::new("a", "3", "火", "fire"),
        ];
        let seed = args.deck.seed();
        let overview = overview(words, &args.deck, seed);

        assert_eq!(overview.word_count, 3);
        assert_eq!(overview.duplicate_ids, 1);
        assert_eq!(overview.words_per_kanji[&KanjiId::from("1")], 2);
        assert_eq!(overview.sections.len(), 2);
        assert_eq!(overview.sections[1].prompts.len(), 1);
        assert_eq!(seed.to_string(), "000102030405060708090a0b0c0d0e0f");
    }
}
