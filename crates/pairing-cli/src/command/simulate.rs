use std::{collections::BTreeSet, path::PathBuf};

use anyhow::Context as _;
use pairing_engine::{
    Action, CardRef, DeckSeed, ErrorSet, ExerciseObserver, ExerciseSession, ExerciseStats,
    GameMode, GameState, MasteryLog, MasteryReport, Score, Section, WordId,
};
use rand::{
    SeedableRng as _,
    distr::{Bernoulli, Distribution as _},
    seq::IndexedRandom as _,
};
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::{debug, info};

use crate::{deck::DeckArgs, logging, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    deck: DeckArgs,
    /// Chance of mis-pairing a word the first time it appears in a pass
    #[clap(long, default_value_t = 0.2)]
    mistake_rate: f64,
    /// Maximum number of retry passes after the normal pass
    #[clap(long, default_value_t = 3)]
    retries: usize,
    /// Output file path (stdout when omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct PassSummary {
    mode: GameMode,
    score: Score,
    word_count: usize,
    wrong_words: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationSummary {
    seed: DeckSeed,
    mistake_rate: f64,
    passes: Vec<PassSummary>,
    final_score: Score,
    error_keys: ErrorSet,
    stats: ExerciseStats,
    report: MasteryReport,
    first_attempts: MasteryLog,
}

/// Scripted player: pairs every word correctly, sometimes after one wrong try.
#[derive(Debug)]
struct SimulatedPlayer {
    rng: Pcg32,
    mistakes: Bernoulli,
}

impl SimulatedPlayer {
    fn new(seed: DeckSeed, mistake_rate: f64) -> anyhow::Result<Self> {
        let mistakes = Bernoulli::new(mistake_rate)
            .with_context(|| format!("Invalid mistake rate: {mistake_rate}"))?;
        Ok(Self {
            rng: Pcg32::from_seed(seed.to_bytes()),
            mistakes,
        })
    }

    /// Plays the current pass until the state is complete.
    fn play_pass<O>(&mut self, session: &mut ExerciseSession<O>) -> PassSummary
    where
        O: ExerciseObserver,
    {
        let mode = session.state().mode();
        let word_count = session
            .state()
            .sections()
            .iter()
            .map(Section::len)
            .sum();
        let mut seen = BTreeSet::new();

        while let Some(section) = session.state().current_section()
            && !session.state().is_complete()
        {
            let ids: Vec<WordId> = section.words().iter().map(|w| w.id.clone()).collect();
            for id in &ids {
                if seen.insert(id.clone()) && self.mistakes.sample(&mut self.rng) {
                    let candidates: Vec<&WordId> = ids
                        .iter()
                        .filter(|other| *other != id && !session.state().is_matched(other))
                        .collect();
                    if let Some(&wrong) = candidates.choose(&mut self.rng) {
                        debug!(word_id = %id, paired_with = %wrong, "simulated mistake");
                        session.dispatch(Action::Select(CardRef::prompt(id.clone())));
                        session.dispatch(Action::Select(CardRef::meaning(wrong.clone())));
                        session.dispatch(Action::CommitPendingTransition);
                    }
                }
                session.dispatch(Action::Select(CardRef::prompt(id.clone())));
                session.dispatch(Action::Select(CardRef::meaning(id.clone())));
            }
            session.dispatch(Action::CommitPendingTransition);
        }

        let state = session.state();
        info!(
            mode = %mode,
            score = %state.score(),
            wrong_words = state.global_errors().len(),
            "pass finished"
        );
        PassSummary {
            mode,
            score: state.score(),
            word_count,
            wrong_words: state.global_errors().len(),
        }
    }
}

fn simulate(
    state: GameState,
    seed: DeckSeed,
    mistake_rate: f64,
    retries: usize,
) -> anyhow::Result<SimulationSummary> {
    let mut player = SimulatedPlayer::new(seed, mistake_rate)?;
    let mut session = ExerciseSession::new(state, MasteryLog::new());

    let mut passes = vec![player.play_pass(&mut session)];
    while passes.len() <= retries && session.state().can_retry() {
        session.dispatch(Action::StartRetry);
        passes.push(player.play_pass(&mut session));
    }

    let (state, first_attempts) = session.into_parts();
    Ok(SimulationSummary {
        seed,
        mistake_rate,
        passes,
        final_score: state.score(),
        error_keys: state.global_errors().clone(),
        stats: state.stats().clone(),
        report: MasteryReport::from_state(&state),
        first_attempts,
    })
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        deck,
        mistake_rate,
        retries,
        output,
    } = arg;

    logging::init_stderr();

    let words = deck.load_words()?;
    let seed = deck.seed();
    info!(%seed, mistake_rate, retries, "simulating exercise");
    let state = GameState::with_seed(words, deck.config(), seed);

    let summary = simulate(state, seed, *mistake_rate, *retries)?;
    info!(
        final_score = %summary.final_score,
        passes = summary.passes.len(),
        "simulation finished"
    );
    Output::save_json(&summary, output.clone())
}
