use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use pairing_engine::{DeckSeed, GameMode, GameState, MasteryLog, MasteryReport};
use serde::Serialize;
use tracing::info;

use crate::{
    command::play::app::{PlayApp, TransitionDelays},
    deck::DeckArgs,
    logging,
    tui::Runtime,
    util::Output,
};

mod app;
mod screen;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    deck: DeckArgs,
    /// How long a wrong pair stays highlighted, in milliseconds
    #[clap(long, default_value_t = 800)]
    flash_delay_ms: u64,
    /// Pause after the last pair of a section, in milliseconds
    #[clap(long, default_value_t = 500)]
    advance_delay_ms: u64,
    /// Write the mastery report to this file on exit
    #[clap(long)]
    results_out: Option<PathBuf>,
    /// Write logs to this file (nothing is logged otherwise)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

/// Contents of `--results-out`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayResults<'a> {
    finished_at: DateTime<Utc>,
    deck: &'a Path,
    seed: DeckSeed,
    is_complete: bool,
    mode: GameMode,
    report: MasteryReport,
    first_attempts: &'a MasteryLog,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        deck,
        flash_delay_ms,
        advance_delay_ms,
        results_out,
        log_file,
    } = arg;

    if let Some(path) = log_file {
        logging::init_file(path)?;
    }

    let words = deck.load_words()?;
    let seed = deck.seed();
    info!(%seed, "starting interactive exercise");
    let state = GameState::with_seed(words, deck.config(), seed);

    let delays = TransitionDelays {
        error_flash: Duration::from_millis(*flash_delay_ms),
        section_advance: Duration::from_millis(*advance_delay_ms),
    };
    let mut app = PlayApp::new(state, delays);
    Runtime::new()
        .run(&mut app)
        .context("Terminal UI failed")?;

    let (state, log) = app.into_session().into_parts();
    info!(score = %state.score(), complete = state.is_complete(), "exercise closed");

    if let Some(path) = results_out {
        let results = PlayResults {
            finished_at: Utc::now(),
            deck: &deck.deck,
            seed,
            is_complete: state.is_complete(),
            mode: state.mode(),
            report: MasteryReport::from_state(&state),
            first_attempts: &log,
        };
        Output::save_json(&results, Some(path.clone()))?;
        info!(path = %path.display(), "results written");
    }

    Ok(())
}
