use std::iter;

use pairing_engine::{GameState, Section};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{style, tier_style};

/// Side panel with the running score and progress counters.
pub struct StatsDisplay<'a> {
    state: &'a GameState,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    Score,
    LabelValue(&'static str, &'static dyn Fn(&GameState) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::Score,
    Row::Empty,
    Row::LabelValue("MODE:", &|state| state.mode().to_string()),
    Row::LabelValue("SECTION:", &|state| {
        if state.section_count() == 0 {
            "-".to_string()
        } else {
            format!(
                "{}/{}",
                state.current_section_index() + 1,
                state.section_count()
            )
        }
    }),
    Row::LabelValue("MATCHED:", &|state| {
        let total = state.current_section().map_or(0, Section::len);
        format!("{}/{total}", state.matched_pairs().len())
    }),
    Row::Empty,
    Row::LabelValue("WORDS:", &|state| state.original_total_words().to_string()),
    Row::LabelValue("WRONG:", &|state| {
        state.effective_errors().len().to_string()
    }),
    Row::LabelValue("PAIRS:", &|state| state.stats().correct_pairs().to_string()),
    Row::LabelValue("MISSES:", &|state| {
        state.stats().wrong_attempts().to_string()
    }),
    Row::LabelValue("RETRIES:", &|state| {
        state.stats().retry_passes().to_string()
    }),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas[..].iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::Score => {
                    let score = self.state.score();
                    Line::styled(score.to_string(), tier_style(score.tier()))
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.state), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
