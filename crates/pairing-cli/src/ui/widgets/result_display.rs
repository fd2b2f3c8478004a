use pairing_engine::{FirstAttemptStats, GameState, WordKey};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{style, tier_label, tier_style};

/// Popup summarizing a completed pass.
#[derive(Debug)]
pub struct ResultDisplay<'a> {
    state: &'a GameState,
}

impl<'a> ResultDisplay<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let score = self.state.score();
        let tier = score.tier();
        let stats =
            FirstAttemptStats::from_errors(self.state.words().len(), self.state.global_errors());
        let title = if self.state.mode().is_retry() {
            "RETRY COMPLETE"
        } else {
            "EXERCISE COMPLETE"
        };

        let mut lines = vec![
            Line::styled(title, style::ACCENT),
            Line::default(),
            Line::from(vec![
                Span::styled("Score: ", style::DEFAULT),
                Span::styled(score.to_string(), tier_style(tier)),
                Span::styled(format!("  {}", tier_label(tier)), tier_style(tier)),
            ]),
            Line::styled(
                format!(
                    "First attempt: {}/{} ({}%)",
                    stats.correct_first_attempt, stats.total_words, stats.first_attempt_accuracy
                ),
                style::DEFAULT,
            ),
        ];

        let wrong: Vec<_> = self.state.global_errors().iter().map(WordKey::as_str).collect();
        if !wrong.is_empty() {
            lines.push(Line::default());
            lines.push(Line::styled("Words to review:", style::DEFAULT));
            lines.push(Line::styled(wrong.join("  "), style::NEEDS_PRACTICE));
        }

        lines.push(Line::default());
        let hint = if self.state.can_retry() {
            "r: retry wrong words | n: restart | q: quit"
        } else {
            "n: restart | q: quit"
        };
        lines.push(Line::styled(hint, style::DIM));
        lines
    }
}

impl Widget for ResultDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX) + 2;
        let width = lines
            .iter()
            .map(|line| u16::try_from(line.width()).unwrap_or(u16::MAX))
            .max()
            .unwrap_or(0)
            .saturating_add(6);

        let area = area.centered(Constraint::Length(width), Constraint::Length(height));
        let block = Block::bordered()
            .border_style(tier_style(self.state.score().tier()))
            .padding(Padding::horizontal(2))
            .style(style::DEFAULT);
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        Text::from(lines).centered().render(inner, buf);
    }
}
