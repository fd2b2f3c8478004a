use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// `(keys, description)`; keys are joined with `/`.
pub type KeyHint<'a> = (&'a [&'a str], &'a str);

/// One-line key reference shown under the board.
#[derive(Debug)]
pub struct HelpDisplay<'a> {
    hints: &'a [KeyHint<'a>],
}

impl<'a> HelpDisplay<'a> {
    pub fn new(hints: &'a [KeyHint<'a>]) -> Self {
        Self { hints }
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::Gray);

impl Widget for HelpDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![];
        for (i, (keys, desc)) in self.hints.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            let keys = keys.join("/");
            spans.push(Span::styled(keys, KEY_STYLE));
            spans.push(Span::styled(format!(" {desc}"), DESCRIPTION_STYLE));
        }
        Line::from(spans).centered().render(area, buf);
    }
}
