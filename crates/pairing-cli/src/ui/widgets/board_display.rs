use pairing_engine::{CardRef, CardSide, GameState, PairingWord};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// The two card columns of the current section.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    state: &'a GameState,
    cursor: Option<(CardSide, usize)>,
    show_furigana: bool,
    show_romaji: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            cursor: None,
            show_furigana: true,
            show_romaji: true,
            block: None,
        }
    }

    pub fn cursor(self, side: CardSide, row: usize) -> Self {
        Self {
            cursor: Some((side, row)),
            ..self
        }
    }

    pub fn furigana(self, show_furigana: bool) -> Self {
        Self {
            show_furigana,
            ..self
        }
    }

    pub fn romaji(self, show_romaji: bool) -> Self {
        Self {
            show_romaji,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    /// Rows per card, shared by both columns so partners line up.
    fn card_height(&self) -> u16 {
        1 + u16::from(self.show_furigana) + u16::from(self.show_romaji)
    }

    fn card_style(&self, card: &CardRef, is_cursor: bool) -> Style {
        let base = if self.state.is_error_card(card) {
            style::ERROR
        } else if self.state.is_matched(&card.word_id) {
            style::MATCHED
        } else if self.state.selection().is_selected(card) {
            style::SELECTED
        } else {
            style::CARD
        };
        if is_cursor {
            base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            base
        }
    }

    fn card_text(&self, word: &'a PairingWord, side: CardSide) -> Text<'a> {
        match side {
            CardSide::Prompt => {
                let mut lines = vec![Line::from(word.word.as_str())];
                if self.show_furigana {
                    lines.push(Line::from(word.furigana.as_str()));
                }
                if self.show_romaji {
                    lines.push(Line::from(word.reading.as_str()));
                }
                Text::from(lines)
            }
            CardSide::Meaning => Text::from(word.meaning.as_str()),
        }
    }

    fn render_column(
        &self,
        side: CardSide,
        words: &[&'a PairingWord],
        area: Rect,
        buf: &mut Buffer,
    ) {
        let card_height = self.card_height();
        let rows = Layout::vertical((0..words.len()).map(|_| Constraint::Length(card_height)))
            .spacing(1)
            .split(area);

        for (row, (word, area)) in words.iter().copied().zip(rows.iter().copied()).enumerate() {
            let card = CardRef::new(side, word.id.clone());
            let is_cursor = self.cursor == Some((side, row));
            let style = self.card_style(&card, is_cursor);
            let text = self.card_text(word, side);
            // meaning cards sit vertically centered against taller prompt cards
            let text_area = match side {
                CardSide::Prompt => area,
                CardSide::Meaning => {
                    let [middle] = Layout::vertical([Constraint::Length(1)])
                        .flex(Flex::Center)
                        .areas(area);
                    buf.set_style(area, style);
                    middle
                }
            };
            text.style(style).centered().render(text_area, buf);
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let Some(section) = self.state.current_section() else {
            Line::styled("No words in this deck", style::DIM)
                .centered()
                .render(area, buf);
            return;
        };

        let [prompt_area, meaning_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
                .spacing(2)
                .areas(area);
        let prompts: Vec<_> = section.words().iter().collect();
        let meanings: Vec<_> = section.meanings().collect();
        self.render_column(CardSide::Prompt, &prompts, prompt_area, buf);
        self.render_column(CardSide::Meaning, &meanings, meaning_area, buf);
    }
}
