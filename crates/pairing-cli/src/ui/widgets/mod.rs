use pairing_engine::ScoreTier;
use ratatui::{layout::Rect, style::Style, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, help_display::*, result_display::*, stats_display::*,
};

mod board_display;
mod help_display;
mod result_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const GREEN: Color = Color::Rgb(0, 200, 83);
    pub const YELLOW: Color = Color::Rgb(255, 214, 0);
    pub const RED: Color = Color::Rgb(229, 57, 53);
    pub const CYAN: Color = Color::Rgb(0, 229, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const DIM: Style = fg_bg(color::GRAY, color::BLACK);
    pub const ACCENT: Style = fg_bg(color::CYAN, color::BLACK);

    pub const CARD: Style = DEFAULT;
    pub const MATCHED: Style = fg_bg(color::GREEN, color::BLACK);
    pub const SELECTED: Style = fg_bg(color::BLACK, color::CYAN);
    pub const ERROR: Style = fg_bg(color::WHITE, color::RED);

    pub const EXCELLENT: Style = fg_bg(color::GREEN, color::BLACK);
    pub const GOOD: Style = fg_bg(color::YELLOW, color::BLACK);
    pub const NEEDS_PRACTICE: Style = fg_bg(color::RED, color::BLACK);
}

fn tier_style(tier: ScoreTier) -> Style {
    match tier {
        ScoreTier::Excellent => style::EXCELLENT,
        ScoreTier::Good => style::GOOD,
        ScoreTier::NeedsPractice => style::NEEDS_PRACTICE,
    }
}

fn tier_label(tier: ScoreTier) -> &'static str {
    match tier {
        ScoreTier::Excellent => "Excellent!",
        ScoreTier::Good => "Good job",
        ScoreTier::NeedsPractice => "Keep practicing",
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
