use crossterm::event::{Event, KeyCode};
use pairing_engine::{
    Action, CardRef, CardSide, ExerciseSession, GameEvent, GameMode, GameState, MasteryLog,
    PendingTransition, Section,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::{Block, Padding},
};
use tracing::debug;

use crate::ui::widgets::{
    BoardDisplay, HelpDisplay, KeyHint, ResultDisplay, StatsDisplay, style,
};

const PLAYING_HINTS: &[KeyHint] = &[
    (&["←", "→", "Tab"], "Column"),
    (&["↑", "↓"], "Move"),
    (&["Enter", "Space"], "Select"),
    (&["f"], "Furigana"),
    (&["o"], "Romaji"),
    (&["n"], "Restart"),
    (&["q"], "Quit"),
];

const COMPLETE_HINTS: &[KeyHint] = &[
    (&["r"], "Retry wrong words"),
    (&["n"], "Restart"),
    (&["q"], "Quit"),
];

/// Interactive board: cursor, display toggles and the session behind them.
#[derive(Debug)]
pub struct ExerciseScreen {
    session: ExerciseSession<MasteryLog>,
    cursor_side: CardSide,
    prompt_row: usize,
    meaning_row: usize,
    show_furigana: bool,
    show_romaji: bool,
    is_exiting: bool,
}

impl ExerciseScreen {
    pub fn new(state: GameState) -> Self {
        Self {
            session: ExerciseSession::new(state, MasteryLog::new()),
            cursor_side: CardSide::Prompt,
            prompt_row: 0,
            meaning_row: 0,
            show_furigana: true,
            show_romaji: true,
            is_exiting: false,
        }
    }

    pub fn state(&self) -> &GameState {
        self.session.state()
    }

    pub fn pending(&self) -> Option<PendingTransition> {
        self.state().pending()
    }

    pub fn should_exit(&self) -> bool {
        self.is_exiting
    }

    pub fn into_session(self) -> ExerciseSession<MasteryLog> {
        self.session
    }

    pub fn commit_pending(&mut self) {
        self.dispatch(Action::CommitPendingTransition);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        let is_playing = !self.state().is_complete();
        match event.code {
            KeyCode::Left if is_playing => self.cursor_side = CardSide::Prompt,
            KeyCode::Right if is_playing => self.cursor_side = CardSide::Meaning,
            KeyCode::Tab if is_playing => self.cursor_side = self.cursor_side.opposite(),
            KeyCode::Up if is_playing => self.move_cursor(false),
            KeyCode::Down if is_playing => self.move_cursor(true),
            KeyCode::Enter | KeyCode::Char(' ') if is_playing => {
                if let Some(card) = self.card_under_cursor() {
                    self.dispatch(Action::Select(card));
                }
            }
            KeyCode::Char('r') if self.state().can_retry() => self.dispatch(Action::StartRetry),
            KeyCode::Char('n') => self.dispatch(Action::Restart),
            KeyCode::Char('f') => self.show_furigana = !self.show_furigana,
            KeyCode::Char('o') => self.show_romaji = !self.show_romaji,
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let state = self.state();
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        let stats = StatsDisplay::new(state).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::horizontal(1))
                .style(style::DEFAULT),
        );
        let [stats_column, board_area] =
            Layout::horizontal([Constraint::Length(stats.width()), Constraint::Fill(1)])
                .spacing(1)
                .areas(main_area);
        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);

        let border_style = match (state.pending(), state.mode()) {
            (Some(PendingTransition::ClearErrorFlash), _) => style::NEEDS_PRACTICE,
            (Some(PendingTransition::SectionComplete), _) => style::EXCELLENT,
            (None, GameMode::Retry) => style::GOOD,
            (None, GameMode::Normal) => style::DEFAULT,
        };
        let title = match state.mode() {
            GameMode::Normal => " MATCH THE PAIRS ",
            GameMode::Retry => " RETRY WRONG WORDS ",
        };
        let mut board = BoardDisplay::new(state)
            .furigana(self.show_furigana)
            .romaji(self.show_romaji)
            .block(
                Block::bordered()
                    .title(Line::from(title).centered())
                    .border_style(border_style)
                    .padding(Padding::uniform(1))
                    .style(style::DEFAULT),
            );
        if !state.is_complete() {
            board = board.cursor(self.cursor_side, self.row());
        }

        let hints = if state.is_complete() {
            COMPLETE_HINTS
        } else {
            PLAYING_HINTS
        };

        frame.render_widget(stats, stats_area);
        frame.render_widget(board, board_area);
        frame.render_widget(HelpDisplay::new(hints), help_area);
        if state.is_complete() && state.section_count() > 0 {
            frame.render_widget(ResultDisplay::new(state), board_area);
        }
    }

    fn dispatch(&mut self, action: Action) {
        for event in self.session.dispatch(action) {
            debug!(?event, "game event");
            if matches!(
                event,
                GameEvent::SectionAdvanced { .. }
                    | GameEvent::RetryStarted { .. }
                    | GameEvent::Restarted { .. }
            ) {
                self.prompt_row = 0;
                self.meaning_row = 0;
                self.cursor_side = CardSide::Prompt;
            }
        }
    }

    fn row(&self) -> usize {
        match self.cursor_side {
            CardSide::Prompt => self.prompt_row,
            CardSide::Meaning => self.meaning_row,
        }
    }

    fn move_cursor(&mut self, down: bool) {
        let len = self.state().current_section().map_or(0, Section::len);
        if len == 0 {
            return;
        }
        let row = match self.cursor_side {
            CardSide::Prompt => &mut self.prompt_row,
            CardSide::Meaning => &mut self.meaning_row,
        };
        *row = if down {
            (*row + 1) % len
        } else {
            (*row + len - 1) % len
        };
    }

    fn card_under_cursor(&self) -> Option<CardRef> {
        let section = self.state().current_section()?;
        let word = match self.cursor_side {
            CardSide::Prompt => section.words().get(self.prompt_row)?,
            CardSide::Meaning => section.meanings().nth(self.meaning_row)?,
        };
        Some(CardRef::new(self.cursor_side, word.id.clone()))
    }
}
