use blockfall_engine::{GameSession, SessionPhase};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// The whole session: stats panel, well, and next-piece preview, with a
/// phase overlay on top of the well when the game is not running.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self { session }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(1, 0);
        let border_style = match self.session.phase() {
            SessionPhase::Idle => color::GRAY,
            SessionPhase::Running => color::WHITE,
            SessionPhase::Paused => color::YELLOW,
            SessionPhase::GameOver => color::RED,
        };

        let game_board = {
            let widget = BoardDisplay::new(self.session.board()).block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
            if let Some(piece) = self.session.current_piece() {
                widget.falling_piece(piece)
            } else {
                widget
            }
        };
        let next_panel = PieceDisplay::new(self.session.next_piece().kind()).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let session_stats = SessionStatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [stats_column, board_column, next_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(stats_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(board_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(next_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        let popup = match self.session.phase() {
            SessionPhase::Running => None,
            SessionPhase::Idle => Some((
                Text::from("PRESS S TO START"),
                Style::new().fg(color::BLACK).bg(color::WHITE),
            )),
            SessionPhase::Paused => Some((
                Text::from("PAUSED"),
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            )),
            SessionPhase::GameOver => Some((
                Text::from(vec![
                    Line::from("GAME OVER!!"),
                    Line::from(format!("SCORE {}", self.session.stats().score())),
                ]),
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
        };

        if let Some((text, style)) = popup {
            let text = text.style(style).centered();
            let text_height = u16::try_from(text.height()).unwrap();
            let block = Block::new().style(style);
            let area = board_area.centered(
                Constraint::Length(game_board_width),
                Constraint::Length(text_height + 2),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(text_height)), buf);
        }
    }
}
