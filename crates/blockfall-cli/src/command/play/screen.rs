use std::time::Instant;

use blockfall_engine::{GameSession, SessionPhase};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::ui::widgets::SessionDisplay;

#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    last_update: Instant,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            last_update: Instant::now(),
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display = SessionDisplay::new(&self.session);
        let help_text = match self.session.phase() {
            SessionPhase::Idle => "Controls: S / Enter (Start) | Q (Quit)",
            SessionPhase::Running => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Hard Drop) | P (Pause) | R (Reset) | Q (Quit)"
            }
            SessionPhase::Paused => "Controls: P (Resume) | R (Reset) | Q (Quit)",
            SessionPhase::GameOver => "Controls: R (Reset) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(24), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    /// Keys are forwarded regardless of phase; the session refuses what the
    /// current phase does not allow.
    pub fn handle_event(&mut self, event: &Event) {
        if let Some(key) = event.as_key_event() {
            match key.code {
                KeyCode::Left => _ = self.session.try_move_left(),
                KeyCode::Right => _ = self.session.try_move_right(),
                KeyCode::Down => _ = self.session.try_soft_drop(),
                KeyCode::Up => _ = self.session.try_rotate(),
                KeyCode::Char(' ') => self.session.hard_drop(),
                KeyCode::Char('s') | KeyCode::Enter => self.session.start(),
                KeyCode::Char('p') => self.session.toggle_pause(),
                KeyCode::Char('r') => self.session.reset(),
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
    }

    /// Feeds real elapsed time into the session. Runs in every phase; the
    /// session ignores time while it is not running, so resuming from pause
    /// does not replay the paused duration.
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        self.last_update = now;
        self.session.tick(elapsed);
    }
}
