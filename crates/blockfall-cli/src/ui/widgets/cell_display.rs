use blockfall_engine::{Cell, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// One board cell rendered as a 2x1 terminal patch.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_kind(kind: PieceKind) -> Self {
        let style = match kind {
            PieceKind::I => style::I_CELL,
            PieceKind::O => style::O_CELL,
            PieceKind::T => style::T_CELL,
            PieceKind::S => style::S_CELL,
            PieceKind::Z => style::Z_CELL,
            PieceKind::J => style::J_CELL,
            PieceKind::L => style::L_CELL,
        };
        Self::new(style, "")
    }

    /// Empty cells render as a dim dot so the well stays visible.
    pub fn from_cell(cell: Cell) -> Self {
        match cell {
            Some(kind) => Self::from_kind(kind),
            None => Self::new(style::EMPTY_DOT, "."),
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
