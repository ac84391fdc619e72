use blockfall_engine::PieceKind;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BlockExt as _, Widget},
};

use crate::ui::widgets::CellDisplay;

/// A piece preview: the spawn rotation, centered in a 4x2 cell panel.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    kind: PieceKind,
    block: Option<Block<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new(kind: PieceKind) -> Self {
        Self { kind, block: None }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        // Every spawn rotation fits in 4x2 cells.
        let grid = self.kind.rotation_grids()[0];
        let grid_width = u16::try_from(grid[0].len()).unwrap();
        let grid_height = u16::try_from(grid.len()).unwrap();
        let piece_area = area.centered(
            Constraint::Length(grid_width * CellDisplay::width()),
            Constraint::Length(grid_height * CellDisplay::height()),
        );

        let col_constraints = (0..grid_width).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..grid_height).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied = CellDisplay::from_kind(self.kind);
        for (cells, row) in grid_rows.zip(grid.iter().copied()) {
            for (cell_area, filled) in cells.into_iter().zip(row.iter().copied()) {
                if filled {
                    Widget::render(&occupied, cell_area, buf);
                }
            }
        }
    }
}
