use arrayvec::ArrayVec;

use super::piece::{Piece, PieceKind};

/// Board width in columns.
pub const BOARD_WIDTH: usize = 10;
/// Board height in rows.
pub const BOARD_HEIGHT: usize = 20;

/// A single board cell: empty, or settled by a piece of the given kind.
pub type Cell = Option<PieceKind>;

/// The playfield: [`BOARD_HEIGHT`] rows of [`BOARD_WIDTH`] cells, row 0 at
/// the top. The board only stores settled cells; the falling piece lives in
/// the session and is tested against the board with [`Board::collides`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Board {
    /// The board with every cell empty.
    pub const EMPTY: Self = Self {
        cells: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
    };

    /// Returns the cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is out of range.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y][x]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> + '_ {
        self.cells.iter()
    }

    /// Tests whether the piece overlaps the board bounds or settled cells.
    ///
    /// A piece cell at column `c`, row `r` collides when `c` is outside
    /// `0..BOARD_WIDTH`, when `r >= BOARD_HEIGHT`, or when `r >= 0` and the
    /// board cell there is settled. Cells above the top edge (`r < 0`) are
    /// never tested against board contents, only against the side and bottom
    /// bounds, so a freshly spawned piece may extend above the visible rows.
    ///
    /// Pure and total: rotation lookup normalizes out-of-range indices, and
    /// no input panics.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn collides(&self, piece: Piece) -> bool {
        for (x, y) in piece.occupied_cells() {
            if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
                return true;
            }
            if y >= 0 && self.cells[y as usize][x as usize].is_some() {
                return true;
            }
        }
        false
    }

    /// Settles a piece, writing its kind into every occupied cell.
    ///
    /// Rows above the top edge are discarded. The placement is expected to
    /// be collision checked; the session only locks positions it has
    /// validated.
    #[expect(clippy::cast_sign_loss)]
    pub fn fill_piece(&mut self, piece: Piece) {
        for (x, y) in piece.occupied_cells() {
            if y >= 0 {
                self.cells[y as usize][x as usize] = Some(piece.kind());
            }
        }
    }

    /// Removes every row with no empty cell, shifting the rows above it down
    /// and refilling the top with empty rows.
    ///
    /// Multiple full rows collapse in one pass: the bottom-to-top scan keeps
    /// the write offset steady across removals instead of advancing past the
    /// row that just shifted into place.
    ///
    /// Returns the indices of the removed rows as they were before the
    /// collapse, bottom-most first.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, BOARD_HEIGHT> {
        let mut cleared = ArrayVec::new();

        for y in (0..BOARD_HEIGHT).rev() {
            if self.cells[y].iter().all(Option::is_some) {
                cleared.push(y);
                continue;
            }
            let shift = cleared.len();
            if shift > 0 {
                self.cells[y + shift] = self.cells[y];
            }
        }

        for row in &mut self.cells[..cleared.len()] {
            *row = [None; BOARD_WIDTH];
        }
        cleared
    }

    /// Builds a board from ASCII art, for tests and fixtures.
    ///
    /// `.` is an empty cell; a kind letter (`I`, `O`, `T`, `S`, `Z`, `J`,
    /// `L`) is a settled cell of that kind. Rows are listed top to bottom
    /// and anchored to the bottom of the board, so fixtures only spell out
    /// the settled stack. Blank lines and indentation are ignored.
    ///
    /// # Panics
    ///
    /// Panics on rows that are not exactly [`BOARD_WIDTH`] cells wide, on
    /// more than [`BOARD_HEIGHT`] rows, or on characters other than `.` and
    /// the kind letters.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "expected at most {BOARD_HEIGHT} rows, got {}",
            lines.len()
        );

        let top = BOARD_HEIGHT - lines.len();
        for (dy, line) in lines.iter().enumerate() {
            assert_eq!(
                line.chars().count(),
                BOARD_WIDTH,
                "expected exactly {BOARD_WIDTH} cells at row {dy}"
            );
            for (x, c) in line.chars().enumerate() {
                board.cells[top + dy][x] = match c {
                    '.' => None,
                    _ => Some(
                        PieceKind::from_char(c)
                            .unwrap_or_else(|| panic!("invalid cell {c:?} at row {dy}")),
                    ),
                };
            }
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied_count(board: &Board) -> usize {
        board.rows().flatten().filter(|cell| cell.is_some()).count()
    }

    #[test]
    fn test_empty_board_has_no_settled_cells() {
        assert_eq!(occupied_count(&Board::EMPTY), 0);
        assert_eq!(Board::from_ascii(""), Board::EMPTY);
    }

    #[test]
    fn test_from_ascii_anchors_rows_to_the_bottom() {
        let board = Board::from_ascii("I........J");
        assert_eq!(board.cell(0, 19), Some(PieceKind::I));
        assert_eq!(board.cell(9, 19), Some(PieceKind::J));
        assert_eq!(occupied_count(&board), 2);
    }

    mod collision {
        use super::*;

        #[test]
        fn test_spawn_never_collides_on_an_empty_board() {
            let kinds = [
                PieceKind::I,
                PieceKind::O,
                PieceKind::T,
                PieceKind::S,
                PieceKind::Z,
                PieceKind::J,
                PieceKind::L,
            ];
            for kind in kinds {
                assert!(
                    !Board::EMPTY.collides(Piece::spawn(kind)),
                    "{kind:?} collides at spawn"
                );
            }
        }

        #[test]
        fn test_side_and_bottom_bounds_collide() {
            let board = Board::EMPTY;
            let o = Piece::spawn(PieceKind::O);

            // O spans 2 columns and 2 rows from its top-left corner.
            assert!(board.collides(o.translated(-5, 0)), "past the left wall");
            assert!(board.collides(o.translated(5, 0)), "past the right wall");
            assert!(board.collides(o.translated(0, 19)), "past the floor");
            assert!(!board.collides(o.translated(-4, 0)), "flush left");
            assert!(!board.collides(o.translated(4, 0)), "flush right");
            assert!(!board.collides(o.translated(0, 18)), "resting on the floor");
        }

        #[test]
        fn test_settled_cells_collide() {
            let board = Board::from_ascii("OO........");
            let o = Piece::spawn(PieceKind::O).translated(-4, 18);
            assert!(board.collides(o));
            assert!(!board.collides(o.translated(2, 0)));
        }

        #[test]
        fn test_rows_above_the_top_only_collide_through_visible_cells() {
            let mut board = Board::EMPTY;
            let vertical_i = Piece::spawn(PieceKind::I).rotated().translated(-3, -3);
            assert_eq!(vertical_i.x(), 0);

            // Occupied rows are -3..=0 in column 0; only row 0 is visible.
            assert!(!board.collides(vertical_i));

            board.cells[0][0] = Some(PieceKind::L);
            assert!(board.collides(vertical_i));

            // Fully above the board, nothing visible left to test against.
            assert!(!board.collides(vertical_i.translated(0, -1)));
        }
    }

    mod filling {
        use super::*;

        #[test]
        fn test_fill_piece_writes_the_kind_at_absolute_cells() {
            let mut board = Board::EMPTY;
            board.fill_piece(Piece::spawn(PieceKind::O).translated(0, 18));

            assert_eq!(board.cell(4, 18), Some(PieceKind::O));
            assert_eq!(board.cell(5, 18), Some(PieceKind::O));
            assert_eq!(board.cell(4, 19), Some(PieceKind::O));
            assert_eq!(board.cell(5, 19), Some(PieceKind::O));
            assert_eq!(occupied_count(&board), 4);
        }

        #[test]
        fn test_fill_piece_discards_rows_above_the_top() {
            let mut board = Board::EMPTY;
            let straddling = Piece::spawn(PieceKind::I).rotated().translated(0, -2);
            board.fill_piece(straddling);

            assert_eq!(board.cell(3, 0), Some(PieceKind::I));
            assert_eq!(board.cell(3, 1), Some(PieceKind::I));
            assert_eq!(occupied_count(&board), 2);
        }
    }

    mod clearing {
        use super::*;

        #[test]
        fn test_single_full_row_is_removed() {
            let mut board = Board::from_ascii("TTTTTTTTTT");
            let cleared = board.clear_full_rows();

            assert_eq!(cleared.as_slice(), [19]);
            assert_eq!(board, Board::EMPTY);
        }

        #[test]
        fn test_partial_rows_are_kept() {
            let mut board = Board::from_ascii("TTTTTTTTT.");
            let cleared = board.clear_full_rows();

            assert!(cleared.is_empty());
            assert_eq!(board, Board::from_ascii("TTTTTTTTT."));
        }

        #[test]
        fn test_consecutive_full_rows_collapse_in_one_pass() {
            let mut board = Board::from_ascii(
                "
                ..S.......
                ZZZZZZZZZZ
                TTTTTTTTTT
                ",
            );
            let cleared = board.clear_full_rows();

            assert_eq!(cleared.as_slice(), [19, 18]);
            assert_eq!(board, Board::from_ascii("..S......."));
        }

        #[test]
        fn test_separated_full_rows_collapse_in_one_pass() {
            let mut board = Board::from_ascii(
                "
                JJJJJJJJJJ
                .LLLLLLLLL
                SSSSSSSSSS
                ",
            );
            let cleared = board.clear_full_rows();

            assert_eq!(cleared.as_slice(), [19, 17]);
            assert_eq!(board, Board::from_ascii(".LLLLLLLLL"));
        }

        #[test]
        fn test_every_row_full_clears_the_whole_board() {
            let mut board = Board::EMPTY;
            board.cells = [[Some(PieceKind::I); BOARD_WIDTH]; BOARD_HEIGHT];

            let cleared = board.clear_full_rows();
            assert_eq!(cleared.len(), BOARD_HEIGHT);
            assert_eq!(board, Board::EMPTY);
        }
    }
}
