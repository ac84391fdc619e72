use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::board::BOARD_WIDTH;

/// One rotation state of a piece, as a row-major occupancy grid.
///
/// Grids have kind-specific dimensions: the horizontal I piece is 1×4, the
/// O piece 2×2, most others 2×3 or 3×2. They are fixed lookup data, never
/// derived or mutated.
pub type RotationGrid = &'static [&'static [bool]];

/// A falling piece: kind, rotation state, and board-relative position.
///
/// `(x, y)` is the board column/row of the rotation grid's top-left cell.
/// Coordinates are signed so a piece can sit partially above row 0 right
/// after spawning. Pieces are immutable values; movement and rotation return
/// new instances, and nothing here consults the board. Collision checks
/// belong to [`Board::collides`](crate::Board::collides).
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::T);
/// let turned = piece.translated(-1, 0).rotated();
/// assert_eq!(turned.rotation(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: usize,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece at its spawn placement: rotation state 0, `y = 0`,
    /// horizontally centered from the rotation-0 grid width.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        let width = kind.rotation_grids()[0][0].len();
        Self {
            kind,
            rotation: 0,
            x: BOARD_WIDTH as i32 / 2 - width as i32 / 2,
            y: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns the occupancy grid of the current rotation state.
    ///
    /// The rotation index is normalized modulo the kind's state count before
    /// lookup, so this is total for any stored rotation value.
    #[must_use]
    pub fn grid(&self) -> RotationGrid {
        let grids = self.kind.rotation_grids();
        grids[self.rotation % grids.len()]
    }

    /// Iterates over the absolute board coordinates `(x, y)` of the occupied
    /// cells in the current rotation state. Every piece occupies exactly
    /// four cells.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.grid().iter().enumerate().flat_map(move |(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|&(_, &occupied)| occupied)
                .map(move |(col, _)| (self.x + col as i32, self.y + row as i32))
        })
    }

    /// Returns the piece shifted by `(dx, dy)`, without collision checks.
    #[must_use]
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            rotation: self.rotation,
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the piece advanced to its next rotation state, wrapping
    /// modulo the kind's state count. Position is unchanged.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            kind: self.kind,
            rotation: (self.rotation + 1) % self.kind.rotation_grids().len(),
            x: self.x,
            y: self.y,
        }
    }
}

/// Enum representing the kind of piece.
///
/// Discriminants are the board cell codes of the classic game (1..=7);
/// code 0, the empty cell, is `None` at the [`Cell`](crate::Cell) level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 1,
    /// O-piece.
    O = 2,
    /// T-piece.
    T = 3,
    /// S-piece.
    S = 4,
    /// Z-piece.
    Z = 5,
    /// J-piece.
    J = 6,
    /// L-piece.
    L = 7,
}

/// Uniform draw over the seven kinds, one independent sample per piece.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::T,
            3 => PieceKind::S,
            4 => PieceKind::Z,
            5 => PieceKind::J,
            _ => PieceKind::L,
        }
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    /// Returns the ordered rotation states of this kind.
    ///
    /// State counts differ per kind: I and S and Z have 2, O has 1, T and J
    /// and L have 4. Rotation indices wrap modulo this slice's length.
    #[must_use]
    pub const fn rotation_grids(self) -> &'static [RotationGrid] {
        match self {
            PieceKind::I => &I_GRIDS,
            PieceKind::O => &O_GRIDS,
            PieceKind::T => &T_GRIDS,
            PieceKind::S => &S_GRIDS,
            PieceKind::Z => &Z_GRIDS,
            PieceKind::J => &J_GRIDS,
            PieceKind::L => &L_GRIDS,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('S'), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

const C: bool = true;
const E: bool = false;

const I_GRIDS: [RotationGrid; 2] = [
    &[&[C, C, C, C]],
    &[&[C], &[C], &[C], &[C]],
];

const O_GRIDS: [RotationGrid; 1] = [
    &[&[C, C], &[C, C]],
];

const T_GRIDS: [RotationGrid; 4] = [
    &[&[E, C, E], &[C, C, C]],
    &[&[C, E], &[C, C], &[C, E]],
    &[&[C, C, C], &[E, C, E]],
    &[&[E, C], &[C, C], &[E, C]],
];

const S_GRIDS: [RotationGrid; 2] = [
    &[&[E, C, C], &[C, C, E]],
    &[&[C, E], &[C, C], &[E, C]],
];

const Z_GRIDS: [RotationGrid; 2] = [
    &[&[C, C, E], &[E, C, C]],
    &[&[E, C], &[C, C], &[C, E]],
];

const J_GRIDS: [RotationGrid; 4] = [
    &[&[C, E, E], &[C, C, C]],
    &[&[C, C], &[C, E], &[C, E]],
    &[&[C, C, C], &[E, E, C]],
    &[&[E, C], &[E, C], &[C, C]],
];

const L_GRIDS: [RotationGrid; 4] = [
    &[&[E, E, C], &[C, C, C]],
    &[&[C, E], &[C, E], &[C, C]],
    &[&[C, C, C], &[C, E, E]],
    &[&[C, C], &[E, C], &[E, C]],
];

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    #[test]
    fn test_rotation_state_counts() {
        assert_eq!(PieceKind::I.rotation_grids().len(), 2);
        assert_eq!(PieceKind::O.rotation_grids().len(), 1);
        assert_eq!(PieceKind::T.rotation_grids().len(), 4);
        assert_eq!(PieceKind::S.rotation_grids().len(), 2);
        assert_eq!(PieceKind::Z.rotation_grids().len(), 2);
        assert_eq!(PieceKind::J.rotation_grids().len(), 4);
        assert_eq!(PieceKind::L.rotation_grids().len(), 4);
    }

    #[test]
    fn test_every_rotation_state_occupies_four_cells() {
        for kind in ALL_KINDS {
            for rotation in 0..kind.rotation_grids().len() {
                let piece = Piece {
                    kind,
                    rotation,
                    x: 0,
                    y: 0,
                };
                assert_eq!(
                    piece.occupied_cells().count(),
                    4,
                    "{kind:?} rotation {rotation}"
                );
            }
        }
    }

    #[test]
    fn test_kind_codes_match_classic_cell_values() {
        assert_eq!(PieceKind::I as u8, 1);
        assert_eq!(PieceKind::O as u8, 2);
        assert_eq!(PieceKind::T as u8, 3);
        assert_eq!(PieceKind::S as u8, 4);
        assert_eq!(PieceKind::Z as u8, 5);
        assert_eq!(PieceKind::J as u8, 6);
        assert_eq!(PieceKind::L as u8, 7);
    }

    #[test]
    fn test_spawn_centers_the_rotation_zero_grid() {
        // The I grid is 4 wide; every other kind's rotation-0 grid is 2 or 3
        // wide, which all center to column 4 on a width-10 board.
        assert_eq!(Piece::spawn(PieceKind::I).x(), 3);
        assert_eq!(Piece::spawn(PieceKind::O).x(), 4);
        assert_eq!(Piece::spawn(PieceKind::T).x(), 4);
        assert_eq!(Piece::spawn(PieceKind::S).x(), 4);
        assert_eq!(Piece::spawn(PieceKind::Z).x(), 4);
        assert_eq!(Piece::spawn(PieceKind::J).x(), 4);
        assert_eq!(Piece::spawn(PieceKind::L).x(), 4);

        for kind in ALL_KINDS {
            let piece = Piece::spawn(kind);
            assert_eq!(piece.y(), 0);
            assert_eq!(piece.rotation(), 0);
        }
    }

    #[test]
    fn test_full_rotation_cycle_restores_state_and_position() {
        for kind in ALL_KINDS {
            let spawn = Piece::spawn(kind).translated(-2, 5);
            let mut piece = spawn;
            for _ in 0..kind.rotation_grids().len() {
                piece = piece.rotated();
            }
            assert_eq!(piece, spawn, "{kind:?}");
        }
    }

    #[test]
    fn test_grid_lookup_normalizes_out_of_range_rotation() {
        let wild = Piece {
            kind: PieceKind::T,
            rotation: 6,
            x: 0,
            y: 0,
        };
        let normalized = Piece {
            kind: PieceKind::T,
            rotation: 2,
            x: 0,
            y: 0,
        };
        assert_eq!(wild.grid(), normalized.grid());
    }

    #[test]
    fn test_occupied_cells_are_board_absolute() {
        let piece = Piece {
            kind: PieceKind::O,
            rotation: 0,
            x: 4,
            y: 18,
        };
        let cells: Vec<_> = piece.occupied_cells().collect();
        assert_eq!(cells, [(4, 18), (5, 18), (4, 19), (5, 19)]);
    }

    #[test]
    fn test_t_piece_shape_offsets() {
        let rot0: Vec<_> = Piece {
            kind: PieceKind::T,
            rotation: 0,
            x: 0,
            y: 0,
        }
        .occupied_cells()
        .collect();
        assert_eq!(rot0, [(1, 0), (0, 1), (1, 1), (2, 1)]);

        let rot1: Vec<_> = Piece {
            kind: PieceKind::T,
            rotation: 1,
            x: 0,
            y: 0,
        }
        .occupied_cells()
        .collect();
        assert_eq!(rot1, [(0, 0), (0, 1), (1, 1), (0, 2)]);
    }

    #[test]
    fn test_vertical_i_piece_is_a_single_column() {
        let cells: Vec<_> = Piece {
            kind: PieceKind::I,
            rotation: 1,
            x: 7,
            y: 2,
        }
        .occupied_cells()
        .collect();
        assert_eq!(cells, [(7, 2), (7, 3), (7, 4), (7, 5)]);
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in ALL_KINDS {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('X'), None);
        assert_eq!(PieceKind::from_char('i'), None);
    }

    #[test]
    fn test_piece_kind_serializes_as_its_letter() {
        assert_eq!(serde_json::to_string(&PieceKind::I).unwrap(), "\"I\"");
        assert_eq!(serde_json::to_string(&PieceKind::L).unwrap(), "\"L\"");
        for kind in ALL_KINDS {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(serde_json::from_str::<PieceKind>(&json).unwrap(), kind);
        }
    }
}
