pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Why a move, rotate, or drop request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PieceMoveError {
    /// The requested position overlaps the board bounds or settled cells.
    #[display("piece colliding at the requested position")]
    Collision,
    /// The session has no controllable piece (idle, paused, or game over).
    #[display("no piece is in play")]
    NoPieceInPlay,
}
