use std::{mem, time::Duration};

use rand::Rng as _;

use crate::{
    PieceMoveError,
    core::{board::Board, piece::Piece},
};

use super::{
    GameStats,
    piece_generator::{PieceGenerator, PieceSeed},
};

/// Where a session is in its lifecycle.
///
/// `Idle` is the pre-start state, entered again after [`GameSession::reset`].
/// `GameOver` is terminal until a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionPhase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// A single game from idle to game over.
///
/// Owns the board, the current and next pieces, the piece generator, and the
/// statistics. All mutation goes through the operations below; invalid
/// attempts are no-ops or [`PieceMoveError`]s, never panics, and every
/// committed placement has passed [`Board::collides`], so the board can not
/// reach an inconsistent configuration.
///
/// The session is clock agnostic: the host feeds elapsed time into
/// [`Self::tick`] and the session performs one automatic drop each time the
/// accumulated time passes the level's fall interval.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current: Option<Piece>,
    next: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    phase: SessionPhase,
    since_last_drop: Duration,
    seed: PieceSeed,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates an idle session with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed so the piece sequence
    /// can be replayed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut generator = PieceGenerator::with_seed(seed);
        let next = Piece::spawn(generator.pop_next());
        Self {
            board: Board::EMPTY,
            current: None,
            next,
            generator,
            stats: GameStats::new(),
            phase: SessionPhase::Idle,
            since_last_drop: Duration::ZERO,
            seed,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece under player control. `None` before the first
    /// spawn; after a game over this is the piece that could not spawn, kept
    /// for display.
    #[must_use]
    pub fn current_piece(&self) -> Option<Piece> {
        self.current
    }

    /// Returns the piece that will spawn after the current one locks.
    #[must_use]
    pub fn next_piece(&self) -> Piece {
        self.next
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the seed the piece sequence was built from.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Returns the time between automatic drops at the current level.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        self.stats.fall_interval()
    }

    /// Starts the game: spawns the first piece and begins fall processing.
    ///
    /// Valid only while `Idle`; otherwise a no-op. A finished game must be
    /// [`Self::reset`] before it can start again.
    pub fn start(&mut self) {
        if !self.phase.is_idle() {
            return;
        }
        self.phase = SessionPhase::Running;
        self.since_last_drop = Duration::ZERO;
        self.spawn_piece();
    }

    /// Flips between `Running` and `Paused`; a no-op in any other phase.
    ///
    /// Pausing freezes the fall accumulator, so resuming continues the
    /// partial interval instead of granting a full one.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            SessionPhase::Running => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Running,
            other => other,
        };
    }

    /// Abandons the session from any phase: empties the board, zeroes the
    /// stats, and returns to `Idle`.
    ///
    /// The generator keeps its stream, so the fresh next piece continues the
    /// seeded sequence.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.current = None;
        self.next = Piece::spawn(self.generator.pop_next());
        self.stats = GameStats::new();
        self.phase = SessionPhase::Idle;
        self.since_last_drop = Duration::ZERO;
    }

    /// Feeds elapsed host time into fall processing.
    ///
    /// While `Running`, accumulated time strictly beyond the fall interval
    /// performs one automatic drop and restarts the accumulator. Every other
    /// phase ignores the elapsed time entirely.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.phase.is_running() {
            return;
        }
        self.since_last_drop += elapsed;
        if self.since_last_drop > self.fall_interval() {
            self.since_last_drop = Duration::ZERO;
            _ = self.try_move(0, 1);
        }
    }

    /// Attempts to shift the current piece by `(dx, dy)`.
    ///
    /// A blocked downward move (`dy > 0`) locks the piece where it is,
    /// settling it into the board, clearing full rows, and spawning the next
    /// piece, and still reports [`PieceMoveError::Collision`]. A blocked
    /// sideways or upward move changes nothing.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> Result<(), PieceMoveError> {
        let piece = self.piece_in_play()?;
        let moved = piece.translated(dx, dy);
        if !self.board.collides(moved) {
            self.current = Some(moved);
            return Ok(());
        }
        if dy > 0 {
            self.lock_piece();
        }
        Err(PieceMoveError::Collision)
    }

    /// Shifts the current piece one column left.
    pub fn try_move_left(&mut self) -> Result<(), PieceMoveError> {
        self.try_move(-1, 0)
    }

    /// Shifts the current piece one column right.
    pub fn try_move_right(&mut self) -> Result<(), PieceMoveError> {
        self.try_move(1, 0)
    }

    /// Drops the current piece one row, locking it when the row below is
    /// blocked.
    pub fn try_soft_drop(&mut self) -> Result<(), PieceMoveError> {
        self.try_move(0, 1)
    }

    /// Advances the current piece to its next rotation state.
    ///
    /// A rotation that would collide is not committed. There is no offset
    /// search: the piece simply keeps its previous state.
    pub fn try_rotate(&mut self) -> Result<(), PieceMoveError> {
        let piece = self.piece_in_play()?;
        let rotated = piece.rotated();
        if self.board.collides(rotated) {
            return Err(PieceMoveError::Collision);
        }
        self.current = Some(rotated);
        Ok(())
    }

    /// Drops the current piece straight down until it locks, scoring 2
    /// points per row descended.
    pub fn hard_drop(&mut self) {
        let mut rows = 0;
        while self.try_move(0, 1).is_ok() {
            rows += 1;
        }
        self.stats.record_hard_drop(rows);
    }

    fn piece_in_play(&self) -> Result<Piece, PieceMoveError> {
        if !self.phase.is_running() {
            return Err(PieceMoveError::NoPieceInPlay);
        }
        self.current.ok_or(PieceMoveError::NoPieceInPlay)
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        self.board.fill_piece(piece);
        let cleared = self.board.clear_full_rows();
        self.stats.record_lock(cleared.len());
        self.spawn_piece();
    }

    fn spawn_piece(&mut self) {
        let spawned = mem::replace(&mut self.next, Piece::spawn(self.generator.pop_next()));
        // The blocking piece stays in place so the final frame can show it.
        self.current = Some(spawned);
        if self.board.collides(spawned) {
            self.phase = SessionPhase::GameOver;
        }
    }
}
