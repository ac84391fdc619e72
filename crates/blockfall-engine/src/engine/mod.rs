//! Session orchestration: the state machine, piece generation, and scoring.
//!
//! - [`GameSession`] - One game from idle to game over
//! - [`GameStats`] - Score, cleared lines, level, and line-clear counts
//! - [`PieceGenerator`] - Seeded uniform piece draws
//! - [`PieceSeed`] - Seed for deterministic piece sequences
//!
//! # Game Flow
//!
//! 1. Build a [`GameSession`] (with a [`PieceSeed`] for a replayable run)
//! 2. `start` spawns the first piece and begins fall processing
//! 3. Input maps onto `try_move_*`, `try_rotate`, and `hard_drop`
//! 4. The host clock feeds elapsed time into `tick`; each time the
//!    accumulated time passes the level's fall interval the piece drops one
//!    row
//! 5. A blocked downward move locks the piece, clears full rows, updates
//!    score and level, and spawns the next piece
//! 6. A spawn that immediately collides ends the session; `reset` returns
//!    it to idle
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::GameSession;
//!
//! let mut session = GameSession::new();
//! session.start();
//!
//! let _ = session.try_move_left();
//! let _ = session.try_rotate();
//! session.tick(Duration::from_millis(1100));
//!
//! assert!(session.phase().is_running());
//! ```

pub use self::{game_session::*, game_stats::*, piece_generator::*};

mod game_session;
mod game_stats;
mod piece_generator;
