use std::time::Duration;

/// Score values for line clears.
///
/// Index corresponds to the number of lines cleared by one lock:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// The base value is multiplied by the level in effect when the clear
/// happens.
const LINE_SCORES: [usize; 5] = [0, 40, 100, 300, 1200];

/// Points per row descended during a hard drop.
const HARD_DROP_ROW_SCORE: usize = 2;

const BASE_FALL_MILLIS: u64 = 1000;
const FALL_STEP_MILLIS: u64 = 100;
const MIN_FALL_MILLIS: u64 = 100;

/// Time between automatic drops at the given level.
///
/// Starts at one second on level 1 and shortens by 100 ms per level, floored
/// at 100 ms from level 10 onward.
#[must_use]
pub fn fall_interval(level: usize) -> Duration {
    let shortened = level.saturating_sub(1) as u64 * FALL_STEP_MILLIS;
    Duration::from_millis(BASE_FALL_MILLIS.saturating_sub(shortened).max(MIN_FALL_MILLIS))
}

/// Session statistics: score, cleared lines, the level derived from them,
/// and a per-lock line-clear histogram.
///
/// # Scoring
///
/// Each lock scores `LINE_SCORES[n] × level`, where `level` is the level in
/// effect before the new lines advance it. Hard drops add 2 points per row
/// descended. There are no combo, back-to-back, or spin bonuses.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_lock(4);
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.cleared_lines(), 4);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.line_clear_counter()[4], 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameStats {
    score: usize,
    locked_pieces: usize,
    cleared_lines: usize,
    line_clear_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            locked_pieces: 0,
            cleared_lines: 0,
            line_clear_counter: [0; 5],
        }
    }

    /// Returns the current score.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level: 1, plus one per 10 cleared lines.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.cleared_lines / 10 + 1
    }

    /// Returns the fall interval the current level dictates.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        fall_interval(self.level())
    }

    /// Returns the total number of pieces locked into the board.
    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    /// Returns the total number of cleared lines.
    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Returns a histogram of line clears by count.
    ///
    /// Array indices:
    /// - `[0]`: locks that cleared nothing
    /// - `[1]`: singles
    /// - `[2]`: doubles
    /// - `[3]`: triples
    /// - `[4]`: quads
    #[must_use]
    pub const fn line_clear_counter(&self) -> &[usize; 5] {
        &self.line_clear_counter
    }

    /// Records one locked piece and the lines it cleared (0-4).
    ///
    /// The score delta is computed from the level in effect before the new
    /// lines are counted, matching the classic scoring order.
    pub const fn record_lock(&mut self, cleared_lines: usize) {
        self.locked_pieces += 1;
        self.score += LINE_SCORES[cleared_lines] * self.level();
        self.cleared_lines += cleared_lines;
        if cleared_lines < self.line_clear_counter.len() {
            self.line_clear_counter[cleared_lines] += 1;
        }
    }

    /// Adds the hard-drop movement bonus for `rows` descended.
    pub const fn record_hard_drop(&mut self, rows: usize) {
        self.score += HARD_DROP_ROW_SCORE * rows;
    }
}
