use std::fmt;

use blockfall_engine::GameSession;
use serde::Serialize;

/// Final state of a session, printed when the program exits.
///
/// Carries the seed so a run can be reproduced with `--seed`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    score: usize,
    level: usize,
    lines: usize,
    pieces: usize,
    seed: String,
}

impl SessionSummary {
    pub fn from_session(session: &GameSession) -> Self {
        let stats = session.stats();
        Self {
            score: stats.score(),
            level: stats.level(),
            lines: stats.cleared_lines(),
            pieces: stats.locked_pieces(),
            seed: session.seed().to_string(),
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "final score {} at level {}", self.score, self.level)?;
        writeln!(f, "cleared lines: {}", self.lines)?;
        writeln!(f, "locked pieces: {}", self.pieces)?;
        write!(f, "seed: {}", self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_session() -> GameSession {
        GameSession::with_seed("00000000000000000000000000000000".parse().unwrap())
    }

    #[test]
    fn test_summary_of_a_fresh_session() {
        let summary = SessionSummary::from_session(&fixed_session());
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["score"], 0);
        assert_eq!(value["level"], 1);
        assert_eq!(value["lines"], 0);
        assert_eq!(value["pieces"], 0);
        assert_eq!(value["seed"], "00000000000000000000000000000000");
    }

    #[test]
    fn test_summary_reflects_play() {
        let mut session = fixed_session();
        session.start();
        session.hard_drop();

        let summary = SessionSummary::from_session(&session);
        let value = serde_json::to_value(&summary).unwrap();

        // A single piece can not complete a row, so only drop points count.
        assert_eq!(value["pieces"], 1);
        assert_eq!(value["lines"], 0);
        assert!(value["score"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_display_lists_every_field() {
        let text = SessionSummary::from_session(&fixed_session()).to_string();

        assert!(text.contains("final score 0"));
        assert!(text.contains("cleared lines: 0"));
        assert!(text.contains("locked pieces: 0"));
        assert!(text.contains("seed: 00000000000000000000000000000000"));
    }
}
