use blockfall_engine::{GameSession, PieceSeed};

use crate::{command::play::app::PlayApp, summary::SessionSummary, tui::Tui};

mod app;
mod screen;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (32 hex characters); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Print the end-of-session summary as JSON
    #[clap(long)]
    json_summary: bool,
    /// Engine updates per second
    #[clap(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    tick_rate: u64,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let session = match arg.seed {
        Some(seed) => GameSession::with_seed(seed),
        None => GameSession::new(),
    };

    let mut app = PlayApp::new(session, arg.tick_rate);
    Tui::new().run(&mut app)?;

    let summary = SessionSummary::from_session(app.session());
    if arg.json_summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }

    Ok(())
}
