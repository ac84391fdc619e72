mod command;
mod summary;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
