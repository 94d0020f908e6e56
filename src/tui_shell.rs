use anyhow::Result;

mod app;
mod input;
mod modal;

use app::App;

pub fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}
