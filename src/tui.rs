use anyhow::Result;

use crate::config::PortalConfig;

#[derive(Clone, Debug)]
pub struct TuiRunOptions {
    pub config: PortalConfig,
}

pub fn run(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run(opts)
}
