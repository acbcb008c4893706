mod app;
mod changes;
mod subscriptions;

pub use app::{App, Commands};

use anyhow::Context;
use graphline_core::GraphConfig;

pub fn run(app: App) -> anyhow::Result<()> {
    let config = GraphConfig::load(app.config.as_deref()).context("failed to load configuration")?;

    match app.cmd {
        Commands::Subscriptions(cmd) => subscriptions::run(cmd, &config),
        Commands::Changes(arg) => changes::run(arg, &config),
    }
}
