use clap::Parser;

mod cli;
mod logging;
mod ui;

fn main() -> anyhow::Result<()> {
    let app = cli::App::parse();
    logging::init(&app.logging());
    cli::run(app)
}
