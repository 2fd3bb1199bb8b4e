//! Front-ends and process wiring for the `capture` binary.
mod app;
mod config;
mod effects;
mod logging;
mod prompt;
mod ui;

use anyhow::Context;

use crate::args::Args;

pub fn run(args: Args) -> anyhow::Result<()> {
    let destination = if args.tui {
        logging::LogDestination::File
    } else {
        logging::LogDestination::Terminal
    };
    logging::initialize(destination, args.verbose);

    let app_config = config::load(args.config.as_deref());
    let output_dir = std::env::current_dir().context("resolving working directory")?;
    let engine_config = app_config.engine_config(output_dir, args.output.clone());

    if args.tui {
        app::run_app(&args, engine_config)
    } else {
        prompt::run(&args, engine_config)
    }
}
