//! Platform logging initialization for the capture binary.
//!
//! The terminal form owns the screen, so it logs to `./capture.log` instead.

use std::path::Path;

use log::LevelFilter;

const LOG_FILE: &str = "./capture.log";

/// Destination for log output.
pub enum LogDestination {
    /// Write to ./capture.log in current directory.
    File,
    /// Write to terminal.
    Terminal,
}

pub fn initialize(destination: LogDestination, verbose: bool) {
    let level = match (&destination, verbose) {
        (_, true) => LevelFilter::Debug,
        (LogDestination::File, false) => LevelFilter::Info,
        // Prompt output already narrates progress; keep the terminal for problems.
        (LogDestination::Terminal, false) => LevelFilter::Warn,
    };

    let target = match destination {
        LogDestination::File => engine_logging::LogDestination::File(Path::new(LOG_FILE)),
        LogDestination::Terminal => engine_logging::LogDestination::Terminal,
    };
    engine_logging::initialize(target, level);
}
