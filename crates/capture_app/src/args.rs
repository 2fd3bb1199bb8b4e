use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "capture")]
#[command(about = "Capture the links of one web page into an XML or TOML file")]
#[command(version)]
pub struct Args {
    /// Page to capture; prompted for when omitted
    #[arg(short, long)]
    pub url: Option<String>,

    /// Output format, `xml` or `toml`; prompted for when omitted
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write here instead of ./scrape_result.<format>
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use the interactive terminal form instead of line prompts
    #[arg(long)]
    pub tui: bool,

    /// RON configuration file (defaults to ./capture.ron when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}
