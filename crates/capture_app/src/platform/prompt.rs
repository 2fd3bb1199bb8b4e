//! Line-oriented front-end: two prompts, one run, exit.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use capture_core::{validate_input, CaptureRequest, LinkRecord};
use capture_engine::{CaptureObserver, EngineConfig, Pipeline};

use crate::args::Args;

const URL_PROMPT: &str = "Enter the URL to scrape: ";
const FORMAT_PROMPT: &str = "Choose output format (xml/toml): ";

pub(crate) fn run(args: &Args, engine_config: EngineConfig) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let request = collect_request(
        &mut stdin.lock(),
        &mut stdout,
        args.url.as_deref(),
        args.format.as_deref(),
    )?;

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let pipeline = Pipeline::new(engine_config);
    let report = runtime.block_on(pipeline.run(&request, &ConsoleObserver))?;

    println!("Results saved to {}", report.path.display());
    Ok(())
}

/// Reads whichever inputs were not given on the command line and validates both.
fn collect_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    url: Option<&str>,
    format: Option<&str>,
) -> anyhow::Result<CaptureRequest> {
    let url = match url {
        Some(url) => url.to_string(),
        None => ask(input, output, URL_PROMPT)?,
    };
    let format = match format {
        Some(format) => format.to_string(),
        None => ask(input, output, FORMAT_PROMPT)?,
    };
    Ok(validate_input(&url, &format)?)
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> anyhow::Result<String> {
    output.write_all(prompt.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading input")?;
    if read == 0 {
        bail!("input closed before an answer was given");
    }
    Ok(line)
}

/// Prints progress the way an operator watching the terminal expects it.
struct ConsoleObserver;

impl CaptureObserver for ConsoleObserver {
    fn visiting(&self, url: &str) {
        println!("Visiting {url}");
    }

    fn link_found(&self, link: &LinkRecord) {
        println!("Link found: {:?} -> {}", link.text, link.href);
    }
}
