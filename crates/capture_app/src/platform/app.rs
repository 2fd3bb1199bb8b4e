//! Terminal form front-end.
//!
//! A single-threaded loop polls the keyboard, drains engine messages and
//! redraws when the state changed. The capture itself runs on the engine's
//! worker thread; results arrive only as messages.

use std::time::Duration;

use anyhow::Context;
use capture_core::{update, AppState, Msg};
use capture_engine::EngineConfig;
use engine_logging::engine_info;
use ratatui::crossterm::event::{self, Event};
use ratatui::DefaultTerminal;

use super::effects::EffectRunner;
use super::ui;
use crate::args::Args;

const TICK: Duration = Duration::from_millis(75);

pub fn run_app(args: &Args, engine_config: EngineConfig) -> anyhow::Result<()> {
    let runner = EffectRunner::new(engine_config)?;
    let state = AppState::with_inputs(
        args.url.clone().unwrap_or_default(),
        args.format.clone().unwrap_or_default(),
    );

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, state, &runner);
    ratatui::restore();

    let state = result?;
    let view = state.view();
    if let Some(summary) = view.summary {
        println!("Results saved to {}", summary.path.display());
    } else if let Some(failure) = view.failure {
        eprintln!("Capture failed: {failure}");
    }
    Ok(())
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    state: AppState,
    runner: &EffectRunner,
) -> anyhow::Result<AppState> {
    let (mut state, mut quit) = dispatch(state, Msg::Started, runner);
    let mut redraw = true;

    while !quit {
        if state.consume_dirty() || redraw {
            let view = state.view();
            terminal
                .draw(|frame| ui::render::render(frame, &view))
                .context("drawing terminal form")?;
            redraw = false;
        }

        let mut inbox = Vec::new();
        if event::poll(TICK).context("polling terminal events")? {
            match event::read().context("reading terminal event")? {
                Event::Key(key) => {
                    if let Some(msg) = ui::keys::map_key(key, &state.view()) {
                        inbox.push(msg);
                    }
                }
                Event::Resize(_, _) => redraw = true,
                _ => {}
            }
        }
        inbox.extend(runner.pump());

        for msg in inbox {
            let (next, wants_quit) = dispatch(state, msg, runner);
            state = next;
            if wants_quit {
                quit = true;
                break;
            }
        }
    }

    engine_info!("Leaving terminal form at stage {}", state.stage());
    Ok(state)
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> (AppState, bool) {
    let (state, effects) = update(state, msg);
    let quit = runner.run(effects);
    (state, quit)
}
