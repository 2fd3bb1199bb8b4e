use anyhow::Context;
use capture_core::{CaptureSummary, Effect, Msg};
use capture_engine::{EngineConfig, EngineEvent, EngineHandle};
use engine_logging::{engine_info, engine_trace, engine_warn};

/// Executes effects from `update` and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(config).context("starting capture engine")?;
        Ok(Self { engine })
    }

    /// Runs effects; returns `true` when the UI should quit.
    pub fn run(&self, effects: Vec<Effect>) -> bool {
        let mut quit = false;
        for effect in effects {
            match effect {
                Effect::StartCapture(request) => {
                    engine_info!(
                        "StartCapture url={} format={}",
                        request.url(),
                        request.format()
                    );
                    self.engine.submit(request);
                }
                Effect::Quit => quit = true,
            }
        }
        quit
    }

    /// Drains pending engine events without blocking.
    pub fn pump(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = map_event(event) {
                inbox.push(msg);
            }
        }
        inbox
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::StageChanged(stage) => Some(Msg::StageChanged(stage)),
        EngineEvent::Visiting(url) => Some(Msg::Visiting(url)),
        // The form shows stages only while the worker owns the document.
        EngineEvent::LinkFound(link) => {
            engine_trace!("Link found: {:?} -> {}", link.text, link.href);
            None
        }
        EngineEvent::Finished(Ok(report)) => Some(Msg::CaptureFinished(Ok(CaptureSummary {
            document: report.document,
            format: report.format,
            path: report.path,
        }))),
        EngineEvent::Finished(Err(err)) => {
            engine_warn!("Capture failed: {}", err);
            Some(Msg::CaptureFinished(Err(err.to_string())))
        }
    }
}
