use std::io;
use std::sync::mpsc;
use std::thread;

use capture_core::{CaptureRequest, LinkRecord, PipelineStage};

use crate::extract::CaptureObserver;
use crate::pipeline::{EngineConfig, Pipeline};
use crate::EngineEvent;

enum EngineCommand {
    Capture(CaptureRequest),
}

/// Runs captures on a dedicated worker thread and publishes [`EngineEvent`]s.
///
/// The worker owns each document until the run ends; the only way data reaches
/// the caller is the event channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let pipeline = Pipeline::new(config);

        thread::Builder::new()
            .name("capture-engine".into())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Capture(request) => {
                            let observer = ChannelObserver {
                                tx: event_tx.clone(),
                            };
                            let result = runtime.block_on(pipeline.run(&request, &observer));
                            let _ = event_tx.send(EngineEvent::Finished(result));
                        }
                    }
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, request: CaptureRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Capture(request));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

struct ChannelObserver {
    tx: mpsc::Sender<EngineEvent>,
}

impl CaptureObserver for ChannelObserver {
    fn stage_changed(&self, stage: PipelineStage) {
        let _ = self.tx.send(EngineEvent::StageChanged(stage));
    }

    fn visiting(&self, url: &str) {
        let _ = self.tx.send(EngineEvent::Visiting(url.to_string()));
    }

    fn link_found(&self, link: &LinkRecord) {
        let _ = self.tx.send(EngineEvent::LinkFound(link.clone()));
    }
}
