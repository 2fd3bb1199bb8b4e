use std::path::PathBuf;
use std::sync::Arc;

use crate::{CaptureDocument, OutputFormat, PipelineStage};

/// Input field of the capture form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Url,
    Format,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Url => Field::Format,
            Field::Format => Field::Url,
        }
    }
}

/// Outcome of a successful run, handed from the worker to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSummary {
    pub document: Arc<CaptureDocument>,
    pub format: OutputFormat,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The UI finished setting up and is ready for input.
    Started,
    /// User edited one of the form fields.
    InputChanged { field: Field, value: String },
    /// User moved focus to the other field.
    FocusNext,
    /// User submitted the form.
    Submitted,
    /// Engine moved the pipeline to a new stage.
    StageChanged(PipelineStage),
    /// Engine is about to request the page.
    Visiting(String),
    /// Engine finished the run.
    CaptureFinished(Result<CaptureSummary, String>),
    /// User asked to leave (Ctrl+C / Esc).
    QuitRequested,
}
