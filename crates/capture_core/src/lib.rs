//! Capture core: data model, input validation and the pure driver state machine.
mod document;
mod effect;
mod format;
mod msg;
mod state;
mod update;
mod view_model;

pub use document::{CaptureDocument, LinkRecord};
pub use effect::Effect;
pub use format::{validate_input, CaptureRequest, InputError, OutputFormat};
pub use msg::{CaptureSummary, Field, Msg};
pub use state::{AppState, PipelineStage};
pub use update::update;
pub use view_model::AppViewModel;
