use std::fmt;

use crate::view_model::AppViewModel;
use crate::{CaptureSummary, Field};

/// Stages of one capture run.
///
/// `Done` and `Failed` are terminal: a process performs at most one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineStage {
    #[default]
    Idle,
    CollectingInput,
    Capturing,
    Writing,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_advance_to(self, next: PipelineStage) -> bool {
        use PipelineStage::*;
        matches!(
            (self, next),
            (Idle, CollectingInput)
                | (CollectingInput, Capturing)
                | (Capturing, Writing)
                | (Capturing, Failed)
                | (Writing, Done)
                | (Writing, Failed)
        )
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStage::Idle => "Idle",
            PipelineStage::CollectingInput => "Collecting input",
            PipelineStage::Capturing => "Capturing",
            PipelineStage::Writing => "Writing",
            PipelineStage::Done => "Done",
            PipelineStage::Failed => "Failed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    stage: PipelineStage,
    url_input: String,
    format_input: String,
    focus: Field,
    input_error: Option<String>,
    visiting: Option<String>,
    summary: Option<CaptureSummary>,
    failure: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the form, e.g. from command line arguments.
    pub fn with_inputs(url: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            url_input: url.into(),
            format_input: format.into(),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            stage: self.stage,
            url_input: self.url_input.clone(),
            format_input: self.format_input.clone(),
            focus: self.focus,
            input_error: self.input_error.clone(),
            visiting: self.visiting.clone(),
            summary: self.summary.clone(),
            failure: self.failure.clone(),
            dirty: self.dirty,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn format_input(&self) -> &str {
        &self.format_input
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Moves to `next` if the transition is legal. Returns whether it moved.
    pub(crate) fn advance(&mut self, next: PipelineStage) -> bool {
        if !self.stage.can_advance_to(next) {
            return false;
        }
        self.stage = next;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_input(&mut self, field: Field, value: String) {
        match field {
            Field::Url => self.url_input = value,
            Field::Format => self.format_input = value,
        }
        self.mark_dirty();
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.mark_dirty();
    }

    pub(crate) fn set_input_error(&mut self, message: Option<String>) {
        self.input_error = message;
        self.mark_dirty();
    }

    pub(crate) fn set_visiting(&mut self, url: String) {
        self.visiting = Some(url);
        self.mark_dirty();
    }

    pub(crate) fn set_summary(&mut self, summary: CaptureSummary) {
        self.summary = Some(summary);
        self.mark_dirty();
    }

    pub(crate) fn set_failure(&mut self, message: String) {
        self.failure = Some(message);
        self.mark_dirty();
    }
}
