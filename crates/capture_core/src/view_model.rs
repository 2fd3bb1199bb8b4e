use crate::{CaptureSummary, Field, PipelineStage};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub stage: PipelineStage,
    pub url_input: String,
    pub format_input: String,
    pub focus: Field,
    pub input_error: Option<String>,
    pub visiting: Option<String>,
    /// Only populated once the run is `Done`; the worker owns the document until then.
    pub summary: Option<CaptureSummary>,
    pub failure: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Url => &self.url_input,
            Field::Format => &self.format_input,
        }
    }

    /// Whether the form accepts edits.
    pub fn is_editable(&self) -> bool {
        self.stage == PipelineStage::CollectingInput
    }
}
