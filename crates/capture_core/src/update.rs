use crate::{validate_input, AppState, Effect, Msg, PipelineStage};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            state.advance(PipelineStage::CollectingInput);
            Vec::new()
        }
        Msg::InputChanged { field, value } => {
            if state.stage() == PipelineStage::CollectingInput {
                state.set_input(field, value);
            }
            Vec::new()
        }
        Msg::FocusNext => {
            if state.stage() == PipelineStage::CollectingInput {
                state.focus_next();
            }
            Vec::new()
        }
        Msg::Submitted => {
            if state.stage() != PipelineStage::CollectingInput {
                return (state, Vec::new());
            }
            match validate_input(state.url_input(), state.format_input()) {
                Ok(request) => {
                    state.set_input_error(None);
                    state.advance(PipelineStage::Capturing);
                    vec![Effect::StartCapture(request)]
                }
                // Entered text is kept so the operator can fix it in place.
                Err(err) => {
                    state.set_input_error(Some(err.to_string()));
                    Vec::new()
                }
            }
        }
        Msg::StageChanged(stage) => {
            // Terminal stages only come with the result so the summary is never lost.
            if !stage.is_terminal() {
                state.advance(stage);
            }
            Vec::new()
        }
        Msg::Visiting(url) => {
            if state.stage() == PipelineStage::Capturing {
                state.set_visiting(url);
            }
            Vec::new()
        }
        Msg::CaptureFinished(result) => {
            match result {
                Ok(summary) => {
                    if state.stage() == PipelineStage::Capturing {
                        state.advance(PipelineStage::Writing);
                    }
                    if state.advance(PipelineStage::Done) {
                        state.set_summary(summary);
                    }
                }
                Err(message) => {
                    if state.advance(PipelineStage::Failed) {
                        state.set_failure(message);
                    }
                }
            }
            Vec::new()
        }
        Msg::QuitRequested => vec![Effect::Quit],
    };

    (state, effects)
}
