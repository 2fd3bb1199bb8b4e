use std::sync::Once;

use capture_core::{update, validate_input, AppState, Effect, Field, Msg, PipelineStage};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn started() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    state
}

fn fill(state: AppState, url: &str, format: &str) -> AppState {
    let (state, _) = update(
        state,
        Msg::InputChanged {
            field: Field::Url,
            value: url.to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::InputChanged {
            field: Field::Format,
            value: format.to_string(),
        },
    );
    state
}

#[test]
fn start_moves_idle_to_collecting_input() {
    init_logging();
    let mut state = started();

    assert_eq!(state.stage(), PipelineStage::CollectingInput);
    assert!(state.consume_dirty());
}

#[test]
fn input_before_start_is_ignored() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::InputChanged {
            field: Field::Url,
            value: "http://example.com".to_string(),
        },
    );

    assert_eq!(state.url_input(), "");
    assert_eq!(state.stage(), PipelineStage::Idle);
}

#[test]
fn focus_cycles_between_fields() {
    init_logging();
    let state = started();
    assert_eq!(state.focus(), Field::Url);

    let (state, _) = update(state, Msg::FocusNext);
    assert_eq!(state.focus(), Field::Format);

    let (state, _) = update(state, Msg::FocusNext);
    assert_eq!(state.focus(), Field::Url);
}

#[test]
fn valid_submit_starts_capture() {
    init_logging();
    let state = fill(started(), " http://example.com ", "TOML  ");

    let (state, effects) = update(state, Msg::Submitted);

    assert_eq!(state.stage(), PipelineStage::Capturing);
    assert_eq!(state.view().input_error, None);
    assert_eq!(
        effects,
        vec![Effect::StartCapture(
            validate_input("http://example.com", "toml").unwrap()
        )]
    );
}

#[test]
fn invalid_format_keeps_collecting_and_preserves_input() {
    init_logging();
    for format in ["yaml", "", "XML2"] {
        let state = fill(started(), "http://example.com", format);

        let (state, effects) = update(state, Msg::Submitted);
        let view = state.view();

        assert!(effects.is_empty(), "{format:?} must not start a capture");
        assert_eq!(view.stage, PipelineStage::CollectingInput);
        assert_eq!(view.url_input, "http://example.com");
        assert_eq!(view.format_input, format);
        assert!(view.input_error.is_some());
    }
}

#[test]
fn empty_url_is_reported() {
    init_logging();
    let state = fill(started(), "   ", "xml");

    let (state, effects) = update(state, Msg::Submitted);

    assert!(effects.is_empty());
    assert_eq!(
        state.view().input_error.as_deref(),
        Some("URL must not be empty")
    );
}

#[test]
fn corrected_input_clears_error_on_resubmit() {
    init_logging();
    let state = fill(started(), "http://example.com", "yaml");
    let (state, _) = update(state, Msg::Submitted);
    assert!(state.view().input_error.is_some());

    let state = fill(state, "http://example.com", "xml");
    let (state, effects) = update(state, Msg::Submitted);

    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().input_error, None);
}

#[test]
fn edits_are_ignored_while_capturing() {
    init_logging();
    let state = fill(started(), "http://example.com", "xml");
    let (state, _) = update(state, Msg::Submitted);

    let state = fill(state, "http://other.example.com", "toml");
    let (state, effects) = update(state, Msg::Submitted);

    assert_eq!(state.url_input(), "http://example.com");
    assert!(effects.is_empty());
}

#[test]
fn quit_is_available_in_every_stage() {
    init_logging();
    let (_, effects) = update(AppState::new(), Msg::QuitRequested);
    assert_eq!(effects, vec![Effect::Quit]);

    let state = fill(started(), "http://example.com", "xml");
    let (state, _) = update(state, Msg::Submitted);
    let (_, effects) = update(state, Msg::QuitRequested);
    assert_eq!(effects, vec![Effect::Quit]);
}

#[test]
fn seeded_inputs_survive_start() {
    init_logging();
    let (state, _) = update(
        AppState::with_inputs("http://example.com", "xml"),
        Msg::Started,
    );
    let (state, effects) = update(state, Msg::Submitted);

    assert_eq!(state.stage(), PipelineStage::Capturing);
    assert_eq!(effects.len(), 1);
}
