use std::path::PathBuf;
use std::sync::{Arc, Once};

use capture_core::{
    update, AppState, CaptureDocument, CaptureSummary, LinkRecord, Msg, OutputFormat,
    PipelineStage,
};
use chrono::{TimeZone, Utc};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn capturing() -> AppState {
    let (state, _) = update(
        AppState::with_inputs("http://example.com", "xml"),
        Msg::Started,
    );
    let (state, _) = update(state, Msg::Submitted);
    assert_eq!(state.stage(), PipelineStage::Capturing);
    state
}

fn summary() -> CaptureSummary {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let mut document = CaptureDocument::new("http://example.com", at);
    document.push(LinkRecord::new("About", "/about"));
    CaptureSummary {
        document: Arc::new(document),
        format: OutputFormat::Xml,
        path: PathBuf::from("scrape_result.xml"),
    }
}

#[test]
fn visiting_is_shown_while_capturing() {
    init_logging();
    let (state, _) = update(capturing(), Msg::Visiting("http://example.com".into()));

    assert_eq!(
        state.view().visiting.as_deref(),
        Some("http://example.com")
    );
    assert_eq!(state.view().summary, None);
}

#[test]
fn success_walks_through_writing_to_done() {
    init_logging();
    let (state, _) = update(capturing(), Msg::StageChanged(PipelineStage::Writing));
    assert_eq!(state.stage(), PipelineStage::Writing);

    let (state, effects) = update(state, Msg::CaptureFinished(Ok(summary())));

    assert!(effects.is_empty());
    assert_eq!(state.stage(), PipelineStage::Done);
    let view = state.view();
    let done = view.summary.expect("summary present");
    assert_eq!(done.document.len(), 1);
    assert_eq!(done.path, PathBuf::from("scrape_result.xml"));
}

#[test]
fn success_without_writing_notice_still_completes() {
    init_logging();
    let (state, _) = update(capturing(), Msg::CaptureFinished(Ok(summary())));

    assert_eq!(state.stage(), PipelineStage::Done);
}

#[test]
fn fetch_failure_is_terminal_and_keeps_message() {
    init_logging();
    let (state, _) = update(
        capturing(),
        Msg::CaptureFinished(Err("network error: dns failure".into())),
    );

    assert_eq!(state.stage(), PipelineStage::Failed);
    assert_eq!(
        state.view().failure.as_deref(),
        Some("network error: dns failure")
    );

    let (state, effects) = update(state, Msg::Submitted);
    assert_eq!(state.stage(), PipelineStage::Failed);
    assert!(effects.is_empty());
}

#[test]
fn illegal_stage_changes_are_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::StageChanged(PipelineStage::Writing));
    assert_eq!(state.stage(), PipelineStage::Idle);

    let (state, _) = update(capturing(), Msg::StageChanged(PipelineStage::Done));
    assert_eq!(state.stage(), PipelineStage::Capturing);
}

#[test]
fn late_messages_after_done_are_ignored() {
    init_logging();
    let (state, _) = update(capturing(), Msg::CaptureFinished(Ok(summary())));
    let (state, _) = update(state, Msg::CaptureFinished(Err("late".into())));

    assert_eq!(state.stage(), PipelineStage::Done);
    assert_eq!(state.view().failure, None);
}

#[test]
fn terminal_stages_do_not_advance() {
    assert!(PipelineStage::Done.is_terminal());
    assert!(PipelineStage::Failed.is_terminal());
    for next in [
        PipelineStage::Idle,
        PipelineStage::CollectingInput,
        PipelineStage::Capturing,
        PipelineStage::Writing,
    ] {
        assert!(!PipelineStage::Done.can_advance_to(next));
        assert!(!PipelineStage::Failed.can_advance_to(next));
    }
}

#[test]
fn terminal_stage_notice_waits_for_result() {
    init_logging();
    let (state, _) = update(capturing(), Msg::StageChanged(PipelineStage::Writing));
    let (state, _) = update(state, Msg::StageChanged(PipelineStage::Done));
    assert_eq!(state.stage(), PipelineStage::Writing);

    let (state, _) = update(state, Msg::CaptureFinished(Ok(summary())));
    assert_eq!(state.stage(), PipelineStage::Done);
    assert!(state.view().summary.is_some());
}
