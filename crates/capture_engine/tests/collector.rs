use std::sync::Mutex;

use capture_core::{LinkRecord, PipelineStage};
use capture_engine::{
    capture, AnchorElement, CaptureObserver, Collector, FailureKind, FetchError, FetchSettings,
    PageVisitor,
};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct EventLog {
    events: Vec<String>,
}

impl PageVisitor for EventLog {
    fn on_request(&mut self, url: &str) {
        self.events.push(format!("request {url}"));
    }

    fn on_element(&mut self, element: &AnchorElement<'_>) {
        self.events.push(format!(
            "element {} -> {}",
            element.text(),
            element.attr("href").unwrap_or_default()
        ));
    }

    fn on_error(&mut self, error: &FetchError) {
        self.events.push(format!("error {}", error.kind));
    }
}

#[derive(Default)]
struct RecordingObserver {
    visited: Mutex<Vec<String>>,
    links: Mutex<Vec<LinkRecord>>,
    stages: Mutex<Vec<PipelineStage>>,
}

impl CaptureObserver for RecordingObserver {
    fn stage_changed(&self, stage: PipelineStage) {
        self.stages.lock().unwrap().push(stage);
    }

    fn visiting(&self, url: &str) {
        self.visited.lock().unwrap().push(url.to_string());
    }

    fn link_found(&self, link: &LinkRecord) {
        self.links.lock().unwrap().push(link.clone());
    }
}

async fn serve(html: &'static str, content_type: &'static str) -> (MockServer, String) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, content_type))
        .mount(&server)
        .await;
    let url = format!("{}/page", server.uri());
    (server, url)
}

#[tokio::test]
async fn visit_fires_request_then_elements() {
    let (_server, url) = serve(
        r#"<html><body><a href="/one">One</a><a href="https://x.test/two">Two</a></body></html>"#,
        "text/html",
    )
    .await;
    let collector = Collector::with_settings(FetchSettings::default());
    let mut log = EventLog::default();

    collector.visit(&url, &mut log).await.expect("visit ok");

    assert_eq!(
        log.events,
        vec![
            format!("request {url}"),
            "element One -> /one".to_string(),
            "element Two -> https://x.test/two".to_string(),
        ]
    );
}

#[tokio::test]
async fn visit_reports_error_once_without_elements() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let collector = Collector::with_settings(FetchSettings::default());
    let mut log = EventLog::default();

    let err = collector.visit(&server.uri(), &mut log).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(log.events.len(), 2);
    assert_eq!(log.events[1], "error http status 500");
}

#[tokio::test]
async fn invalid_url_fails_before_any_request() {
    let collector = Collector::with_settings(FetchSettings::default());
    let mut log = EventLog::default();

    let err = collector.visit("example.com/no-scheme", &mut log).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidUrl);
    assert_eq!(log.events, vec!["error invalid url".to_string()]);
}

#[tokio::test]
async fn non_html_bodies_yield_no_elements() {
    let (_server, url) = serve(r#"{"a": "<a href='/x'>x</a>"}"#, "application/json").await;
    let collector = Collector::with_settings(FetchSettings::default());
    let mut log = EventLog::default();

    collector.visit(&url, &mut log).await.expect("visit ok");

    assert_eq!(log.events, vec![format!("request {url}")]);
}

#[tokio::test]
async fn capture_keeps_discovery_order_and_duplicates() {
    let (_server, url) = serve(
        r#"<ul>
            <li><a href="/b">Beta</a></li>
            <li><a href="/a">Alpha</a></li>
            <li><a href="/b">Beta</a></li>
            <li><a>no href is skipped</a></li>
            <li><a href="">  </a></li>
        </ul>"#,
        "text/html; charset=utf-8",
    )
    .await;
    let collector = Collector::with_settings(FetchSettings::default());
    let observer = RecordingObserver::default();
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();

    let document = capture(&collector, &url, at, &observer).await.expect("capture ok");

    let expected = vec![
        LinkRecord::new("Beta", "/b"),
        LinkRecord::new("Alpha", "/a"),
        LinkRecord::new("Beta", "/b"),
        LinkRecord::new("", ""),
    ];
    assert_eq!(document.source_url(), url);
    assert_eq!(document.captured_at(), at);
    assert_eq!(document.links(), expected.as_slice());
    assert_eq!(*observer.links.lock().unwrap(), expected);
    assert_eq!(*observer.visited.lock().unwrap(), vec![url.clone()]);
}

#[tokio::test]
async fn capture_of_page_without_anchors_is_empty() {
    let (_server, url) = serve("<html><body><p>nothing here</p></body></html>", "text/html").await;
    let collector = Collector::with_settings(FetchSettings::default());

    let document = capture(&collector, &url, Utc::now(), &RecordingObserver::default())
        .await
        .expect("capture ok");

    assert!(document.is_empty());
}

#[tokio::test]
async fn capture_decodes_legacy_charsets() {
    let server = MockServer::start().await;
    let body: Vec<u8> = b"<a href=\"/caf\xe9\">Caf\xe9</a>".to_vec();
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=iso-8859-1"),
        )
        .mount(&server)
        .await;
    let collector = Collector::with_settings(FetchSettings::default());

    let document = capture(&collector, &server.uri(), Utc::now(), &RecordingObserver::default())
        .await
        .expect("capture ok");

    assert_eq!(document.links(), &[LinkRecord::new("Café", "/café")]);
}
