use capture_core::{CaptureDocument, LinkRecord, PipelineStage};
use chrono::{DateTime, Utc};
use engine_logging::{engine_debug, engine_warn};

use crate::collector::{AnchorElement, Collector, PageVisitor};
use crate::FetchError;

/// Progress notifications for one capture run. All methods default to no-ops.
pub trait CaptureObserver: Send + Sync {
    fn stage_changed(&self, _stage: PipelineStage) {}
    fn visiting(&self, _url: &str) {}
    fn link_found(&self, _link: &LinkRecord) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl CaptureObserver for NullObserver {}

struct DocumentBuilder<'a> {
    document: CaptureDocument,
    observer: &'a dyn CaptureObserver,
}

impl PageVisitor for DocumentBuilder<'_> {
    fn on_request(&mut self, url: &str) {
        self.observer.visiting(url);
    }

    fn on_element(&mut self, element: &AnchorElement<'_>) {
        let link = LinkRecord::new(element.text(), element.attr("href").unwrap_or_default());
        engine_debug!("Link found: {:?} -> {}", link.text, link.href);
        self.observer.link_found(&link);
        self.document.push(link);
    }

    fn on_error(&mut self, error: &FetchError) {
        engine_warn!(
            "Error while scraping {}: {}",
            self.document.source_url(),
            error
        );
    }
}

/// Runs one fetch of `url` and collects every anchor into a new document.
///
/// The document is stamped with `captured_at` before the request is sent. On
/// failure the partially filled document is dropped.
pub async fn capture(
    collector: &Collector,
    url: &str,
    captured_at: DateTime<Utc>,
    observer: &dyn CaptureObserver,
) -> Result<CaptureDocument, FetchError> {
    let mut builder = DocumentBuilder {
        document: CaptureDocument::new(url, captured_at),
        observer,
    };
    collector.visit(url, &mut builder).await?;
    Ok(builder.document)
}
