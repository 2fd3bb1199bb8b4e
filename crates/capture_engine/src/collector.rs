use std::sync::{Arc, LazyLock};

use engine_logging::{engine_debug, engine_info};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::decode::{decode_html, essence};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{FailureKind, FetchError};

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Callbacks fired while a [`Collector`] processes one page.
pub trait PageVisitor {
    /// The request for `url` is about to be sent.
    fn on_request(&mut self, _url: &str) {}

    /// An `<a href>` element was found, in document order.
    fn on_element(&mut self, element: &AnchorElement<'_>);

    /// The visit failed. Fired once, right before `visit` returns the same error.
    fn on_error(&mut self, _error: &FetchError) {}
}

/// Read-only view of a matched anchor element.
pub struct AnchorElement<'a> {
    element: ElementRef<'a>,
}

impl AnchorElement<'_> {
    /// Descendant text with whitespace runs collapsed and the ends trimmed.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for word in self.element.text().flat_map(str::split_whitespace) {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
        out
    }

    /// Raw attribute value, untouched.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }
}

/// Single-page fetch engine: one request, then one pass over the anchors.
pub struct Collector {
    fetcher: Arc<dyn Fetcher>,
}

impl Collector {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    pub fn with_settings(settings: FetchSettings) -> Self {
        Self::new(Arc::new(ReqwestFetcher::new(settings)))
    }

    /// Fetches `url` and reports every anchor to `visitor`.
    ///
    /// Returns once the page is fully processed or the fetch failed. Bodies that
    /// are not HTML succeed without element callbacks.
    pub async fn visit(
        &self,
        url: &str,
        visitor: &mut (dyn PageVisitor + Send),
    ) -> Result<(), FetchError> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(err) => {
                let error = FetchError::new(FailureKind::InvalidUrl, err.to_string());
                visitor.on_error(&error);
                return Err(error);
            }
        };

        visitor.on_request(parsed.as_str());
        let output = match self.fetcher.fetch(parsed.as_str()).await {
            Ok(output) => output,
            Err(error) => {
                visitor.on_error(&error);
                return Err(error);
            }
        };

        let content_type = output.metadata.content_type.as_deref();
        if !is_html(content_type) {
            engine_info!(
                "Skipping element scan for {} (content type {:?})",
                output.metadata.final_url,
                content_type
            );
            return Ok(());
        }

        let decoded = decode_html(&output.bytes, content_type);
        engine_debug!(
            "Decoded {} bytes as {}",
            output.metadata.byte_len,
            decoded.encoding_label
        );
        dispatch_anchors(&decoded.html, visitor);
        Ok(())
    }
}

fn dispatch_anchors(html: &str, visitor: &mut (dyn PageVisitor + Send)) {
    let document = Html::parse_document(html);
    for element in document.select(&ANCHOR_SELECTOR) {
        visitor.on_element(&AnchorElement { element });
    }
}

fn is_html(content_type: Option<&str>) -> bool {
    match content_type {
        Some(ct) => HTML_CONTENT_TYPES.contains(&essence(ct).as_str()),
        None => true,
    }
}
