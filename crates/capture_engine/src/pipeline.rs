use std::path::PathBuf;
use std::sync::Arc;

use capture_core::{CaptureDocument, CaptureRequest, OutputFormat, PipelineStage};
use chrono::{DateTime, Utc};
use engine_logging::{engine_error, engine_info};
use thiserror::Error;

use crate::codec::{encode, CodecError};
use crate::collector::Collector;
use crate::extract::{capture, CaptureObserver};
use crate::fetch::{FetchSettings, Fetcher};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::FetchError;

/// Source of the capture timestamp.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    /// Directory for `scrape_result.<ext>` when no explicit path is given.
    pub output_dir: PathBuf,
    /// Explicit destination; replaces the default file name entirely.
    pub output_path: Option<PathBuf>,
    pub clock: Clock,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            fetch: FetchSettings::default(),
            output_dir,
            output_path: None,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn destination(&self, format: OutputFormat) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => self.output_dir.join(format.default_filename()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureReport {
    pub document: Arc<CaptureDocument>,
    pub format: OutputFormat,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("encoding failed: {0}")]
    Encode(#[from] CodecError),
    #[error("writing output failed: {0}")]
    Write(#[from] PersistError),
}

/// Drives one run: capture, encode, write.
pub struct Pipeline {
    collector: Collector,
    writer: AtomicFileWriter,
    config: EngineConfig,
}

impl Pipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            collector: Collector::with_settings(config.fetch.clone()),
            writer: AtomicFileWriter::new(),
            config,
        }
    }

    pub fn with_fetcher(config: EngineConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            collector: Collector::new(fetcher),
            writer: AtomicFileWriter::new(),
            config,
        }
    }

    /// Runs the request to completion. Nothing is written unless the fetch succeeds.
    pub async fn run(
        &self,
        request: &CaptureRequest,
        observer: &dyn CaptureObserver,
    ) -> Result<CaptureReport, PipelineError> {
        let result = self.run_stages(request, observer).await;
        match &result {
            Ok(report) => {
                engine_info!(
                    "Captured {} links from {} into {:?}",
                    report.document.len(),
                    request.url(),
                    report.path
                );
                observer.stage_changed(PipelineStage::Done);
            }
            Err(err) => {
                engine_error!("Capture of {} failed: {}", request.url(), err);
                observer.stage_changed(PipelineStage::Failed);
            }
        }
        result
    }

    async fn run_stages(
        &self,
        request: &CaptureRequest,
        observer: &dyn CaptureObserver,
    ) -> Result<CaptureReport, PipelineError> {
        observer.stage_changed(PipelineStage::Capturing);
        let captured_at = (self.config.clock)();
        let document = capture(&self.collector, request.url(), captured_at, observer).await?;
        let document = Arc::new(document);

        observer.stage_changed(PipelineStage::Writing);
        let format = request.format();
        let bytes = encode(&document, format)?;
        let path = self
            .writer
            .write(&self.config.destination(format), &bytes)?;

        Ok(CaptureReport {
            document,
            format,
            path,
        })
    }
}
