//! Capture engine: page fetching, link extraction, encoding and the run pipeline.
mod codec;
mod collector;
mod decode;
mod engine;
mod extract;
mod fetch;
mod persist;
mod pipeline;
mod types;

pub use codec::{decode, encode, CodecError};
pub use collector::{AnchorElement, Collector, PageVisitor};
pub use decode::{decode_html, DecodedHtml};
pub use engine::EngineHandle;
pub use extract::{capture, CaptureObserver, NullObserver};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{CaptureReport, Clock, EngineConfig, Pipeline, PipelineError};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput};
