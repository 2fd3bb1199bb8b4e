//! Lossless encoders for a [`CaptureDocument`].
//!
//! Both variants use the same field names (`url`, `timestamp`, `links`, and
//! `text`/`url` per link), so a document decoded from one format re-encodes
//! to the other without losing anything.
mod toml;
mod xml;

use capture_core::{CaptureDocument, OutputFormat};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("xml: {0}")]
    Xml(String),
    #[error("toml: {0}")]
    Toml(String),
    #[error("timestamp: {0}")]
    Timestamp(String),
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

pub fn encode(document: &CaptureDocument, format: OutputFormat) -> Result<Vec<u8>, CodecError> {
    let text = match format {
        OutputFormat::Xml => xml::encode(document)?,
        OutputFormat::Toml => toml::encode(document)?,
    };
    Ok(text.into_bytes())
}

pub fn decode(bytes: &[u8], format: OutputFormat) -> Result<CaptureDocument, CodecError> {
    let text = std::str::from_utf8(bytes)?;
    match format {
        OutputFormat::Xml => xml::decode(text),
        OutputFormat::Toml => toml::decode(text),
    }
}
