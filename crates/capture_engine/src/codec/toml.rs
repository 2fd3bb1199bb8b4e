use capture_core::{CaptureDocument, LinkRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use toml_edit::{value, Array, Datetime, DocumentMut, InlineTable};

use super::CodecError;

#[derive(Deserialize)]
struct TomlDocument {
    url: String,
    timestamp: Datetime,
    #[serde(default)]
    links: Vec<LinkRecord>,
}

/// Flat `url` and native `timestamp` keys, `links` as an array of inline tables.
pub(super) fn encode(document: &CaptureDocument) -> Result<String, CodecError> {
    let mut links = Array::new();
    for link in document.links() {
        let mut entry = InlineTable::new();
        entry.insert("text", link.text.as_str().into());
        entry.insert("url", link.href.as_str().into());
        links.push(entry);
    }

    let mut out = DocumentMut::new();
    out["url"] = value(document.source_url());
    out["timestamp"] = value(to_toml_datetime(document.captured_at())?);
    out["links"] = value(links);
    Ok(out.to_string())
}

pub(super) fn decode(text: &str) -> Result<CaptureDocument, CodecError> {
    let raw: TomlDocument =
        toml_edit::de::from_str(text).map_err(|err| CodecError::Toml(err.to_string()))?;
    let captured_at = from_toml_datetime(&raw.timestamp)?;
    Ok(CaptureDocument::from_parts(raw.url, captured_at, raw.links))
}

fn to_toml_datetime(at: DateTime<Utc>) -> Result<Datetime, CodecError> {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        .parse::<Datetime>()
        .map_err(|err| CodecError::Timestamp(err.to_string()))
}

/// Only offset date-times carry enough information to rebuild a UTC instant.
fn from_toml_datetime(datetime: &Datetime) -> Result<DateTime<Utc>, CodecError> {
    DateTime::parse_from_rfc3339(&datetime.to_string())
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| CodecError::Timestamp(format!("{datetime}: {err}")))
}
