use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use engine_logging::engine_warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

/// Decodes a response body to UTF-8.
///
/// Encoding is chosen by BOM, then the `Content-Type` charset, then detection.
/// Malformed sequences become U+FFFD; a page with a few bad bytes still yields
/// its links.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(charset_param)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        engine_warn!("Body contained malformed {} sequences", used.name());
    }
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
    }
}

/// Mime type without parameters, lowercased.
pub(crate) fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase()
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (name, value) = part.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Some(value.trim().trim_matches(&['"', '\''][..]).to_string())
    })
}
