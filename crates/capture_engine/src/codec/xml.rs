use capture_core::{CaptureDocument, LinkRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::CodecError;

const ROOT: &str = "ScrapedData";
const LINKS: &str = "links";

/// `<ScrapedData>` with `url`, an RFC3339 `timestamp`, and one `<links>`
/// element per link.
///
/// Text content is written verbatim, surrounding whitespace included. Code
/// points outside the XML 1.0 `Char` production become U+FFFD so the file
/// stays well-formed; `\r` is written as a character reference so parsers
/// do not fold it into `\n`.
pub(super) fn encode(document: &CaptureDocument) -> Result<String, CodecError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let timestamp = document
        .captured_at()
        .to_rfc3339_opts(SecondsFormat::AutoSi, true);

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write(&mut writer, Event::Start(BytesStart::new(ROOT)))?;
    write_field(&mut writer, "url", document.source_url())?;
    write_field(&mut writer, "timestamp", &timestamp)?;
    for link in document.links() {
        write(&mut writer, Event::Start(BytesStart::new(LINKS)))?;
        write_field(&mut writer, "text", &link.text)?;
        write_field(&mut writer, "url", &link.href)?;
        write(&mut writer, Event::End(BytesEnd::new(LINKS)))?;
    }
    write(&mut writer, Event::End(BytesEnd::new(ROOT)))?;

    let mut out = String::from_utf8(writer.into_inner())
        .map_err(|err| CodecError::Xml(err.to_string()))?;
    out.push('\n');
    Ok(out)
}

pub(super) fn decode(text: &str) -> Result<CaptureDocument, CodecError> {
    let mut reader = Reader::from_str(text);
    let mut builder = DocumentReader::default();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => builder.open(element_name(&start)?)?,
            Event::Empty(start) => {
                builder.open(element_name(&start)?)?;
                builder.close()?;
            }
            Event::End(_) => builder.close()?,
            Event::Text(content) => builder.text(&content.unescape().map_err(xml_error)?),
            Event::CData(content) => builder.text(std::str::from_utf8(&content)?),
            Event::Eof => break,
            _ => {}
        }
    }

    builder.finish()
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), CodecError> {
    writer.write_event(event).map_err(xml_error)
}

fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<(), CodecError> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::from_escaped(escape_text(value))))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn escape_text(value: &str) -> String {
    let sanitized: String = value
        .chars()
        .map(|ch| {
            if is_xml_char(ch) {
                ch
            } else {
                char::REPLACEMENT_CHARACTER
            }
        })
        .collect();
    quick_xml::escape::escape(sanitized.as_str()).replace('\r', "&#xD;")
}

/// XML 1.0 `Char`: tab, newline, carriage return and everything from U+0020
/// except U+FFFE and U+FFFF. Surrogates are not representable in `char`.
fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r') || (ch >= '\u{20}' && ch != '\u{FFFE}' && ch != '\u{FFFF}')
}

fn element_name(start: &BytesStart<'_>) -> Result<String, CodecError> {
    Ok(std::str::from_utf8(start.name().as_ref())?.to_string())
}

fn xml_error(err: impl std::fmt::Display) -> CodecError {
    CodecError::Xml(err.to_string())
}

#[derive(Default)]
struct PendingLink {
    text: Option<String>,
    href: Option<String>,
}

/// Rebuilds a document from reader events. Unknown elements are skipped.
#[derive(Default)]
struct DocumentReader {
    open: Vec<String>,
    content: String,
    url: Option<String>,
    timestamp: Option<String>,
    link: Option<PendingLink>,
    links: Vec<LinkRecord>,
}

impl DocumentReader {
    fn open(&mut self, name: String) -> Result<(), CodecError> {
        if self.open.is_empty() && name != ROOT {
            return Err(CodecError::Xml(format!(
                "expected <{ROOT}> root, found <{name}>"
            )));
        }
        self.content.clear();
        self.open.push(name);
        if self.at_link() {
            self.link = Some(PendingLink::default());
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        self.content.push_str(text);
    }

    fn close(&mut self) -> Result<(), CodecError> {
        if self.at_link() {
            let link = self.link.take().unwrap_or_default();
            let href = link
                .href
                .ok_or_else(|| CodecError::Xml("link entry without <url>".to_string()))?;
            self.links
                .push(LinkRecord::new(link.text.unwrap_or_default(), href));
        }

        let name = self
            .open
            .pop()
            .ok_or_else(|| CodecError::Xml("unbalanced end tag".to_string()))?;
        let value = std::mem::take(&mut self.content);
        let in_root = self.open.len() == 1;
        let in_link = self.at_link();

        match name.as_str() {
            "url" if in_root => self.url = Some(value),
            "timestamp" if in_root => self.timestamp = Some(value),
            "text" if in_link => {
                if let Some(link) = self.link.as_mut() {
                    link.text = Some(value);
                }
            }
            "url" if in_link => {
                if let Some(link) = self.link.as_mut() {
                    link.href = Some(value);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// True while the innermost open element is a `<links>` entry of the root.
    fn at_link(&self) -> bool {
        self.open.len() == 2 && self.open[1] == LINKS
    }

    fn finish(self) -> Result<CaptureDocument, CodecError> {
        if !self.open.is_empty() {
            return Err(CodecError::Xml(format!(
                "unexpected end of document inside <{}>",
                self.open.join("><")
            )));
        }
        let url = self
            .url
            .ok_or_else(|| CodecError::Xml(format!("missing <url> in <{ROOT}>")))?;
        let timestamp = self
            .timestamp
            .ok_or_else(|| CodecError::Xml(format!("missing <timestamp> in <{ROOT}>")))?;
        let captured_at = DateTime::parse_from_rfc3339(&timestamp)
            .map(|at| at.with_timezone(&Utc))
            .map_err(|err| CodecError::Timestamp(format!("{timestamp}: {err}")))?;
        Ok(CaptureDocument::from_parts(url, captured_at, self.links))
    }
}
