use std::fmt;

use thiserror::Error;

/// Serialization variant selected by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Structured markup (XML).
    Xml,
    /// Key-value table (TOML).
    Toml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Xml, OutputFormat::Toml];

    /// Parses an operator-supplied selector. Surrounding whitespace and case are ignored.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "toml" => Ok(OutputFormat::Toml),
            _ => Err(InputError::UnsupportedFormat(raw.trim().to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Toml => "toml",
        }
    }

    /// `scrape_result.<ext>`, written to the working directory unless overridden.
    pub fn default_filename(self) -> String {
        format!("scrape_result.{}", self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("URL must not be empty")]
    EmptyUrl,
    #[error("invalid format {0:?}: please choose 'xml' or 'toml'")]
    UnsupportedFormat(String),
}

/// A validated capture request. Only constructible through [`validate_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    url: String,
    format: OutputFormat,
}

impl CaptureRequest {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Validates the two operator inputs.
///
/// The URL is only trimmed and checked for emptiness; scheme and host are left
/// to the fetch engine.
pub fn validate_input(url: &str, format: &str) -> Result<CaptureRequest, InputError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(InputError::EmptyUrl);
    }
    let format = OutputFormat::parse(format)?;
    Ok(CaptureRequest {
        url: url.to_string(),
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        assert_eq!(OutputFormat::parse("TOML  "), Ok(OutputFormat::Toml));
        assert_eq!(OutputFormat::parse(" Xml"), Ok(OutputFormat::Xml));
    }

    #[test]
    fn parse_rejects_other_selectors() {
        for raw in ["yaml", "", "XML2", "x ml", "json"] {
            assert!(
                matches!(OutputFormat::parse(raw), Err(InputError::UnsupportedFormat(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn default_filename_uses_extension() {
        assert_eq!(OutputFormat::Xml.default_filename(), "scrape_result.xml");
        assert_eq!(OutputFormat::Toml.default_filename(), "scrape_result.toml");
    }

    #[test]
    fn validate_trims_url() {
        let request = validate_input("  http://example.com \n", "xml").unwrap();
        assert_eq!(request.url(), "http://example.com");
        assert_eq!(request.format(), OutputFormat::Xml);
    }

    #[test]
    fn validate_rejects_blank_url() {
        assert_eq!(validate_input("   ", "xml"), Err(InputError::EmptyUrl));
    }
}
