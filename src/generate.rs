//! The decode → render → convert pipeline.
//!
//! ```no_run
//! use danfe::generate::{self, OutputFormat};
//! use danfe::pdf::{ConverterConfig, PdfConverter};
//!
//! let xml = std::fs::read("nota.xml").unwrap();
//! let converter = PdfConverter::new(ConverterConfig::from_env()).unwrap();
//! let pdf = generate::generate(&xml, OutputFormat::Pdf, &converter).unwrap();
//! std::fs::write("nota.pdf", pdf).unwrap();
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::core::{DanfeError, Envelope};
use crate::danfe::render_html;
use crate::nfe::from_xml;
use crate::pdf::PdfConverter;

/// Output format of a generated DANFE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// UTF-8 HTML page.
    #[default]
    Html,
    /// PDF produced by the conversion service.
    Pdf,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Pdf => "pdf",
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = DanfeError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "pdf" => Ok(Self::Pdf),
            _ => Err(DanfeError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Decode `xml` and check it is an NFC-e.
pub fn decode_retail_receipt(xml: &[u8]) -> Result<Envelope, DanfeError> {
    let envelope = from_xml(xml)?;
    if !envelope.is_retail_receipt() {
        return Err(DanfeError::UnsupportedDocumentType(
            envelope.nfe.info.header.model.clone(),
        ));
    }
    Ok(envelope)
}

/// Render the DANFE of an NFC-e document as HTML.
pub fn generate_html(xml: &[u8]) -> Result<String, DanfeError> {
    let envelope = decode_retail_receipt(xml)?;
    render_html(&envelope)
}

/// Produce the DANFE bytes in the requested format.
///
/// The converter is only contacted for [`OutputFormat::Pdf`].
pub fn generate(
    xml: &[u8],
    format: OutputFormat,
    converter: &PdfConverter,
) -> Result<Vec<u8>, DanfeError> {
    let html = generate_html(xml)?;
    match format {
        OutputFormat::Html => Ok(html.into_bytes()),
        OutputFormat::Pdf => converter.convert(html.as_bytes()),
    }
}

/// Generate and write the DANFE to `output`.
///
/// The file is written only once generation has fully succeeded, so a
/// failure never leaves a partial or HTML-instead-of-PDF file behind.
pub fn save(
    xml: &[u8],
    output: &Path,
    format: OutputFormat,
    converter: &PdfConverter,
) -> Result<(), DanfeError> {
    let bytes = generate(xml, format, converter)?;
    std::fs::write(output, &bytes)?;
    info!(
        path = %output.display(),
        %format,
        bytes = bytes.len(),
        "wrote DANFE"
    );
    Ok(())
}
