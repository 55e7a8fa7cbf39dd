use reqwest::StatusCode;
use reqwest::blocking::{Client, multipart};
use tracing::{debug, info};

use super::ConverterConfig;
use crate::core::DanfeError;

/// Page setup for 80mm thermal paper: one tall page, no margins.
const PAGE_FIELDS: &[(&str, &str)] = &[
    ("paperWidth", "3.15in"),
    ("singlePage", "true"),
    ("marginTop", "0"),
    ("marginBottom", "0"),
    ("marginLeft", "0"),
    ("marginRight", "0"),
    ("printBackground", "true"),
    ("scale", "1.0"),
];

/// Client for a Gotenberg HTML→PDF service.
///
/// One request per call, no retries. A failed conversion never yields
/// partial output.
#[derive(Debug, Clone)]
pub struct PdfConverter {
    config: ConverterConfig,
    client: Client,
}

impl PdfConverter {
    pub fn new(config: ConverterConfig) -> Result<Self, DanfeError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DanfeError::conversion_with("failed to build HTTP client", e))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert a complete HTML document to PDF bytes.
    pub fn convert(&self, html: &[u8]) -> Result<Vec<u8>, DanfeError> {
        let file = multipart::Part::bytes(html.to_vec())
            .file_name("index.html")
            .mime_str("text/html")
            .map_err(|e| DanfeError::conversion_with("invalid multipart content type", e))?;

        let mut form = multipart::Form::new().part("files", file);
        for (name, value) in PAGE_FIELDS {
            form = form.text(*name, *value);
        }

        let url = self.config.endpoint();
        debug!(%url, html_bytes = html.len(), "posting HTML for conversion");

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| DanfeError::conversion_with(format!("request to {url} failed"), e))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = match resp.text() {
                Ok(body) => body,
                Err(e) => format!("<unreadable body: {e}>"),
            };
            return Err(DanfeError::conversion(format!(
                "conversion service returned HTTP {status}: {body}"
            )));
        }

        let pdf = resp
            .bytes()
            .map_err(|e| DanfeError::conversion_with("failed to read PDF response", e))?;
        if pdf.is_empty() {
            return Err(DanfeError::conversion(
                "conversion service returned an empty PDF",
            ));
        }

        info!(%url, pdf_bytes = pdf.len(), "converted DANFE to PDF");
        Ok(pdf.to_vec())
    }
}
