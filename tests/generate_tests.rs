#![cfg(feature = "pdf")]

use std::time::Duration;

use danfe::DanfeError;
use danfe::generate::{self, OutputFormat};
use danfe::pdf::{ConverterConfig, PdfConverter};

const FULL: &[u8] = include_bytes!("fixtures/nfce.xml");
const MODEL_55: &[u8] = include_bytes!("fixtures/nfe_model55.xml");

fn unreachable_converter() -> PdfConverter {
    let config = ConverterConfig::new("http://127.0.0.1:1").with_timeout(Duration::from_secs(2));
    PdfConverter::new(config).unwrap()
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn html_does_not_touch_the_converter() {
    let bytes = generate::generate(FULL, OutputFormat::Html, &unreachable_converter()).unwrap();
    let html = String::from_utf8(bytes).unwrap();
    assert!(html.contains("TOTAL A PAGAR:"));
    assert_eq!(html, generate::generate_html(FULL).unwrap());
}

#[test]
fn non_retail_document_is_rejected() {
    let err = generate::generate(MODEL_55, OutputFormat::Html, &unreachable_converter()).unwrap_err();
    assert!(matches!(err, DanfeError::UnsupportedDocumentType(ref m) if m == "55"));
}

#[test]
fn malformed_input_is_rejected() {
    let err = generate::generate_html(b"<nfeProc>").unwrap_err();
    assert!(matches!(err, DanfeError::MalformedDocument { .. }));
}

#[test]
fn pdf_with_unreachable_service() {
    let err = generate::generate(FULL, OutputFormat::Pdf, &unreachable_converter()).unwrap_err();
    assert!(matches!(err, DanfeError::ConversionUnavailable { .. }));
}

// ---------------------------------------------------------------------------
// save
// ---------------------------------------------------------------------------

#[test]
fn save_html_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nfce.html");
    generate::save(FULL, &path, OutputFormat::Html, &unreachable_converter()).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<!DOCTYPE html>"));
}

#[test]
fn failed_pdf_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nfce.pdf");
    let err = generate::save(FULL, &path, OutputFormat::Pdf, &unreachable_converter()).unwrap_err();
    assert!(matches!(err, DanfeError::ConversionUnavailable { .. }));
    assert!(!path.exists());
}

#[test]
fn rejected_document_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model55.html");
    let err = generate::save(MODEL_55, &path, OutputFormat::Html, &unreachable_converter()).unwrap_err();
    assert!(matches!(err, DanfeError::UnsupportedDocumentType(_)));
    assert!(!path.exists());
}

#[test]
fn format_is_validated_up_front() {
    assert!(matches!(
        "xml".parse::<OutputFormat>(),
        Err(DanfeError::UnsupportedFormat(_))
    ));
    assert_eq!("Pdf".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
}
