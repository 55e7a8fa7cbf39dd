//! # danfe
//!
//! Parses authorized Brazilian NFC-e documents (NF-e model 65, layout 4.00)
//! and renders the DANFE NFC-e, the consumer receipt printed on 80mm
//! thermal paper, as HTML or PDF.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Timestamps keep the offset written in the document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use danfe::danfe::render_html;
//! use danfe::nfe::from_xml;
//!
//! let xml = std::fs::read("nota.xml").unwrap();
//! let envelope = from_xml(&xml).unwrap();
//! assert!(envelope.is_retail_receipt());
//!
//! let html = render_html(&envelope).unwrap();
//! std::fs::write("nota.html", html).unwrap();
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Schema model, formatters, payment codes, errors |
//! | `xml` | `nfeProc` XML decoding |
//! | `html` | DANFE HTML rendering with embedded QR code |
//! | `pdf` | Gotenberg PDF conversion and the generation pipeline |
//! | `cli` (default) | The `danfe` command-line tool |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod nfe;

#[cfg(feature = "html")]
pub mod danfe;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "pdf")]
pub mod generate;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
