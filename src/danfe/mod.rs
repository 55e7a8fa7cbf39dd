//! DANFE NFC-e rendering.
//!
//! Produces a self-contained HTML page sized for 80mm thermal paper: inline
//! CSS, no external assets, the consultation QR code embedded as a base64
//! PNG. The same envelope always renders to the same bytes.

mod html;
mod qr;

pub use html::{UNIDENTIFIED_CONSUMER, render_html, render_to_writer};
pub use qr::{QR_EC_LEVEL, QR_MIN_SIZE_PX, QrImageError, qr_data_uri, qr_png};
