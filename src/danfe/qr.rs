use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use thiserror::Error;
use tracing::warn;

/// Error-correction level used for the consultation QR code.
pub const QR_EC_LEVEL: EcLevel = EcLevel::M;

/// Minimum side of the generated PNG, in pixels.
pub const QR_MIN_SIZE_PX: u32 = 256;

/// Why a QR payload could not be turned into a PNG.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QrImageError {
    /// The payload does not fit a QR code at the configured level.
    #[error("QR code generation failed: {0}")]
    Encode(#[from] QrError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Encode `payload` as a PNG QR code.
pub fn qr_png(payload: &str) -> Result<Vec<u8>, QrImageError> {
    let code = QrCode::with_error_correction_level(payload, QR_EC_LEVEL)?;

    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_MIN_SIZE_PX, QR_MIN_SIZE_PX)
        .build();

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

/// `data:` URI with the base64 PNG, or `None` when the payload cannot be
/// encoded. Failures are logged, never returned: the receipt is still valid
/// without the image.
pub fn qr_data_uri(payload: &str) -> Option<String> {
    match qr_png(payload) {
        Ok(png) => Some(format!("data:image/png;base64,{}", STANDARD.encode(png))),
        Err(e) => {
            warn!(error = %e, payload_len = payload.len(), "omitting QR code");
            None
        }
    }
}
