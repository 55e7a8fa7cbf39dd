use thiserror::Error;

/// Boxed underlying cause carried by [`DanfeError`] variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while decoding an NFC-e or generating its DANFE.
///
/// Every variant is terminal for the current request. Nothing is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DanfeError {
    /// The XML is not well-formed or does not match the expected structure.
    #[error("malformed document: {message}")]
    MalformedDocument {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The document parsed but is not an NFC-e (model 65).
    #[error("unsupported document type: model '{0}', only NFC-e (model 65) is supported")]
    UnsupportedDocumentType(String),

    /// The requested output format is not recognized.
    #[error("unsupported output format '{0}': use 'html' or 'pdf'")]
    UnsupportedFormat(String),

    /// The PDF conversion service is unreachable, failed, or returned nothing.
    #[error("PDF conversion unavailable: {message}")]
    ConversionUnavailable {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DanfeError {
    /// A structural problem with no underlying parser error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a parser error as [`DanfeError::MalformedDocument`].
    pub fn malformed_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::MalformedDocument {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// A conversion failure with no underlying transport error.
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::ConversionUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a transport error as [`DanfeError::ConversionUnavailable`].
    pub fn conversion_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConversionUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn malformed_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad byte");
        let err = DanfeError::malformed_with("invalid UTF-8", io);
        assert_eq!(err.to_string(), "malformed document: invalid UTF-8");
        assert_eq!(err.source().unwrap().to_string(), "bad byte");
    }

    #[test]
    fn conversion_without_source() {
        let err = DanfeError::conversion("empty PDF");
        assert!(err.source().is_none());
        assert!(err.to_string().contains("empty PDF"));
    }

    #[test]
    fn unsupported_type_mentions_model() {
        let err = DanfeError::UnsupportedDocumentType("55".into());
        assert!(err.to_string().contains("'55'"));
    }
}
