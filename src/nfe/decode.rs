use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

use crate::core::*;

/// Root element of an authorized document.
const ROOT_ELEMENT: &[u8] = b"nfeProc";

/// Decode raw `nfeProc` XML bytes into an [`Envelope`].
///
/// The bytes must be UTF-8. A leading byte-order mark is ignored.
pub fn from_xml(bytes: &[u8]) -> Result<Envelope, DanfeError> {
    let xml = std::str::from_utf8(bytes)
        .map_err(|e| DanfeError::malformed_with(format!("input is not valid UTF-8: {e}"), e))?;
    from_xml_str(xml)
}

/// Decode an `nfeProc` XML string into an [`Envelope`].
pub fn from_xml_str(xml: &str) -> Result<Envelope, DanfeError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);

    check_root(xml)?;

    let envelope: Envelope = quick_xml::de::from_str(xml)
        .map_err(|e| DanfeError::malformed_with(format!("XML parse error: {e}"), e))?;

    // Covers both chNFe and the infNFe/@Id fallback.
    let key = envelope.access_key();
    if !key.is_empty() && !is_valid_access_key(key) {
        return Err(DanfeError::malformed(format!(
            "access key must have {ACCESS_KEY_LEN} digits, got '{key}'"
        )));
    }

    debug!(
        model = %envelope.nfe.info.header.model,
        number = %envelope.number(),
        items = envelope.nfe.info.items.len(),
        "decoded fiscal document"
    );

    Ok(envelope)
}

/// The first element must be `nfeProc`, with or without a namespace prefix.
fn check_root(xml: &str) -> Result<(), DanfeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = e.local_name();
                if name.as_ref() == ROOT_ELEMENT {
                    return Ok(());
                }
                return Err(DanfeError::malformed(format!(
                    "expected root element <nfeProc>, found <{}>",
                    String::from_utf8_lossy(name.as_ref())
                )));
            }
            Ok(Event::Eof) => return Err(DanfeError::malformed("document has no root element")),
            Err(e) => {
                return Err(DanfeError::malformed_with(format!("XML parse error: {e}"), e));
            }
            _ => {}
        }
    }
}
