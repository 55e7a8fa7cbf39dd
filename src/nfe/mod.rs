//! NFC-e XML decoding.
//!
//! Turns an authorized `nfeProc` document (layout 4.00) into the
//! [`Envelope`](crate::core::Envelope) model. Decoding is the only step that
//! inspects document structure; everything downstream works on the model.
//!
//! # Example
//!
//! ```no_run
//! let xml = std::fs::read("nota.xml").unwrap();
//! let envelope = danfe::nfe::from_xml(&xml).unwrap();
//! assert!(envelope.is_retail_receipt());
//! println!("{} {}", envelope.access_key(), envelope.total_value());
//! ```

mod decode;

pub use decode::{from_xml, from_xml_str};
