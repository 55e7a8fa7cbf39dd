//! NFC-e schema model, formatting helpers and errors.
//!
//! The model mirrors the `nfeProc` XML tree. Monetary values and quantities
//! are [`rust_decimal::Decimal`], timestamps keep the document's own offset.

mod error;
pub mod format;
mod payment;
mod tax;
mod types;

pub use error::*;
pub use format::*;
pub use payment::*;
pub use tax::*;
pub use types::*;
