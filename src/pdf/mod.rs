//! HTML→PDF conversion through a Gotenberg service.
//!
//! The rendered receipt is posted to Gotenberg's Chromium route with a page
//! setup for 80mm paper. The endpoint comes from [`ConverterConfig`], which
//! is passed explicitly; nothing is read from the environment implicitly.

mod config;
mod convert;

pub use config::*;
pub use convert::PdfConverter;
