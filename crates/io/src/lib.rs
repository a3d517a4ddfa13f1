// File I/O operations

pub mod csv;
pub mod document;
pub mod error;
pub mod json;

pub use document::{load_document, render, save_document, Document, Rendered, ValueKind, Values};
pub use error::IoError;
