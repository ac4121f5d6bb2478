//! In-memory document model.
//!
//! The DOCX parser builds these structures from `word/document.xml`; the
//! text renderer walks them to produce the linearized output.

mod document;
mod paragraph;
mod table;

pub use document::*;
pub use paragraph::*;
pub use table::*;
