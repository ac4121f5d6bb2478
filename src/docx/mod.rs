//! DOCX (Word) document parser.
//!
//! Reads the main document part of an Office Open XML (.docx) package and
//! builds the block-level [`Document`](crate::model::Document) model from it.

mod parser;

pub use parser::DocxParser;
