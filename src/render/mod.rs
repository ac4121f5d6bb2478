//! Output rendering for documents.
//!
//! The text renderer flattens a [`Document`](crate::model::Document) into
//! newline-separated lines: one per non-blank paragraph, one per non-empty
//! table row, with each table bracketed by [`TABLE_START`] and [`TABLE_END`].
//!
//! # Example
//!
//! ```no_run
//! use docxtract::docx::DocxParser;
//! use docxtract::render::{to_text, BlockOrder, RenderOptions};
//!
//! let doc = DocxParser::open("document.docx")?.parse()?;
//! let text = to_text(&doc, &RenderOptions::new().with_block_order(BlockOrder::Document));
//! # Ok::<(), docxtract::Error>(())
//! ```

mod options;
mod text;

pub use options::{BlockOrder, RenderOptions};
pub use text::{to_text, CELL_DELIMITER, TABLE_END, TABLE_START};
