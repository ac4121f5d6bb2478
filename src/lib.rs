//! # docxtract
//!
//! Extract embedded media and linearized text from Word (.docx) documents.
//!
//! Two independent pipelines share one input file:
//!
//! - media extraction copies every entry under `word/media/` into a directory
//! - text extraction flattens body paragraphs and tables into plain lines,
//!   marking tables with `[TABLE]` / `[/TABLE]` and joining cells with ` | `
//!
//! ## Quick Start
//!
//! ```no_run
//! // Copy embedded images out of the package
//! let images = docxtract::extract_media("document.docx", "extracted_images")?;
//! println!("{} images", images.len());
//!
//! // Linearize paragraphs and tables
//! let text = docxtract::extract_text("document.docx")?;
//! std::fs::write("extracted_text.txt", text)?;
//! # Ok::<(), docxtract::Error>(())
//! ```
//!
//! ## Keeping tables in place
//!
//! By default every table is emitted after all paragraphs. To keep tables
//! between the paragraphs that surround them:
//!
//! ```no_run
//! use docxtract::render::{BlockOrder, RenderOptions};
//!
//! let options = RenderOptions::new().with_block_order(BlockOrder::Document);
//! let text = docxtract::extract_text_with_options("document.docx", &options)?;
//! # Ok::<(), docxtract::Error>(())
//! ```

pub mod container;
pub mod detect;
pub mod docx;
pub mod error;
pub mod media;
pub mod model;
pub mod render;

// Re-exports
pub use container::OoxmlContainer;
pub use docx::DocxParser;
pub use error::{Error, Result};
pub use media::{extract_media, MediaEntry, MediaExtractor, MEDIA_PREFIX};
pub use model::{Block, Cell, Document, Paragraph, Row, Table, VerticalMerge};
pub use render::{BlockOrder, RenderOptions};

use std::path::Path;

/// Parse a DOCX file into a Document model.
///
/// # Example
///
/// ```no_run
/// let doc = docxtract::parse_file("document.docx")?;
/// println!("Tables: {}", doc.tables().count());
/// # Ok::<(), docxtract::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    DocxParser::open(path)?.parse()
}

/// Parse a DOCX document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    DocxParser::from_bytes(data.to_vec())?.parse()
}

/// Extract the linearized text of a DOCX file.
///
/// Paragraphs come first, then every table, as described in [`render`].
///
/// # Errors
///
/// Fails when the file is missing, is not a ZIP archive, is not a Word
/// package, or its main document part is malformed.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    extract_text_with_options(path, &RenderOptions::default())
}

/// Extract the linearized text of a DOCX file with options.
pub fn extract_text_with_options(path: impl AsRef<Path>, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_text(&doc, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_missing_file() {
        let result = extract_text("test-files/missing.docx");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_parse_bytes_rejects_non_zip() {
        let result = parse_bytes(b"not a zip archive");
        assert!(matches!(result, Err(Error::ZipArchive(_))));
    }
}
