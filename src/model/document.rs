//! Document model structures.

use super::{Paragraph, Table};

/// A block-level element of the document body.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}

/// A parsed Word document.
///
/// Only the direct children of the body are blocks; paragraphs inside table
/// cells belong to their cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Body blocks in document order
    pub body: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block to the body.
    pub fn add_block(&mut self, block: Block) {
        self.body.push(block);
    }

    /// All body blocks in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.body.iter()
    }

    /// Body paragraphs in document order, skipping tables.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    /// Body tables in document order, skipping paragraphs.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }

    /// Check if the body has no blocks.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
