//! Rendering options configuration.

/// Order in which paragraphs and tables are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockOrder {
    /// All body paragraphs first, then all tables. A table's position
    /// relative to the surrounding paragraphs is not kept.
    #[default]
    Grouped,
    /// Paragraphs and tables interleaved as they appear in the body
    Document,
}

/// Options for rendering documents.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Block emission order
    pub block_order: BlockOrder,
}

impl RenderOptions {
    /// Create new render options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the block emission order.
    pub fn with_block_order(mut self, order: BlockOrder) -> Self {
        self.block_order = order;
        self
    }
}
