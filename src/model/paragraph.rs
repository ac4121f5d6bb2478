//! Paragraph model.

/// A paragraph of text.
///
/// `text` is the concatenation of the paragraph's runs, with tabs and line
/// breaks already turned into `\t` and `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Paragraph text
    pub text: String,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with the given text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> &str {
        &self.text
    }

    /// Check whether the paragraph holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(Paragraph::new().is_blank());
        assert!(Paragraph::with_text(" \t\n").is_blank());
        assert!(!Paragraph::with_text("  x ").is_blank());
    }
}
