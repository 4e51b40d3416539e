//! Styled text runs.

use serde::{Deserialize, Serialize};

/// A contiguous piece of text sharing one bold/italic style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun {
    /// The text content, delimiters already removed
    pub text: String,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,
}

impl StyledRun {
    /// Create an unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            italic: false,
        }
    }

    /// Create an italic run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: true,
        }
    }

    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of characters (not bytes) in the run.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_constructors() {
        assert!(!StyledRun::plain("a").has_styling());
        assert!(StyledRun::bold("a").bold);
        assert!(StyledRun::italic("a").italic);
        assert!(!StyledRun::italic("a").bold);
    }

    #[test]
    fn test_char_len_counts_chars() {
        let run = StyledRun::plain("déjà vu");
        assert_eq!(run.char_len(), 7);
        assert!(run.text.len() > 7);
    }
}
