//! Parsing options and configuration.

/// Options for classifying and formatting generated text.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Glyph that replaces the source bullet marker
    pub bullet_glyph: char,

    /// Which block kinds get inline `*`/`**` emphasis parsing
    pub emphasis: EmphasisScope,

    /// Normalize the response to Unicode NFC before classification
    pub normalize_unicode: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bullet glyph.
    pub fn with_bullet_glyph(mut self, glyph: char) -> Self {
        self.bullet_glyph = glyph;
        self
    }

    /// Set the emphasis scope.
    pub fn with_emphasis(mut self, scope: EmphasisScope) -> Self {
        self.emphasis = scope;
        self
    }

    /// Parse emphasis in headings and list items too.
    pub fn emphasis_everywhere(mut self) -> Self {
        self.emphasis = EmphasisScope::AllBlocks;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            bullet_glyph: '•',
            emphasis: EmphasisScope::ParagraphsOnly,
            normalize_unicode: false,
        }
    }
}

/// Block kinds whose content goes through the inline formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmphasisScope {
    /// Only paragraph lines; headings and list items stay literal
    #[default]
    ParagraphsOnly,
    /// Paragraphs, headings, bullet and numbered items
    AllBlocks,
}
