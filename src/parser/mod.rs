//! Parsing of generated text into classified, styled blocks.

mod block;
mod inline;
mod options;

pub use block::{classify_and_format, classify_and_format_with_options, classify_line};
pub use inline::{parse_inline, strip_emphasis};
pub use options::{EmphasisScope, ParseOptions};
