//! Inline emphasis parsing: `**bold**` and `*italic*` within one line.
//!
//! The scan runs once, left to right, without backtracking. At each step the
//! nearest `**` and the nearest `*` are located; since every `**` is also a
//! `*`, the bold delimiter wins whenever it starts at or before the italic
//! one. An opener without a closer turns the rest of the line into literal
//! text, delimiters included.

use crate::model::StyledRun;

const BOLD: &str = "**";
const ITALIC: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    Bold,
    Italic,
}

impl Emphasis {
    fn delimiter(self) -> &'static str {
        match self {
            Emphasis::Bold => BOLD,
            Emphasis::Italic => ITALIC,
        }
    }

    fn run(self, text: &str) -> StyledRun {
        match self {
            Emphasis::Bold => StyledRun::bold(text),
            Emphasis::Italic => StyledRun::italic(text),
        }
    }
}

/// Split one line (without terminator) into styled runs.
///
/// Returns an empty vector for an empty line. Concatenating the run texts
/// gives back the line minus the delimiters of every matched pair.
///
/// # Example
///
/// ```
/// use textgen::model::StyledRun;
/// use textgen::parser::parse_inline;
///
/// let runs = parse_inline("Hello **world**!");
/// assert_eq!(
///     runs,
///     vec![
///         StyledRun::plain("Hello "),
///         StyledRun::bold("world"),
///         StyledRun::plain("!"),
///     ]
/// );
/// ```
pub fn parse_inline(line: &str) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];

        let (start, emphasis) = match (rest.find(BOLD), rest.find(ITALIC)) {
            (None, None) => {
                runs.push(StyledRun::plain(rest));
                break;
            }
            (Some(bold), Some(italic)) if bold <= italic => (bold, Emphasis::Bold),
            (Some(bold), None) => (bold, Emphasis::Bold),
            (_, Some(italic)) => (italic, Emphasis::Italic),
        };

        if start > 0 {
            runs.push(StyledRun::plain(&rest[..start]));
        }

        let delimiter = emphasis.delimiter();
        let inner_start = start + delimiter.len();
        match rest[inner_start..].find(delimiter) {
            Some(len) => {
                runs.push(emphasis.run(&rest[inner_start..inner_start + len]));
                pos += inner_start + len + delimiter.len();
            }
            None => {
                runs.push(StyledRun::plain(&rest[start..]));
                break;
            }
        }
    }

    runs
}

/// Concatenate run texts, dropping styles.
pub fn strip_emphasis(line: &str) -> String {
    parse_inline(line)
        .into_iter()
        .map(|run| run.text)
        .collect()
}
