//! Prompt construction from a content type and a subject.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kind of text to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    #[default]
    Article,
    BlogPost,
    Report,
    Summary,
    CaseStudy,
}

impl ContentType {
    /// Every content type, in menu order.
    pub const ALL: [ContentType; 5] = [
        ContentType::Article,
        ContentType::BlogPost,
        ContentType::Report,
        ContentType::Summary,
        ContentType::CaseStudy,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Article => "Article",
            ContentType::BlogPost => "Blog post",
            ContentType::Report => "Report",
            ContentType::Summary => "Summary",
            ContentType::CaseStudy => "Case study",
        }
    }

    /// Identifier accepted by [`FromStr`].
    pub fn slug(self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::BlogPost => "blog-post",
            ContentType::Report => "report",
            ContentType::Summary => "summary",
            ContentType::CaseStudy => "case-study",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace([' ', '_'], "-");
        match wanted.as_str() {
            "blog" => return Ok(ContentType::BlogPost),
            "case" => return Ok(ContentType::CaseStudy),
            _ => {}
        }
        ContentType::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| Error::Other(format!("Unknown content type: {}", s)))
    }
}

/// Build the instruction sent to the model.
///
/// # Example
///
/// ```
/// use textgen::prompt::{build_prompt, ContentType};
///
/// let prompt = build_prompt(ContentType::Article, "Rust").unwrap();
/// assert_eq!(prompt, "Write an article about the following subject: Rust");
/// ```
pub fn build_prompt(content_type: ContentType, subject: &str) -> Result<String> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(Error::EmptySubject);
    }

    let noun = content_type.label().to_lowercase();
    let article = if noun.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    };
    Ok(format!(
        "Write {} {} about the following subject: {}",
        article, noun, subject
    ))
}
