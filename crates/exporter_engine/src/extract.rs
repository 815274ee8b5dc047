use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use crate::filter::{filter_subtree, FilteredFragment};

/// How message content is rendered into the exported documents. Chosen once
/// per export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Keep the message's inner markup (tables, code blocks, emphasis).
    #[default]
    Markup,
    /// Flatten to normalized plain text.
    PlainText,
}

pub trait Extractor: Send + Sync {
    /// Sanitized content of one message, or `None` when nothing is left.
    fn extract(&self, root: Option<ElementRef<'_>>) -> Option<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MessageExtractor {
    mode: ContentMode,
}

impl MessageExtractor {
    pub fn new(mode: ContentMode) -> Self {
        Self { mode }
    }
}

impl Extractor for MessageExtractor {
    fn extract(&self, root: Option<ElementRef<'_>>) -> Option<String> {
        let filtered = filter_subtree(root);
        if filtered.is_empty() {
            return None;
        }
        let content = match self.mode {
            ContentMode::Markup => markup_content(&filtered),
            ContentMode::PlainText => plain_text(&filtered.inner_html()),
        };
        Some(content).filter(|c| !c.is_empty())
    }
}

/// Inner markup with `&nbsp;` turned into plain spaces and outer whitespace trimmed.
pub fn markup_content(fragment: &FilteredFragment) -> String {
    fragment.inner_html().replace("&nbsp;", " ").trim().to_string()
}

/// Tag body up to the closing `>`. Quoted attribute values may hold a raw
/// `>`, which the serializer leaves unescaped.
const TAG_BODY: &str = r#"(?:[^>"']|"[^"]*"|'[^']*')*"#;

static PARAGRAPH_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</p\s*>").unwrap());
static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)<br\b{TAG_BODY}>")).unwrap());
static DIV_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)</?div\b{TAG_BODY}>")).unwrap());
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("<{TAG_BODY}>")).unwrap());
static YAML_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```yaml.*?```").unwrap());
static STATUS_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<statusblock\b[^>]*>.*?(?:</statusblock\s*>|\z)").unwrap()
});
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Flatten filtered markup to text.
///
/// Block boundaries become line breaks, tags are dropped, the basic entities
/// are decoded, yaml fences and status blocks are cut out and blank runs are
/// collapsed to a single empty line. Unbalanced markup never fails; stray
/// characters simply survive.
pub fn plain_text(markup: &str) -> String {
    let text = PARAGRAPH_END.replace_all(markup, "\n\n");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = DIV_BOUNDARY.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = YAML_FENCE.replace_all(&text, "");
    let text = STATUS_BLOCK.replace_all(&text, "");
    let text = BLANK_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Decodes `&nbsp;` and the five XML entities. `&amp;` goes last so that an
/// escaped entity such as `&amp;lt;` decodes once, to `&lt;`.
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
