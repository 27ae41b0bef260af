//! Frontmatter extraction for problem write-ups.
//!
//! Pulls `id`, `title`, `difficulty` and `tags` out of a leading
//! `---`-delimited block. Fields are matched independently, so a missing
//! field yields an empty value rather than a failure.

use once_cell::sync::Lazy;
use regex::Regex;

static FRONTMATTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\s*\n(.*?)\n---").unwrap());
static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"id:\s*(\d+)").unwrap());
static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"title:\s*"?(.*?)"?(?:\n|$)"#).unwrap());
static DIFFICULTY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"difficulty:\s*(.*?)(?:\n|$)").unwrap());
static TAGS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"tags:\s*\[(.*?)\]").unwrap());

/// Raw field values pulled from a frontmatter block.
///
/// Absent fields are empty strings (or an empty list for tags); acceptance
/// rules are applied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fields {
    /// First digit run after `id:`
    pub(crate) id: String,

    /// Text after `title:` with optional surrounding double quotes stripped
    pub(crate) title: String,

    /// Text after `difficulty:`, trimmed
    pub(crate) difficulty: String,

    /// Comma-split contents of `tags: [...]`, trimmed and quote-stripped
    pub(crate) tags: Vec<String>,
}

/// Extracts frontmatter fields from full file content.
///
/// Returns `None` when no block delimited by `---` lines starts at the very
/// beginning of the content. That is the normal "not a problem file" case,
/// not an error.
pub(crate) fn extract(content: &str) -> Option<Fields> {
    let block = FRONTMATTER_RE
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())?;

    Some(Fields {
        id: capture(&ID_RE, block),
        title: capture(&TITLE_RE, block),
        difficulty: capture(&DIFFICULTY_RE, block),
        tags: parse_tags(&capture(&TAGS_RE, block)),
    })
}

/// Returns the first capture group trimmed, or an empty string when the
/// pattern does not match.
fn capture(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Splits the raw bracket contents into clean tag strings.
///
/// Elements are stripped of single and double quote characters and trimmed;
/// empty elements are discarded.
fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.replace(['"', '\''], "").trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
