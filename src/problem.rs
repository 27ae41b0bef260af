use serde::Serialize;

/// Difficulty icons shown next to the raw difficulty text.
const ICON_EASY: &str = "🟢";
const ICON_MEDIUM: &str = "🟡";
const ICON_HARD: &str = "🔴";
const ICON_OTHER: &str = "⚪";

/// A problem write-up accepted from frontmatter.
///
/// Constructed during the scan phase and read-only thereafter.
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    /// Numeric id string exactly as matched, used for display
    pub id: String,

    /// The id parsed as an integer, used as the sort key
    pub number: u64,

    /// Display title with surrounding quotes stripped
    pub title: String,

    /// Raw difficulty string (`Easy`/`Medium`/`Hard` recognized, anything else is "other")
    pub difficulty: String,

    /// Path to the problem directory relative to the root, forward-slash normalized
    pub relative_path: String,

    /// Tags in frontmatter order, trimmed and quote-stripped
    pub tags: Vec<String>,
}

impl Problem {
    /// Creates a new problem record.
    ///
    /// Backslashes in `relative_path` are normalized to forward slashes so
    /// rendered links are identical across platforms.
    #[must_use]
    pub fn new(
        id: String,
        number: u64,
        title: String,
        difficulty: String,
        relative_path: String,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            number,
            title,
            difficulty,
            relative_path: relative_path.replace('\\', "/"),
            tags,
        }
    }

    /// Returns the colored marker for this problem's difficulty.
    #[must_use]
    pub fn difficulty_icon(&self) -> &'static str {
        difficulty_icon(&self.difficulty)
    }

    /// Returns true if this problem carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Maps a raw difficulty string to its icon, case-insensitively.
///
/// Unrecognized difficulties get the white marker.
#[must_use]
pub(crate) fn difficulty_icon(difficulty: &str) -> &'static str {
    match difficulty.to_ascii_lowercase().as_str() {
        "easy" => ICON_EASY,
        "medium" => ICON_MEDIUM,
        "hard" => ICON_HARD,
        _ => ICON_OTHER,
    }
}
