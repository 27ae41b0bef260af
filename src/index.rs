//! In-memory aggregation of accepted problems.
//!
//! Builds the tag-to-problems mapping, the flat problem list, and the
//! difficulty counters that the renderers read from.

use crate::problem::Problem;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated view over all accepted problems.
///
/// Tag buckets iterate in lexicographic order; problem ordering within a
/// bucket follows directory traversal until sorted at render time.
#[derive(Debug, Default, Clone)]
pub struct ProblemIndex {
    problems: Vec<Problem>,
    tags: BTreeMap<String, Vec<Problem>>,
    easy: usize,
    medium: usize,
    hard: usize,
}

/// Difficulty statistics over the whole index.
///
/// The three counters need not sum to the total: unrecognized difficulties
/// are counted only in `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Count of all accepted problems
    pub total: usize,

    /// Problems with difficulty `Easy` (case-insensitive)
    pub easy: usize,

    /// Problems with difficulty `Medium` (case-insensitive)
    pub medium: usize,

    /// Problems with difficulty `Hard` (case-insensitive)
    pub hard: usize,
}

impl ProblemIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from problems in traversal order.
    #[must_use]
    pub fn from_problems(problems: Vec<Problem>) -> Self {
        let mut index = Self::new();
        for problem in problems {
            index.insert(problem);
        }
        index
    }

    /// Adds an accepted problem to the flat list, the difficulty counters,
    /// and every tag bucket named by its tags.
    ///
    /// A bucket is created on first sight of a tag; a problem carrying the
    /// same tag twice is appended twice, as in the original write-ups.
    pub fn insert(&mut self, problem: Problem) {
        if problem.difficulty.eq_ignore_ascii_case("easy") {
            self.easy += 1;
        } else if problem.difficulty.eq_ignore_ascii_case("medium") {
            self.medium += 1;
        } else if problem.difficulty.eq_ignore_ascii_case("hard") {
            self.hard += 1;
        }

        for tag in &problem.tags {
            self.tags
                .entry(tag.clone())
                .or_default()
                .push(problem.clone());
        }

        self.problems.push(problem);
    }

    /// Returns the number of accepted problems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Returns true if no problems were accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Returns the number of distinct tags.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Returns difficulty statistics.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total: self.problems.len(),
            easy: self.easy,
            medium: self.medium,
            hard: self.hard,
        }
    }

    /// Returns all problems sorted ascending by numeric id.
    ///
    /// The sort is stable, so equal ids keep traversal order.
    #[must_use]
    pub fn sorted_problems(&self) -> Vec<&Problem> {
        let mut sorted: Vec<&Problem> = self.problems.iter().collect();
        sorted.sort_by_key(|p| p.number);
        sorted
    }

    /// Iterates tags in lexicographic order with their problems sorted
    /// ascending by numeric id.
    pub fn tags(&self) -> impl Iterator<Item = (&str, Vec<&Problem>)> {
        self.tags.iter().map(|(name, problems)| {
            let mut sorted: Vec<&Problem> = problems.iter().collect();
            sorted.sort_by_key(|p| p.number);
            (name.as_str(), sorted)
        })
    }

    /// Returns tag names in lexicographic order.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }
}

/// Returns the filename-safe form of a tag.
///
/// Characters that are unsafe in filenames are replaced with `-`; all other
/// characters, including spaces, pass through unchanged. Every rendered link
/// to a tag page uses this form.
#[must_use]
pub fn tag_slug(tag: &str) -> String {
    tag.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c => c,
        })
        .collect()
}
