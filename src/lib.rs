//! # tagdex
//!
//! Regenerates derived index files from a directory of markdown problem
//! write-ups: one page per tag plus a summary dashboard.
//!
//! ## Features
//!
//! - Frontmatter extraction (`id`, `title`, `difficulty`, `tags`) by
//!   independent pattern matching
//! - Deterministic output: directory traversal and tag iteration are
//!   ordered, so reruns are byte-identical
//! - Atomic file writes with optional backups
//! - Glob-based exclusion of problem directories
//!
//! ## Quick Start
//!
//! ```no_run
//! use tagdex::{Config, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .root(".")
//!     .build()?;
//!
//! Pipeline::new(config)?.run()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library follows a pipeline architecture:
//! 1. **Scanner**: Discovers problem directories and parses frontmatter
//! 2. **Index**: Aggregates tag buckets and difficulty counters
//! 3. **Writer**: Renders and persists tag pages and the dashboard

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod error;
mod filter;
mod frontmatter;
mod index;
mod pipeline;
mod problem;
mod scanner;
mod template;
mod writer;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use index::{tag_slug, IndexStats, ProblemIndex};
pub use pipeline::{Pipeline, PipelineStats};
pub use problem::Problem;

/// Runs the complete regeneration pipeline with the given configuration.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The problems directory doesn't exist or is inaccessible
/// - A content file cannot be read
/// - Output files cannot be written
///
/// # Examples
///
/// ```no_run
/// use tagdex::{Config, run};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder()
///     .root(".")
///     .build()?;
///
/// run(config)?;
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config) -> Result<PipelineStats> {
    Pipeline::new(config)?.run()
}
