use crate::error::{Error, Result};
use crate::filter::DirFilter;
use std::path::{Path, PathBuf};

const DEFAULT_PROBLEMS_DIR: &str = "problems";
const DEFAULT_TAGS_DIR: &str = "tags";
const DEFAULT_DASHBOARD: &str = "README.md";
const DEFAULT_TITLE: &str = "🚀 Problem Index";

/// Configuration for the tagdex pipeline.
///
/// Use [`Config::builder()`] to construct a new configuration. All paths
/// except `root` are resolved relative to `root`, so the defaults reproduce
/// the conventional layout: `problems/` scanned, `tags/` and `README.md`
/// regenerated next to it.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Root directory containing the problems directory
    pub root: PathBuf,

    /// Directory of problem write-ups, relative to the root
    pub problems_dir: PathBuf,

    /// Output directory for per-tag pages, relative to the root
    pub tags_dir: PathBuf,

    /// Dashboard output file, relative to the root
    pub dashboard: PathBuf,

    /// Dashboard title heading
    pub title: String,

    /// Glob patterns for problem directories to skip
    pub exclude: Vec<String>,

    /// Optional run-summary JSON output file, relative to the root
    pub stats_path: Option<PathBuf>,

    /// Dry run mode (no file writes)
    pub dry_run: bool,

    /// Create timestamped backups of existing output files
    pub backup_existing: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tagdex::Config;
    ///
    /// let config = Config::builder()
    ///     .root("./docs")
    ///     .title("My Problems")
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Returns the resolved problems directory.
    #[must_use]
    pub fn problems_path(&self) -> PathBuf {
        self.root.join(&self.problems_dir)
    }

    /// Returns the resolved tags output directory.
    #[must_use]
    pub fn tags_path(&self) -> PathBuf {
        self.root.join(&self.tags_dir)
    }

    /// Returns the resolved dashboard output file.
    #[must_use]
    pub fn dashboard_path(&self) -> PathBuf {
        self.root.join(&self.dashboard)
    }

    /// Returns the directory the dashboard is written into.
    ///
    /// Links in the dashboard are computed relative to this directory.
    #[must_use]
    pub fn dashboard_dir(&self) -> PathBuf {
        self.dashboard_path()
            .parent()
            .map_or_else(|| self.root.clone(), Path::to_path_buf)
    }

    /// Returns the resolved run-summary JSON path, if configured.
    #[must_use]
    pub fn stats_file(&self) -> Option<PathBuf> {
        self.stats_path.as_ref().map(|p| self.root.join(p))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The problems directory doesn't exist or is not a directory
    /// - An exclude pattern is not a valid glob
    pub fn validate(&self) -> Result<()> {
        let problems = self.problems_path();

        if !problems.exists() {
            return Err(Error::config(format!(
                "Problems directory does not exist: {}",
                problems.display()
            )));
        }

        if !problems.is_dir() {
            return Err(Error::config(format!(
                "Problems path is not a directory: {}",
                problems.display()
            )));
        }

        // Surface bad glob patterns before any output is touched
        DirFilter::new(&self.exclude)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            problems_dir: PathBuf::from(DEFAULT_PROBLEMS_DIR),
            tags_dir: PathBuf::from(DEFAULT_TAGS_DIR),
            dashboard: PathBuf::from(DEFAULT_DASHBOARD),
            title: DEFAULT_TITLE.to_string(),
            exclude: Vec::new(),
            stats_path: None,
            dry_run: false,
            backup_existing: false,
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    root: Option<PathBuf>,
    problems_dir: Option<PathBuf>,
    tags_dir: Option<PathBuf>,
    dashboard: Option<PathBuf>,
    title: Option<String>,
    exclude: Vec<String>,
    stats_path: Option<PathBuf>,
    dry_run: bool,
    backup_existing: bool,
}

impl ConfigBuilder {
    /// Sets the root directory containing the problems directory.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the problems directory, relative to the root.
    #[must_use]
    pub fn problems_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.problems_dir = Some(path.into());
        self
    }

    /// Sets the tags output directory, relative to the root.
    #[must_use]
    pub fn tags_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.tags_dir = Some(path.into());
        self
    }

    /// Sets the dashboard output file, relative to the root.
    #[must_use]
    pub fn dashboard(mut self, path: impl Into<PathBuf>) -> Self {
        self.dashboard = Some(path.into());
        self
    }

    /// Sets the dashboard title heading.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets glob patterns for problem directories to skip.
    #[must_use]
    pub fn exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Enables the run-summary JSON output at the given path.
    #[must_use]
    pub fn stats_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stats_path = Some(path.into());
        self
    }

    /// Enables dry run mode (no file writes).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Enables or disables backups of existing output files.
    #[must_use]
    pub fn backup_existing(mut self, enabled: bool) -> Self {
        self.backup_existing = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            root: self.root.unwrap_or_else(|| PathBuf::from(".")),
            problems_dir: self
                .problems_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROBLEMS_DIR)),
            tags_dir: self
                .tags_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TAGS_DIR)),
            dashboard: self
                .dashboard
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DASHBOARD)),
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            exclude: self.exclude,
            stats_path: self.stats_path,
            dry_run: self.dry_run,
            backup_existing: self.backup_existing,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_default_layout() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("problems").create_dir_all().unwrap();

        let config = Config::builder().root(temp.path()).build().unwrap();

        assert_eq!(config.problems_path(), temp.path().join("problems"));
        assert_eq!(config.tags_path(), temp.path().join("tags"));
        assert_eq!(config.dashboard_path(), temp.path().join("README.md"));
        assert_eq!(config.dashboard_dir(), temp.path());
        assert!(!config.dry_run);
        assert!(!config.backup_existing);
    }

    #[test]
    fn test_missing_problems_dir() {
        let temp = assert_fs::TempDir::new().unwrap();

        let result = Config::builder().root(temp.path()).build();

        assert!(result.is_err());
    }

    #[test]
    fn test_problems_path_is_a_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("problems").write_str("not a directory").unwrap();

        let result = Config::builder().root(temp.path()).build();

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_exclude_glob() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("problems").create_dir_all().unwrap();

        let result = Config::builder()
            .root(temp.path())
            .exclude(vec!["[".to_string()])
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_custom_layout() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("puzzles").create_dir_all().unwrap();

        let config = Config::builder()
            .root(temp.path())
            .problems_dir("puzzles")
            .tags_dir("by-tag")
            .dashboard("INDEX.md")
            .title("Puzzles")
            .build()
            .unwrap();

        assert_eq!(config.problems_path(), temp.path().join("puzzles"));
        assert_eq!(config.tags_path(), temp.path().join("by-tag"));
        assert_eq!(config.dashboard_path(), temp.path().join("INDEX.md"));
        assert_eq!(config.title, "Puzzles");
    }

    #[test]
    fn test_stats_file_resolution() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("problems").create_dir_all().unwrap();

        let config = Config::builder()
            .root(temp.path())
            .stats_path("stats.json")
            .build()
            .unwrap();

        assert_eq!(config.stats_file(), Some(temp.path().join("stats.json")));
    }
}
