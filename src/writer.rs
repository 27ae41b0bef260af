use crate::{
    config::Config,
    error::{Error, Result},
    index::{tag_slug, ProblemIndex},
    template::TemplateEngine,
};
use serde::Serialize;
use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};
use tracing::{debug, info};

/// Run summary written as JSON when a stats file is configured.
#[derive(Debug, Serialize)]
pub(crate) struct RunSummary {
    /// Count of accepted problems
    pub total_problems: usize,

    /// Problems with difficulty Easy
    pub easy: usize,

    /// Problems with difficulty Medium
    pub medium: usize,

    /// Problems with difficulty Hard
    pub hard: usize,

    /// Number of distinct tags
    pub distinct_tags: usize,

    /// Number of tag pages written
    pub tag_files: usize,

    /// Execution duration in seconds
    pub duration_secs: f64,

    /// Per-tag problem counts
    pub tags: Vec<TagSummary>,

    /// Generation timestamp
    pub generated_at: String,
}

/// Summary of a single tag.
#[derive(Debug, Serialize)]
pub(crate) struct TagSummary {
    /// Tag name
    pub name: String,

    /// Number of problems carrying the tag
    pub problems: usize,
}

/// Writes rendered documents with atomic operations.
pub(crate) struct Writer {
    tags_path: PathBuf,
    dashboard_path: PathBuf,
    stats_file: Option<PathBuf>,
    backup_existing: bool,
    template_engine: TemplateEngine,
}

impl Writer {
    /// Creates a new writer from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if template engine initialization fails.
    pub(crate) fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            tags_path: config.tags_path(),
            dashboard_path: config.dashboard_path(),
            stats_file: config.stats_file(),
            backup_existing: config.backup_existing,
            template_engine: TemplateEngine::new(config)?,
        })
    }

    /// Writes one page per tag and the dashboard.
    ///
    /// The tags directory is created if absent. Returns the number of tag
    /// pages written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tags directory cannot be created
    /// - Template rendering fails
    /// - A file write operation fails
    pub(crate) fn write_index(&self, index: &ProblemIndex) -> Result<usize> {
        fs::create_dir_all(&self.tags_path).map_err(|e| Error::io(&self.tags_path, e))?;

        info!(
            "Writing {} tag pages to {}",
            index.tag_count(),
            self.tags_path.display()
        );

        let mut tag_files = 0;
        for (tag, problems) in index.tags() {
            let content = self.template_engine.render_tag_page(tag, &problems)?;
            let path = self.tags_path.join(format!("{}.md", tag_slug(tag)));

            self.write_file_atomic(&path, &content)?;
            tag_files += 1;

            debug!(
                "Wrote {} ({} problems) to {}",
                tag,
                problems.len(),
                path.display()
            );
        }

        let dashboard = self.template_engine.render_dashboard(index)?;
        if let Some(parent) = self.dashboard_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        self.write_file_atomic(&self.dashboard_path, &dashboard)?;

        info!(
            "Wrote dashboard to {}",
            self.dashboard_path.display()
        );

        Ok(tag_files)
    }

    /// Writes a file atomically with optional backup.
    ///
    /// Content goes to a temporary file first, is synced to disk, and is
    /// then renamed over the target path, so an interrupted run never
    /// leaves a half-written document.
    fn write_file_atomic(&self, path: &Path, content: &str) -> Result<()> {
        if path.exists() && self.backup_existing {
            self.backup_file(path)?;
        }

        let temp_path = path.with_extension("tmp");
        let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;

        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

        drop(temp_file);

        fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

        Ok(())
    }

    /// Creates a timestamped backup of an existing file.
    fn backup_file(&self, path: &Path) -> Result<()> {
        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)?
            .as_nanos();

        let filename = path
            .file_name()
            .ok_or_else(|| Error::config("Invalid file path"))?
            .to_string_lossy();

        let backup_name = format!("{}.backup.{}", filename, timestamp);
        let backup_path = path
            .parent()
            .ok_or_else(|| Error::config("Invalid file path"))?
            .join(backup_name);

        fs::copy(path, &backup_path).map_err(|e| Error::io(&backup_path, e))?;

        debug!("Created backup: {}", backup_path.display());
        Ok(())
    }

    /// Writes the run-summary JSON if a stats file is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the summary file cannot be written.
    pub(crate) fn write_stats(
        &self,
        index: &ProblemIndex,
        tag_files: usize,
        duration: Duration,
    ) -> Result<()> {
        let Some(stats_path) = &self.stats_file else {
            return Ok(());
        };

        let stats = index.stats();
        let summary = RunSummary {
            total_problems: stats.total,
            easy: stats.easy,
            medium: stats.medium,
            hard: stats.hard,
            distinct_tags: index.tag_count(),
            tag_files,
            duration_secs: duration.as_secs_f64(),
            tags: index
                .tags()
                .map(|(name, problems)| TagSummary {
                    name: name.to_string(),
                    problems: problems.len(),
                })
                .collect(),
            generated_at: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        };

        let file = fs::File::create(stats_path).map_err(|e| Error::io(stats_path, e))?;
        serde_json::to_writer_pretty(file, &summary).map_err(Error::from)?;

        info!("Wrote run summary to {}", stats_path.display());
        Ok(())
    }
}
