use crate::{
    config::Config,
    error::Result,
    index::ProblemIndex,
    scanner::Scanner,
    writer::Writer,
};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Statistics collected during pipeline execution.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    /// Number of problems accepted into the index
    pub problems_indexed: usize,

    /// Problems with difficulty Easy
    pub easy: usize,

    /// Problems with difficulty Medium
    pub medium: usize,

    /// Problems with difficulty Hard
    pub hard: usize,

    /// Number of distinct tags
    pub distinct_tags: usize,

    /// Number of tag pages written (0 in dry-run mode)
    pub tag_files_written: usize,

    /// Total execution time
    pub duration: Duration,

    /// Time spent scanning
    pub scan_duration: Duration,

    /// Time spent rendering and writing
    pub write_duration: Duration,

    /// Tags output directory path
    pub tags_directory: String,
}

impl PipelineStats {
    /// Prints the one-line completion summary to stdout.
    pub fn print_summary(&self) {
        println!(
            "✅ Generated dashboard and {} tag files.",
            self.tag_files_written
        );
    }
}

/// Main pipeline orchestrator for regenerating the index files.
pub struct Pipeline {
    config: Config,
    scanner: Scanner,
    writer: Writer,
}

impl Pipeline {
    /// Creates a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - Writer initialization fails
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let scanner = Scanner::new(&config)?;
        let writer = Writer::new(&config)?;

        Ok(Self {
            config,
            scanner,
            writer,
        })
    }

    /// Executes the complete pipeline and returns statistics.
    ///
    /// # Process
    ///
    /// 1. **Scan**: Reads problem write-ups and their frontmatter
    /// 2. **Aggregate**: Builds the tag index and difficulty counters
    /// 3. **Write**: Renders and persists tag pages and the dashboard
    ///
    /// # Errors
    ///
    /// Returns an error if any stage fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tagdex::{Config, Pipeline};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder().root(".").build()?;
    ///
    /// let stats = Pipeline::new(config)?.run()?;
    /// stats.print_summary();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(root = %self.config.root.display()))]
    pub fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        info!("Starting index regeneration");

        // Stage 1: Scanning
        info!("Stage 1/3: Scanning problem write-ups...");
        let scan_start = Instant::now();
        let problems = self.scanner.scan()?;
        let scan_duration = scan_start.elapsed();

        info!(
            "✓ Accepted {} problems in {:.2}s",
            problems.len(),
            scan_duration.as_secs_f64()
        );

        // Stage 2: Aggregation
        info!("Stage 2/3: Aggregating tag index...");
        let index = ProblemIndex::from_problems(problems);
        let stats = index.stats();

        info!(
            "✓ {} problems across {} tags ({} easy, {} medium, {} hard)",
            stats.total,
            index.tag_count(),
            stats.easy,
            stats.medium,
            stats.hard
        );

        // Stage 3: Writing
        let write_start = Instant::now();
        let tag_files_written = if self.config.dry_run {
            warn!("Dry run mode enabled - skipping file writes");
            self.log_dry_run(&index);
            0
        } else {
            info!("Stage 3/3: Writing output files...");
            let written = self.writer.write_index(&index)?;
            self.writer
                .write_stats(&index, written, start_time.elapsed())?;
            written
        };
        let write_duration = write_start.elapsed();

        if !self.config.dry_run {
            info!(
                "✓ Wrote {} tag pages and the dashboard in {:.2}s",
                tag_files_written,
                write_duration.as_secs_f64()
            );
        }

        let total_duration = start_time.elapsed();

        info!(
            "✓ Index regeneration completed in {:.2}s",
            total_duration.as_secs_f64()
        );

        Ok(PipelineStats {
            problems_indexed: stats.total,
            easy: stats.easy,
            medium: stats.medium,
            hard: stats.hard,
            distinct_tags: index.tag_count(),
            tag_files_written,
            duration: total_duration,
            scan_duration,
            write_duration,
            tags_directory: self.config.tags_path().display().to_string(),
        })
    }

    /// Logs the files a non-dry run would have written.
    fn log_dry_run(&self, index: &ProblemIndex) {
        for tag in index.tag_names() {
            info!(
                "Would write {}/{}.md",
                self.config.tags_path().display(),
                crate::index::tag_slug(tag)
            );
        }
        info!(
            "Would write dashboard {}",
            self.config.dashboard_path().display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn write_problem(temp: &assert_fs::TempDir, dir: &str, frontmatter: &str) {
        temp.child(format!("problems/{}/index.md", dir))
            .write_str(frontmatter)
            .unwrap();
    }

    fn create_test_config(root: &std::path::Path) -> Config {
        Config::builder().root(root).build().unwrap()
    }

    #[test]
    fn test_pipeline_round_trip() {
        let temp = assert_fs::TempDir::new().unwrap();
        write_problem(
            &temp,
            "two-sum",
            "---\nid: 42\ntitle: \"Two Sum\"\ndifficulty: Easy\ntags: [array, hash-table]\n---\n",
        );

        let config = create_test_config(temp.path());
        let stats = Pipeline::new(config).unwrap().run().unwrap();

        assert_eq!(stats.problems_indexed, 1);
        assert_eq!(stats.easy, 1);
        assert_eq!(stats.medium, 0);
        assert_eq!(stats.hard, 0);
        assert_eq!(stats.tag_files_written, 2);

        let array = std::fs::read_to_string(temp.child("tags/array.md").path()).unwrap();
        let hash_table = std::fs::read_to_string(temp.child("tags/hash-table.md").path()).unwrap();
        assert!(array.contains("- [42. Two Sum](../problems/two-sum) <kbd>Easy</kbd>"));
        assert!(hash_table.contains("- [42. Two Sum](../problems/two-sum) <kbd>Easy</kbd>"));

        let dashboard = std::fs::read_to_string(temp.child("README.md").path()).unwrap();
        assert!(dashboard.contains("| 1 | 1 | 0 | 0 |"));
    }

    #[test]
    fn test_pipeline_dashboard_exact_output() {
        let temp = assert_fs::TempDir::new().unwrap();
        write_problem(
            &temp,
            "two-sum",
            "---\nid: 42\ntitle: \"Two Sum\"\ndifficulty: Easy\ntags: [array, hash-table]\n---\n",
        );

        let config = create_test_config(temp.path());
        Pipeline::new(config).unwrap().run().unwrap();

        let dashboard = std::fs::read_to_string(temp.child("README.md").path()).unwrap();
        let expected = "# 🚀 Problem Index\n\
                        \n\
                        ## 📊 Statistics\n\
                        \n\
                        | Total | 🟢 Easy | 🟡 Medium | 🔴 Hard |\n\
                        | --- | --- | --- | --- |\n\
                        | 1 | 1 | 0 | 0 |\n\
                        \n\
                        ## 🏷️ Tag Cloud\n\
                        \n\
                        [`array`](tags/array.md) [`hash-table`](tags/hash-table.md) \n\
                        \n\
                        ---\n\
                        \n\
                        ## 📚 Problem List\n\
                        \n\
                        | # | Title | Difficulty | Tags |\n\
                        | --- | --- | --- | --- |\n\
                        | 42 | [Two Sum](problems/two-sum) | 🟢 Easy | [array](tags/array.md), [hash-table](tags/hash-table.md) |\n";
        assert_eq!(dashboard, expected);
    }

    #[test]
    fn test_pipeline_skipped_directory_contributes_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        write_problem(&temp, "good", "---\nid: 1\ntitle: Good\ntags: [a]\n---\n");
        write_problem(&temp, "no-id", "---\ntitle: No Id\ntags: [a, b]\n---\n");

        let config = create_test_config(temp.path());
        let stats = Pipeline::new(config).unwrap().run().unwrap();

        assert_eq!(stats.problems_indexed, 1);
        assert_eq!(stats.tag_files_written, 1);
        assert!(!temp.child("tags/b.md").exists());

        let page = std::fs::read_to_string(temp.child("tags/a.md").path()).unwrap();
        assert!(page.contains("Good"));
        assert!(!page.contains("No Id"));
    }

    #[test]
    fn test_pipeline_idempotent_outputs() {
        let temp = assert_fs::TempDir::new().unwrap();
        write_problem(
            &temp,
            "one",
            "---\nid: 1\ntitle: One\ndifficulty: Easy\ntags: [array]\n---\n",
        );
        write_problem(
            &temp,
            "two",
            "---\nid: 2\ntitle: Two\ndifficulty: Hard\ntags: [array, graph]\n---\n",
        );

        let config = create_test_config(temp.path());
        Pipeline::new(config).unwrap().run().unwrap();

        let first_dashboard = std::fs::read_to_string(temp.child("README.md").path()).unwrap();
        let first_array = std::fs::read_to_string(temp.child("tags/array.md").path()).unwrap();
        let first_graph = std::fs::read_to_string(temp.child("tags/graph.md").path()).unwrap();

        let config = create_test_config(temp.path());
        Pipeline::new(config).unwrap().run().unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.child("README.md").path()).unwrap(),
            first_dashboard
        );
        assert_eq!(
            std::fs::read_to_string(temp.child("tags/array.md").path()).unwrap(),
            first_array
        );
        assert_eq!(
            std::fs::read_to_string(temp.child("tags/graph.md").path()).unwrap(),
            first_graph
        );
    }

    #[test]
    fn test_pipeline_dry_run() {
        let temp = assert_fs::TempDir::new().unwrap();
        write_problem(
            &temp,
            "one",
            "---\nid: 1\ntitle: One\ndifficulty: Easy\ntags: [array]\n---\n",
        );

        let config = Config::builder()
            .root(temp.path())
            .dry_run(true)
            .build()
            .unwrap();

        let stats = Pipeline::new(config).unwrap().run().unwrap();

        assert_eq!(stats.problems_indexed, 1);
        assert_eq!(stats.tag_files_written, 0);
        assert!(!temp.child("tags").exists());
        assert!(!temp.child("README.md").exists());
    }

    #[test]
    fn test_pipeline_empty_problems_dir() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("problems").create_dir_all().unwrap();

        let config = create_test_config(temp.path());
        let stats = Pipeline::new(config).unwrap().run().unwrap();

        assert_eq!(stats.problems_indexed, 0);
        assert_eq!(stats.tag_files_written, 0);

        let dashboard = std::fs::read_to_string(temp.child("README.md").path()).unwrap();
        assert!(dashboard.contains("| 0 | 0 | 0 | 0 |"));
    }

    #[test]
    fn test_pipeline_missing_problems_dir_is_fatal() {
        let temp = assert_fs::TempDir::new().unwrap();

        let config = Config {
            root: temp.path().to_path_buf(),
            ..Config::default()
        };

        let result = Pipeline::new(config);
        assert!(result.is_err());
    }

    #[test]
    fn test_pipeline_numeric_ordering_in_outputs() {
        let temp = assert_fs::TempDir::new().unwrap();
        write_problem(
            &temp,
            "big",
            "---\nid: 100\ntitle: Hundred\ndifficulty: Easy\ntags: [array]\n---\n",
        );
        write_problem(
            &temp,
            "small",
            "---\nid: 9\ntitle: Nine\ndifficulty: Easy\ntags: [array]\n---\n",
        );

        let config = create_test_config(temp.path());
        Pipeline::new(config).unwrap().run().unwrap();

        let page = std::fs::read_to_string(temp.child("tags/array.md").path()).unwrap();
        let nine = page.find("- [9. Nine]").unwrap();
        let hundred = page.find("- [100. Hundred]").unwrap();
        assert!(nine < hundred);
    }
}
