use crate::{
    config::Config,
    error::{Error, Result},
    filter::DirFilter,
    frontmatter,
    problem::Problem,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Statistics collected during scanning.
#[derive(Debug, Default, Clone)]
pub(crate) struct ScanStats {
    /// Directory entries visited
    pub dirs_total: usize,

    /// Problems accepted
    pub indexed: usize,

    /// Directories excluded by glob
    pub excluded: usize,

    /// Directories without index.md or README.md
    pub no_content_file: usize,

    /// Content files without a frontmatter block
    pub no_frontmatter: usize,

    /// Frontmatter blocks missing id or title
    pub missing_fields: usize,
}

/// Scans the problems directory and collects accepted problems.
pub(crate) struct Scanner {
    problems_path: PathBuf,
    problems_prefix: String,
    dir_filter: DirFilter,
}

impl Scanner {
    /// Creates a new scanner from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob.
    pub(crate) fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            problems_path: config.problems_path(),
            problems_prefix: config.problems_dir.to_string_lossy().replace('\\', "/"),
            dir_filter: DirFilter::new(&config.exclude)?,
        })
    }

    /// Scans the immediate subdirectories of the problems root.
    ///
    /// Entries are visited in file-name order so reruns produce identical
    /// output. Directories that are not problem write-ups (no content file,
    /// no frontmatter, missing id or title) are skipped silently; read
    /// failures abort the scan.
    ///
    /// # Errors
    ///
    /// Returns an error if the problems directory cannot be read, a content
    /// file cannot be read, or a matched id cannot be parsed numerically.
    pub(crate) fn scan(&self) -> Result<Vec<Problem>> {
        let mut problems = Vec::new();
        let mut stats = ScanStats::default();

        debug!("Scanning {}", self.problems_path.display());

        let walker = WalkDir::new(&self.problems_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map_or_else(|| self.problems_path.clone(), Path::to_path_buf);
                Error::Io {
                    path,
                    message: e.to_string(),
                }
            })?;

            if !entry.file_type().is_dir() {
                trace!("Skipping non-directory entry: {}", entry.path().display());
                continue;
            }

            stats.dirs_total += 1;

            let name = entry.file_name().to_string_lossy().to_string();
            if !self.dir_filter.should_index(&name) {
                debug!("Excluded by glob: {}", name);
                stats.excluded += 1;
                continue;
            }

            if let Some(problem) = self.process_dir(entry.path(), &name, &mut stats)? {
                stats.indexed += 1;
                problems.push(problem);
            }
        }

        debug!(
            "Scan complete: {} dirs, {} indexed, {} excluded, {} without content file, \
             {} without frontmatter, {} missing id/title",
            stats.dirs_total,
            stats.indexed,
            stats.excluded,
            stats.no_content_file,
            stats.no_frontmatter,
            stats.missing_fields
        );

        if problems.is_empty() {
            warn!(
                "No problems accepted from {}",
                self.problems_path.display()
            );
        }

        Ok(problems)
    }

    /// Processes a single problem directory.
    ///
    /// Prefers `index.md`, falls back to `README.md`. Returns `Ok(None)`
    /// for the normal skip cases.
    fn process_dir(
        &self,
        dir: &Path,
        name: &str,
        stats: &mut ScanStats,
    ) -> Result<Option<Problem>> {
        let Some(content_file) = Self::locate_content_file(dir) else {
            trace!("No content file in {}", dir.display());
            stats.no_content_file += 1;
            return Ok(None);
        };

        let content = fs::read_to_string(&content_file).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                Error::invalid_utf8(&content_file)
            } else {
                Error::io(&content_file, e)
            }
        })?;

        let Some(fields) = frontmatter::extract(&content) else {
            debug!("No frontmatter block in {}", content_file.display());
            stats.no_frontmatter += 1;
            return Ok(None);
        };

        if fields.id.is_empty() || fields.title.is_empty() {
            debug!("Missing id or title in {}", content_file.display());
            stats.missing_fields += 1;
            return Ok(None);
        }

        // The id pattern only matches digit runs, so parsing can fail only
        // on overflow. Ids are assumed well-formed; a bad one is fatal.
        let number = fields
            .id
            .parse::<u64>()
            .map_err(|e| Error::invalid_id(&content_file, &fields.id, e))?;

        Ok(Some(Problem::new(
            fields.id,
            number,
            fields.title,
            fields.difficulty,
            format!("{}/{}", self.problems_prefix, name),
            fields.tags,
        )))
    }

    /// Locates the content file for a problem directory.
    fn locate_content_file(dir: &Path) -> Option<PathBuf> {
        let index = dir.join("index.md");
        if index.exists() {
            return Some(index);
        }

        let readme = dir.join("README.md");
        readme.exists().then_some(readme)
    }
}
