use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tagdex::{Config, Pipeline};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "tagdex",
    version,
    about = "Regenerate per-tag indexes and a dashboard from markdown problem write-ups",
    long_about = "Regenerate per-tag indexes and a dashboard from markdown problem write-ups.\n\n\
    This tool scans the immediate subdirectories of a problems directory, extracts \
    id/title/difficulty/tags from each write-up's frontmatter, and rewrites one markdown \
    page per tag plus a summary dashboard. Write-ups without frontmatter are skipped.\n\n\
    USAGE EXAMPLES:\n  \
      # Regenerate problems/ -> tags/ + README.md in the current directory\n  \
      tagdex\n\n  \
      # Run against a different repository root\n  \
      tagdex --root ./my-solutions\n\n  \
      # Skip draft directories and preview without writing\n  \
      tagdex --exclude 'draft-*' --dry-run\n\n  \
      # Custom dashboard title and a run-summary JSON\n  \
      tagdex --title 'My Puzzles' --stats stats.json"
)]
struct Cli {
    /// Root directory containing the problems directory
    #[arg(short, long, default_value = ".", value_name = "PATH")]
    root: PathBuf,

    /// Directory of problem write-ups, relative to the root
    #[arg(long, default_value = "problems", value_name = "PATH")]
    problems: PathBuf,

    /// Output directory for per-tag pages, relative to the root
    #[arg(long, default_value = "tags", value_name = "PATH")]
    tags: PathBuf,

    /// Dashboard output file, relative to the root
    #[arg(short = 'o', long, default_value = "README.md", value_name = "FILE")]
    dashboard: PathBuf,

    /// Dashboard title heading
    #[arg(long, default_value = "🚀 Problem Index")]
    title: String,

    /// Glob pattern for problem directories to skip (can be used multiple times)
    #[arg(long = "exclude", value_name = "GLOB")]
    exclude: Vec<String>,

    /// Write a run-summary JSON to this file, relative to the root
    #[arg(long, value_name = "FILE")]
    stats: Option<PathBuf>,

    /// Back up existing output files before overwriting
    #[arg(long)]
    backup: bool,

    /// Dry run (don't write files)
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose)?;

    let mut builder = Config::builder()
        .root(cli.root)
        .problems_dir(cli.problems)
        .tags_dir(cli.tags)
        .dashboard(cli.dashboard)
        .title(cli.title)
        .exclude(cli.exclude)
        .backup_existing(cli.backup)
        .dry_run(cli.dry_run);

    if let Some(stats) = cli.stats {
        builder = builder.stats_path(stats);
    }

    let config = builder.build().context("Failed to build configuration")?;

    let stats = Pipeline::new(config)
        .context("Failed to create pipeline")?
        .run()
        .context("Index regeneration failed")?;

    stats.print_summary();

    Ok(())
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("tagdex=warn"),
        1 => EnvFilter::new("tagdex=info"),
        2 => EnvFilter::new("tagdex=debug"),
        _ => EnvFilter::new("tagdex=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();

    Ok(())
}
