mod filter;
mod report;

use anyhow::{Context, Result};
use archscan_core::{classify_all, default_search_root, find_executables};
use clap::Parser;
use filter::BinaryTypeFilter;
use report::{Format, Report};
use std::path::PathBuf;

/// Reports the target architecture and runtime of PE files
#[derive(Parser)]
#[command(
    name = "archscan",
    about = "Check PE binaries for platform compatibility (x86, x64, AnyCPU)",
    version,
    author
)]
struct Cli {
    /// File or directory to check. Directories are searched recursively for
    /// .exe and .dll files. A relative path is taken relative to the current
    /// working directory, not to the archscan executable. Defaults to the
    /// directory containing archscan.
    path: Option<PathBuf>,

    /// Append the classification name to every line
    #[arg(short, long)]
    verbose: bool,

    /// Only show these types: `all`, a comma-separated list such as
    /// `native32,managed64`, or a numeric mask. `-f:native32` also works.
    #[arg(short, long, default_value = "all")]
    filter: BinaryTypeFilter,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Number of files classified in parallel
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("failed to start worker pool")?;
    }

    let search_path = match cli.path {
        Some(path) => path,
        None => default_search_root().context("cannot locate the archscan executable")?,
    };

    let files = find_executables(&search_path);
    log::info!("{} candidate files under {}", files.len(), search_path.display());
    let results = classify_all(&files);

    let report = Report {
        format: cli.format,
        verbose: cli.verbose,
        filter: cli.filter,
    };
    let stdout = std::io::stdout();
    report
        .write(&mut stdout.lock(), &results)
        .context("failed to write report")?;

    Ok(())
}
