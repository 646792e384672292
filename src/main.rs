// src/main.rs
//
// duskfix — dark-mode class retrofitter for JSX/TSX sources
//
// - Walks the given root (or takes a single file) and rewrites matching
//   sources in place. .git, node_modules, build and dist are never entered.
// - Three passes per file, always in this order:
//     1. Token-pair rewrites: known light-mode classes gain a dark: twin.
//     2. Form controls (<input>, <textarea>, <select>) get a fixed bundle
//        of dark: tokens appended to their className.
//     3. Runs of dark: tokens stranded outside the className quotes are
//        folded back inside them.
// - Each pass skips work it has already done; a second run over a clean
//   tree writes nothing.
// - A file that cannot be read or written is reported and the batch
//   continues; the exit status is non-zero if any file failed.
//
// CLI flags:
//   --ext js,jsx   : extensions to scan (default: js,jsx,ts,tsx)
//   --dry-run      : report what would change, write nothing
//   --quiet        : totals only, no per-file detail

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};

use duskfix::report::FileChange;
use duskfix::report::Summary;
use duskfix::walk;
use duskfix::Pipeline;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory to walk, or a single file
    root: PathBuf,

    /// Comma-separated extensions to scan
    #[arg(long, value_delimiter = ',', default_value = "js,jsx,ts,tsx")]
    ext: Vec<String>,

    /// Report what would change without writing anything
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Print totals only, no per-file detail
    #[arg(long, action = ArgAction::SetTrue)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    anyhow::ensure!(
        cli.root.exists(),
        "no such file or directory: {}",
        cli.root.display()
    );

    let pipeline = Pipeline::builtin();
    let mut summary = Summary::new();

    for path in walk::collect_sources(&cli.root, &cli.ext) {
        summary.record_scanned();
        match process_file(&pipeline, &path, cli.dry_run) {
            Ok(Some(change)) => summary.record_change(change),
            Ok(None) => {}
            Err(err) => summary.record_failure(path, format!("{err:#}")),
        }
    }

    summary.print(cli.dry_run, cli.quiet);
    if summary.failed() > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Transform one file. `Ok(Some(..))` when the text changed (and, outside
/// dry-run mode, was written back).
fn process_file(
    pipeline: &Pipeline,
    path: &Path,
    dry_run: bool,
) -> anyhow::Result<Option<FileChange>> {
    let src = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let outcome = pipeline.transform(&src);
    if !outcome.changed {
        return Ok(None);
    }
    if !dry_run {
        fs::write(path, &outcome.text).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(Some(FileChange {
        path: path.to_path_buf(),
        rule_hits: outcome.rule_hits,
        bundle_hits: outcome.bundle_hits,
        repaired: outcome.repaired,
    }))
}
