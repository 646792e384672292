//! Run summary printed after a batch.

use std::path::PathBuf;

use crate::forms::BundleHit;
use crate::rules::RuleHit;

const BANNER: &str =
    "============================================================";

/// Rule detail lines shown per file before folding the rest into one line.
const MAX_RULE_LINES: usize = 5;

/// Everything one changed file contributed to the run.
pub struct FileChange {
    pub path: PathBuf,
    pub rule_hits: Vec<RuleHit>,
    pub bundle_hits: Vec<BundleHit>,
    pub repaired: usize,
}

pub struct Failure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Default)]
pub struct Summary {
    scanned: usize,
    changes: Vec<FileChange>,
    failures: Vec<Failure>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_scanned(&mut self) {
        self.scanned += 1;
    }

    pub fn record_change(&mut self, change: FileChange) {
        self.changes.push(change);
    }

    pub fn record_failure(&mut self, path: PathBuf, error: String) {
        self.failures.push(Failure { path, error });
    }

    pub fn scanned(&self) -> usize {
        self.scanned
    }

    pub fn changed(&self) -> usize {
        self.changes.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Print the run report: per-file detail first (suppressed under
    /// `quiet`), then the banner summary. Failures always reach stderr.
    pub fn print(&self, dry_run: bool, quiet: bool) {
        if !quiet {
            for change in &self.changes {
                println!("{}", change.path.display());
                for hit in change.rule_hits.iter().take(MAX_RULE_LINES) {
                    println!("  - {}: {} replacement(s)", hit.label, hit.count);
                }
                if change.rule_hits.len() > MAX_RULE_LINES {
                    println!(
                        "  - ({} more rules)",
                        change.rule_hits.len() - MAX_RULE_LINES
                    );
                }
                for hit in &change.bundle_hits {
                    println!(
                        "  - <{}> bundle applied to {} element(s)",
                        hit.tag, hit.count
                    );
                }
                if change.repaired > 0 {
                    println!(
                        "  - repaired {} malformed className attribute(s)",
                        change.repaired
                    );
                }
                println!();
            }
        }

        println!("{BANNER}");
        if dry_run {
            println!("DARK MODE RETROFIT (dry run, nothing written)");
        } else {
            println!("DARK MODE RETROFIT");
        }
        println!("{BANNER}");
        println!("Files scanned: {}", self.scanned);
        println!("Files changed: {}", self.changes.len());
        if !self.failures.is_empty() {
            eprintln!("{} file(s) could not be processed:", self.failures.len());
            for failure in &self.failures {
                eprintln!("  {}: {}", failure.path.display(), failure.error);
            }
        }
        println!("{BANNER}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_track_records() {
        let mut summary = Summary::new();
        summary.record_scanned();
        summary.record_scanned();
        summary.record_scanned();
        summary.record_change(FileChange {
            path: PathBuf::from("src/App.jsx"),
            rule_hits: Vec::new(),
            bundle_hits: Vec::new(),
            repaired: 0,
        });
        summary.record_failure(PathBuf::from("src/bad.js"), "not utf-8".to_string());

        assert_eq!(summary.scanned(), 3);
        assert_eq!(summary.changed(), 1);
        assert_eq!(summary.failed(), 1);
    }

    #[test]
    fn fresh_summary_is_empty() {
        let summary = Summary::new();
        assert_eq!(summary.scanned(), 0);
        assert_eq!(summary.changed(), 0);
        assert_eq!(summary.failed(), 0);
    }
}
