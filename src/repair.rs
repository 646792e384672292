//! Malformed-attribute repair: the third pass.
//!
//! Earlier rewrites occasionally left a run of dark-mode tokens stranded
//! between `className=` and the opening quote:
//!
//! ```text
//! className= dark:bg-gray-700 dark:text-white"w-full px-4"
//! ```
//!
//! This pass folds the stranded run back inside the quotes, after the
//! original value. Only runs made purely of `dark:`-prefixed tokens are
//! recognized; anything else outside the quotes is left exactly as found.

use regex::Captures;
use regex::Regex;

pub struct Repairer {
    pattern: Regex,
}

impl Default for Repairer {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of running the repairer over one file's text.
pub struct RepairOutcome {
    pub text: String,
    pub changed: bool,
    pub repaired: usize,
}

impl Repairer {
    pub fn new() -> Self {
        // Every stranded token must start with `dark:`; a run with any
        // other word in it is ambiguous and is deliberately not matched.
        let pattern = Regex::new(
            r#"className=\s*(dark:[^"\s]+(?:\s+dark:[^"\s]+)*)\s*"([^"]*)""#,
        )
        .expect("repair pattern is a valid regex");
        Self { pattern }
    }

    pub fn apply(&self, text: &str) -> RepairOutcome {
        let mut repaired = 0usize;
        let out = self.pattern.replace_all(text, |caps: &Captures<'_>| {
            repaired += 1;
            let run = &caps[1];
            let base = &caps[2];
            if base.is_empty() {
                format!(r#"className="{run}""#)
            } else {
                format!(r#"className="{base} {run}""#)
            }
        });
        if repaired == 0 {
            RepairOutcome {
                text: text.to_string(),
                changed: false,
                repaired,
            }
        } else {
            RepairOutcome {
                text: out.into_owned(),
                changed: true,
                repaired,
            }
        }
    }
}
