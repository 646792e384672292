//! Retrofit dark-mode utility classes into JSX/TSX sources.
//!
//! Three passes run over each file's text, always in the same order:
//!
//! 1. [`rules`]: rewrite known light-mode class tokens so each carries
//!    its dark-mode twin.
//! 2. [`forms`]: append a fixed dark-mode bundle to form controls
//!    (`<input`, `<textarea`, `<select`).
//! 3. [`repair`]: fold runs of `dark:` tokens stranded outside the
//!    `className` quotes by earlier rewrites back inside them.
//!
//! Every pass is text in, text out; nothing here touches the
//! filesystem. All passes skip work they have already done, so running
//! the whole pipeline twice leaves a file byte-identical to running it
//! once.

pub mod forms;
pub mod repair;
pub mod report;
pub mod rules;
pub mod walk;

pub use forms::Category;
pub use forms::CategorySet;
pub use forms::ValueShape;
pub use repair::Repairer;
pub use rules::RewriteRule;
pub use rules::RuleTable;

/// The three passes, bundled.
pub struct Pipeline {
    rules: RuleTable,
    categories: CategorySet,
    repairer: Repairer,
}

/// What one file's transformation produced.
pub struct Outcome {
    pub text: String,
    pub changed: bool,
    pub rule_hits: Vec<rules::RuleHit>,
    pub bundle_hits: Vec<forms::BundleHit>,
    pub repaired: usize,
}

impl Pipeline {
    pub fn new(rules: RuleTable, categories: CategorySet, repairer: Repairer) -> Self {
        Self {
            rules,
            categories,
            repairer,
        }
    }

    /// The production table, categories and repairer.
    pub fn builtin() -> Self {
        Self::new(RuleTable::builtin(), CategorySet::builtin(), Repairer::new())
    }

    /// Run all three passes over `text`.
    pub fn transform(&self, text: &str) -> Outcome {
        let rewritten = self.rules.apply(text);
        let augmented = self.categories.apply(&rewritten.text);
        let mended = self.repairer.apply(&augmented.text);
        Outcome {
            text: mended.text,
            changed: rewritten.changed || augmented.changed || mended.changed,
            rule_hits: rewritten.hits,
            bundle_hits: augmented.hits,
            repaired: mended.repaired,
        }
    }
}
