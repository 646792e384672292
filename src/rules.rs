//! Token-pair rewriter: the first pass.
//!
//! An ordered table of (base, augmented) literal class-list fragments. Every
//! occurrence of a base fragment is replaced by its augmented form, rules in
//! table order, each rule exhausted before the next. A guard skips
//! occurrences whose surrounding attribute value already carries a `dark:`
//! token, so running the table over its own output changes nothing.
//!
//! Rules never fail: a base with zero occurrences, or an empty base, is a
//! no-op.

use memchr::memchr;
use memchr::memmem;

/// Marker prefix of an alternate-mode token.
const MARKER: &str = "dark:";

/// Forward guard window, in bytes, from the end of a match to the value's
/// closing quote. A value whose closing quote is further away than this is
/// treated as unaugmented.
const GUARD_WINDOW: usize = 200;

/// Reporting labels are the base pattern cut to this many bytes.
const LABEL_LEN: usize = 40;

/// One base → augmented substitution. The augmented text is the base plus
/// appended `dark:` tokens; a base ending in the value's closing quote has
/// that quote displaced to the end of the augmented form.
pub struct RewriteRule {
    base: String,
    augmented: String,
}

impl RewriteRule {
    pub fn new(base: impl Into<String>, augmented: impl Into<String>) -> Self {
        let base = base.into();
        let augmented = augmented.into();
        debug_assert!(!base.is_empty(), "rewrite rule with empty base");
        // Containment is checked on the token content only: a quote-anchored
        // base is never a plain substring of its augmented form.
        debug_assert!(
            augmented.contains(base.trim_end_matches('"')),
            "augmented pattern must contain its base: {base:?}"
        );
        Self { base, augmented }
    }

    /// Human-readable label for reports: the base pattern, truncated.
    pub fn label(&self) -> &str {
        let mut end = self.base.len().min(LABEL_LEN);
        while !self.base.is_char_boundary(end) {
            end -= 1;
        }
        &self.base[..end]
    }
}

/// How often one rule fired in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub label: String,
    pub count: usize,
}

/// Result of running a whole table over one file's text.
pub struct RewriteOutcome {
    pub text: String,
    pub changed: bool,
    pub hits: Vec<RuleHit>,
}

/// Ordered, immutable substitution table. Built once, passed into the
/// rewriter; tests use small synthetic tables instead of the builtin one.
pub struct RuleTable {
    rules: Vec<RewriteRule>,
}

impl RuleTable {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            rules: pairs
                .iter()
                .map(|&(base, augmented)| RewriteRule::new(base, augmented))
                .collect(),
        }
    }

    /// The production table. Exact-match anchors (base ending in `"`) are
    /// listed separately from their trailing-space variants: substring
    /// containment alone cannot tell `="bg-white"` from `="bg-white more…"`.
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_PAIRS)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule, in table order, to `text`.
    pub fn apply(&self, text: &str) -> RewriteOutcome {
        let mut current: Option<String> = None;
        let mut hits = Vec::new();
        for rule in &self.rules {
            let haystack = current.as_deref().unwrap_or(text);
            if let Some((next, count)) = apply_rule(haystack, rule) {
                hits.push(RuleHit {
                    label: rule.label().to_string(),
                    count,
                });
                current = Some(next);
            }
        }
        match current {
            Some(text) => RewriteOutcome {
                text,
                changed: true,
                hits,
            },
            None => RewriteOutcome {
                text: text.to_string(),
                changed: false,
                hits,
            },
        }
    }
}

/// Replace all unguarded occurrences of one rule's base. `None` when the
/// text comes back unchanged.
fn apply_rule(text: &str, rule: &RewriteRule) -> Option<(String, usize)> {
    if rule.base.is_empty() {
        return None;
    }
    let finder = memmem::Finder::new(rule.base.as_bytes());
    let bytes = text.as_bytes();

    let mut out: Option<String> = None;
    let mut copied = 0usize;
    let mut count = 0usize;
    let mut at = 0usize;

    while let Some(off) = finder.find(&bytes[at..]) {
        let pos = at + off;
        let end = pos + rule.base.len();
        if guard_skips(bytes, pos, end) {
            at = end;
            continue;
        }
        let out = out.get_or_insert_with(|| String::with_capacity(text.len() + 64));
        out.push_str(&text[copied..pos]);
        out.push_str(&rule.augmented);
        copied = end;
        at = end;
        count += 1;
    }

    let mut out = out?;
    out.push_str(&text[copied..]);
    Some((out, count))
}

/// True when the occurrence at `pos..end` must be left alone.
///
/// Two checks. First, the match may itself sit inside an existing `dark:`
/// token (`placeholder-gray-400` inside `dark:placeholder-gray-400`):
/// walk back over class-token bytes and test for the marker. Second, the
/// rest of the attribute value, up to the next `"` and at most
/// `GUARD_WINDOW` bytes away, may already carry a marker from an earlier
/// run or a hand edit.
fn guard_skips(bytes: &[u8], pos: usize, end: usize) -> bool {
    let mut start = pos;
    while start > 0 && is_token_byte(bytes[start - 1]) {
        start -= 1;
    }
    if bytes[start..pos].starts_with(MARKER.as_bytes()) {
        return true;
    }

    let window_end = (end + GUARD_WINDOW).min(bytes.len());
    let window = &bytes[end..window_end];
    let value_len = memchr(b'"', window).unwrap_or(window.len());
    memmem::find(&window[..value_len], MARKER.as_bytes()).is_some()
}

/// Bytes that can appear inside a utility-class token.
#[inline]
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(b, b'-' | b'_' | b':' | b'/' | b'.' | b'%' | b'[' | b']' | b'#')
}

/// Base → augmented pairs ported from the batch retrofit table, in original
/// order. Trailing-space and closing-quote variants are separate entries.
const BUILTIN_PAIRS: &[(&str, &str)] = &[
    // Backgrounds
    (
        r#"className="bg-white "#,
        r#"className="bg-white dark:bg-gray-800 "#,
    ),
    (
        r#"className="bg-white""#,
        r#"className="bg-white dark:bg-gray-800""#,
    ),
    (
        r#"className="bg-gray-50 "#,
        r#"className="bg-gray-50 dark:bg-gray-900 "#,
    ),
    (
        r#"className="bg-gray-50""#,
        r#"className="bg-gray-50 dark:bg-gray-900""#,
    ),
    (
        r#"className="bg-gray-100 "#,
        r#"className="bg-gray-100 dark:bg-gray-700 "#,
    ),
    (
        r#"className="bg-gray-100""#,
        r#"className="bg-gray-100 dark:bg-gray-700""#,
    ),
    (
        r#"className="bg-blue-50 "#,
        r#"className="bg-blue-50 dark:bg-blue-900/20 "#,
    ),
    (
        r#"className="bg-blue-50""#,
        r#"className="bg-blue-50 dark:bg-blue-900/20""#,
    ),
    (
        r#"className="bg-green-50 "#,
        r#"className="bg-green-50 dark:bg-green-900/20 "#,
    ),
    (
        r#"className="bg-red-50 "#,
        r#"className="bg-red-50 dark:bg-red-900/20 "#,
    ),
    (
        r#"className="bg-yellow-50 "#,
        r#"className="bg-yellow-50 dark:bg-yellow-900/20 "#,
    ),
    // Text colors
    (
        r#"className="text-gray-900 "#,
        r#"className="text-gray-900 dark:text-white "#,
    ),
    (
        r#"className="text-gray-900""#,
        r#"className="text-gray-900 dark:text-white""#,
    ),
    (
        r#"className="text-gray-800 "#,
        r#"className="text-gray-800 dark:text-gray-100 "#,
    ),
    (
        r#"className="text-gray-800""#,
        r#"className="text-gray-800 dark:text-gray-100""#,
    ),
    (
        r#"className="text-gray-700 "#,
        r#"className="text-gray-700 dark:text-gray-200 "#,
    ),
    (
        r#"className="text-gray-700""#,
        r#"className="text-gray-700 dark:text-gray-200""#,
    ),
    (
        r#"className="text-gray-600 "#,
        r#"className="text-gray-600 dark:text-gray-300 "#,
    ),
    (
        r#"className="text-gray-600""#,
        r#"className="text-gray-600 dark:text-gray-300""#,
    ),
    (
        r#"className="text-gray-500 "#,
        r#"className="text-gray-500 dark:text-gray-400 "#,
    ),
    (
        r#"className="text-gray-500""#,
        r#"className="text-gray-500 dark:text-gray-400""#,
    ),
    (
        r#"className="text-gray-400 "#,
        r#"className="text-gray-400 dark:text-gray-500 "#,
    ),
    // Borders
    (
        r#"className="border-gray-200 "#,
        r#"className="border-gray-200 dark:border-gray-700 "#,
    ),
    (
        r#"className="border-gray-200""#,
        r#"className="border-gray-200 dark:border-gray-700""#,
    ),
    (
        r#"className="border-gray-300 "#,
        r#"className="border-gray-300 dark:border-gray-600 "#,
    ),
    (
        r#"className="border-gray-300""#,
        r#"className="border-gray-300 dark:border-gray-600""#,
    ),
    (
        "border border-gray-200",
        "border border-gray-200 dark:border-gray-700",
    ),
    (
        "border border-gray-300",
        "border border-gray-300 dark:border-gray-600",
    ),
    (
        "border-b border-gray-200",
        "border-b border-gray-200 dark:border-gray-700",
    ),
    (
        "border-t border-gray-200",
        "border-t border-gray-200 dark:border-gray-700",
    ),
    // Dividers
    ("divide-gray-200", "divide-gray-200 dark:divide-gray-700"),
    // Hover states
    ("hover:bg-gray-50", "hover:bg-gray-50 dark:hover:bg-gray-700"),
    (
        "hover:bg-gray-100",
        "hover:bg-gray-100 dark:hover:bg-gray-600",
    ),
    // Shadows
    ("shadow-sm", "shadow-sm dark:shadow-gray-900/50"),
    ("shadow-md", "shadow-md dark:shadow-gray-900/50"),
    ("shadow-lg", "shadow-lg dark:shadow-gray-900/50"),
    ("shadow-xl", "shadow-xl dark:shadow-gray-900/50"),
    // Rings (focus states)
    ("ring-gray-300", "ring-gray-300 dark:ring-gray-600"),
    (
        "focus:ring-primary-500",
        "focus:ring-primary-500 dark:focus:ring-primary-400",
    ),
    // Placeholders
    (
        "placeholder-gray-400",
        "placeholder-gray-400 dark:placeholder-gray-500",
    ),
    (
        "placeholder:text-gray-400",
        "placeholder:text-gray-400 dark:placeholder:text-gray-500",
    ),
];
