//! Structural element augmenter: the second pass.
//!
//! Form controls (`<input`, `<textarea`, `<select`) get a fixed bundle of
//! dark-mode tokens appended to their `className` value. Matching is
//! anchored on the opening tag name and never crosses a `>`, so one
//! element's bundle cannot land on a neighbouring or nested element.
//! Elements whose value already carries the category marker are skipped,
//! which makes the pass safe to re-run.

use regex::Captures;
use regex::Regex;

/// Bundle for typed fields: inputs and textareas show placeholder text.
const FIELD_BUNDLE: &str =
    "dark:bg-gray-700 dark:text-white dark:border-gray-600 dark:placeholder-gray-400";

/// Bundle for option selectors; no placeholder token.
const SELECT_BUNDLE: &str = "dark:bg-gray-700 dark:text-white dark:border-gray-600";

/// Marker whose presence in a value means the bundle is already there.
const FIELD_MARKER: &str = "dark:bg";

/// Which attribute values look like a form field. All listed fragments
/// must occur in the value; an empty list accepts everything.
///
/// The detection heuristics are deliberately configurable rather than
/// baked into the match pattern: the production defaults are modest
/// (`border` for inputs and selects, nothing for textareas).
pub struct ValueShape {
    required: Vec<String>,
}

impl ValueShape {
    /// Accept any value.
    pub fn any() -> Self {
        Self {
            required: Vec::new(),
        }
    }

    /// Accept values containing every one of `fragments`.
    pub fn requiring(fragments: &[&str]) -> Self {
        Self {
            required: fragments.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn matches(&self, value: &str) -> bool {
        self.required.iter().all(|frag| value.contains(frag.as_str()))
    }
}

/// One structural element category: tag to anchor on, value precondition,
/// bundle to append, marker that means "already done".
pub struct Category {
    tag: String,
    shape: ValueShape,
    bundle: String,
    marker: String,
    pattern: Regex,
}

impl Category {
    pub fn new(tag: &str, shape: ValueShape, bundle: &str, marker: &str) -> Self {
        // `[^>]*?` keeps the scan inside this tag; `[^"]*` spans newlines,
        // so multi-line element declarations match as one unit.
        let pattern = Regex::new(&format!(
            r#"(<{}\b[^>]*?className=")([^"]*)""#,
            regex::escape(tag)
        ))
        .expect("category pattern is a valid regex");
        Self {
            tag: tag.to_string(),
            shape,
            bundle: bundle.to_string(),
            marker: marker.to_string(),
            pattern,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Append this category's bundle to every matching element. `None`
    /// when nothing was appended.
    fn apply(&self, text: &str) -> Option<(String, usize)> {
        let mut count = 0usize;
        let out = self.pattern.replace_all(text, |caps: &Captures<'_>| {
            let value = &caps[2];
            if value.contains(&self.marker) || !self.shape.matches(value) {
                caps[0].to_string()
            } else {
                count += 1;
                format!("{}{} {}\"", &caps[1], value, self.bundle)
            }
        });
        if count == 0 {
            None
        } else {
            Some((out.into_owned(), count))
        }
    }
}

/// How many elements of one category received their bundle in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleHit {
    pub tag: String,
    pub count: usize,
}

/// Result of running all categories over one file's text.
pub struct AugmentOutcome {
    pub text: String,
    pub changed: bool,
    pub hits: Vec<BundleHit>,
}

/// Ordered set of element categories, applied one after another.
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The production categories. Tags are matched case-sensitively:
    /// capitalized JSX names are user components and are never touched.
    pub fn builtin() -> Self {
        Self::new(vec![
            Category::new(
                "input",
                ValueShape::requiring(&["border"]),
                FIELD_BUNDLE,
                FIELD_MARKER,
            ),
            Category::new("textarea", ValueShape::any(), FIELD_BUNDLE, FIELD_MARKER),
            Category::new(
                "select",
                ValueShape::requiring(&["border"]),
                SELECT_BUNDLE,
                FIELD_MARKER,
            ),
        ])
    }

    pub fn apply(&self, text: &str) -> AugmentOutcome {
        let mut current: Option<String> = None;
        let mut hits = Vec::new();
        for category in &self.categories {
            let haystack = current.as_deref().unwrap_or(text);
            if let Some((next, count)) = category.apply(haystack) {
                hits.push(BundleHit {
                    tag: category.tag().to_string(),
                    count,
                });
                current = Some(next);
            }
        }
        match current {
            Some(text) => AugmentOutcome {
                text,
                changed: true,
                hits,
            },
            None => AugmentOutcome {
                text: text.to_string(),
                changed: false,
                hits,
            },
        }
    }
}
