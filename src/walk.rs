//! Source discovery: which files under a root get transformed.

use std::path::Path;
use std::path::PathBuf;

use walkdir::DirEntry;
use walkdir::WalkDir;

/// Extensions scanned when the user does not narrow the set.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Directories that never contain hand-written sources.
fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && matches!(
            entry.file_name().to_str(),
            Some(".git") | Some("node_modules") | Some("build") | Some("dist")
        )
}

fn has_wanted_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// Collect the files to process, sorted for stable output.
///
/// A `root` naming a single file is taken as-is, whatever its extension:
/// the user pointed at it on purpose. Unreadable directory entries are
/// skipped; read errors on the files themselves surface later, when the
/// driver opens them.
pub fn collect_sources(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }
    let mut sources: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_wanted_extension(path, extensions))
        .collect();
    sources.sort();
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn default_extensions() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn only_wanted_extensions_and_sorted() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("src/b.jsx"));
        touch(&dir.path().join("src/a.tsx"));
        touch(&dir.path().join("src/styles.css"));
        touch(&dir.path().join("README.md"));

        let found = collect_sources(dir.path(), &default_extensions());
        assert_eq!(
            found,
            vec![dir.path().join("src/a.tsx"), dir.path().join("src/b.jsx")]
        );
    }

    #[test]
    fn vendored_and_generated_trees_are_skipped() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("node_modules/pkg/index.js"));
        touch(&dir.path().join(".git/hooks/pre-commit.js"));
        touch(&dir.path().join("build/bundle.js"));
        touch(&dir.path().join("dist/app.js"));
        touch(&dir.path().join("src/app.js"));

        let found = collect_sources(dir.path(), &default_extensions());
        assert_eq!(found, vec![dir.path().join("src/app.js")]);
    }

    #[test]
    fn explicit_file_is_taken_as_is() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        touch(&file);

        let found = collect_sources(&file, &default_extensions());
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn extension_match_ignores_case() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("src/App.JSX"));

        let found = collect_sources(dir.path(), &default_extensions());
        assert_eq!(found, vec![dir.path().join("src/App.JSX")]);
    }

    #[test]
    fn narrowed_extension_set_is_honored() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("src/a.jsx"));
        touch(&dir.path().join("src/b.ts"));

        let found = collect_sources(dir.path(), &["jsx".to_string()]);
        assert_eq!(found, vec![dir.path().join("src/a.jsx")]);
    }
}
