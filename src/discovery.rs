//! Discovery of tree documents on disk.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::AstJsonError;

/// File name suffix of tree documents written by the front end.
pub const DOCUMENT_SUFFIX: &str = ".ast.json";

/// Recursively collects every tree document under `root`.
///
/// The returned list is sorted so batch runs are deterministic.
pub fn discover_documents<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, AstJsonError> {
    let root = root.as_ref();
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| AstJsonError::Walk {
            root: root.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() || !is_document(entry.path()) {
            continue;
        }

        files.push(entry.path().to_path_buf());
    }
    files.sort();
    Ok(files)
}

/// Whether `path` names a tree document.
pub fn is_document(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.len() > DOCUMENT_SUFFIX.len() && name.ends_with(DOCUMENT_SUFFIX))
}

/// The output file stem for a document: `user.rb.ast.json` becomes `user.rb`.
pub fn output_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(DOCUMENT_SUFFIX) {
        Some(stem) => stem.to_string(),
        None => name,
    }
}

/// Where the converted form of `document` goes: its path relative to `root`,
/// mirrored under `out_dir`, with the document suffix swapped for `extension`.
///
/// `root/a/user.rb.ast.json` becomes `out_dir/a/user.rb.<extension>`.
pub fn output_path(root: &Path, document: &Path, out_dir: &Path, extension: &str) -> PathBuf {
    let relative = document.strip_prefix(root).unwrap_or(document);
    let file_name = format!("{}.{extension}", output_stem(document));
    match relative.parent() {
        Some(parent) => out_dir.join(parent).join(file_name),
        None => out_dir.join(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_document() {
        assert!(is_document(Path::new("a/user.rb.ast.json")));
        assert!(!is_document(Path::new("a/user.rb")));
        assert!(!is_document(Path::new("a/user.json")));
        assert!(!is_document(Path::new(".ast.json")));
    }

    #[test]
    fn test_output_stem() {
        assert_eq!(output_stem(Path::new("dir/user.rb.ast.json")), "user.rb");
        assert_eq!(output_stem(Path::new("plain.json")), "plain.json");
    }

    #[test]
    fn test_output_path_mirrors_subdirectories() {
        let root = Path::new("in");
        let out = Path::new("out");
        assert_eq!(
            output_path(root, Path::new("in/a/user.rb.ast.json"), out, "json"),
            PathBuf::from("out/a/user.rb.json")
        );
        assert_eq!(
            output_path(root, Path::new("in/b/user.rb.ast.json"), out, "yaml"),
            PathBuf::from("out/b/user.rb.yaml")
        );
        assert_eq!(
            output_path(root, Path::new("in/top.rb.ast.json"), out, "json"),
            PathBuf::from("out/top.rb.json")
        );
    }

    #[test]
    fn test_discover_is_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.rb.ast.json"), "{}").unwrap();
        fs::write(dir.path().join("nested/a.rb.ast.json"), "{}").unwrap();
        fs::write(dir.path().join("ignored.rb"), "").unwrap();

        let found = discover_documents(dir.path()).unwrap();
        assert_eq!(
            found,
            vec![
                dir.path().join("b.rb.ast.json"),
                dir.path().join("nested/a.rb.ast.json"),
            ]
        );
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_documents(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, AstJsonError::Walk { .. }));
    }
}
