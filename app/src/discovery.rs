//! Input discovery: explicit file lists and recursive directory walks.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::AppError;
use crate::paths::expand_home;

/// Image extensions picked up when walking a directory.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["gif", "png", "jpg", "jpeg", "bmp"];

/// Split a comma-separated list into paths, skipping blank entries.
pub fn parse_input_list(list: &str) -> Vec<PathBuf> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(expand_home)
        .collect()
}

/// Whether `path` has one of the supported image extensions (case-insensitive).
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect every supported image below `dir`, in file-name order.
pub fn walk_input_dir(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    if !dir.is_dir() {
        return Err(AppError::InputNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|source| AppError::DirectoryWalk {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_supported(entry.path()) {
            files.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "Skipping non-image entry");
        }
    }
    Ok(files)
}

/// Resolve the full ordered input list: explicit files first, then the
/// directory walk. Duplicates are kept.
pub fn discover_inputs(list: Option<&str>, dir: Option<&Path>) -> Result<Vec<PathBuf>, AppError> {
    let mut files = list.map(parse_input_list).unwrap_or_default();
    if let Some(dir) = dir {
        files.extend(walk_input_dir(dir)?);
    }

    if files.is_empty() {
        return Err(AppError::NoInputs);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn list_skips_blank_entries_and_keeps_order() {
        let files = parse_input_list("b.png, ,a.jpg,,b.png,");
        assert_eq!(
            files,
            vec![
                PathBuf::from("b.png"),
                PathBuf::from("a.jpg"),
                PathBuf::from("b.png"),
            ]
        );
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_supported(Path::new("scan.PNG")));
        assert!(is_supported(Path::new("dir/photo.JpEg")));
        assert!(is_supported(Path::new("anim.gif")));
        assert!(is_supported(Path::new("old.bmp")));
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("tiff.tif")));
        assert!(!is_supported(Path::new("png")));
    }

    #[test]
    fn walk_is_recursive_and_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(&root.join("b.png"));
        touch(&root.join("a.JPG"));
        touch(&root.join("notes.txt"));
        touch(&root.join("nested/deeper/c.bmp"));

        let files = walk_input_dir(root).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png", "nested/deeper/c.bmp"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = walk_input_dir(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, AppError::InputNotFound(_)));
    }

    #[test]
    fn explicit_files_come_before_directory_entries() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("dir/z.png"));

        let files = discover_inputs(Some("first.png"), Some(&tmp.path().join("dir"))).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], PathBuf::from("first.png"));
        assert!(files[1].ends_with("z.png"));
    }

    #[test]
    fn nothing_resolved_is_an_error() {
        assert!(matches!(
            discover_inputs(Some(" , "), None),
            Err(AppError::NoInputs)
        ));
        assert!(matches!(discover_inputs(None, None), Err(AppError::NoInputs)));

        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("readme.md"));
        assert!(matches!(
            discover_inputs(None, Some(tmp.path())),
            Err(AppError::NoInputs)
        ));
    }
}
