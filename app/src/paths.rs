//! Home-directory expansion for path arguments.

use std::path::{Path, PathBuf};

/// Expand a leading `~/` (or a bare `~`) to the current user's home directory.
///
/// Anything else, including `~user/...`, is returned unchanged, as is the
/// input when no home directory can be determined.
pub fn expand_home(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let rest = if trimmed == "~" {
        ""
    } else if let Some(rest) = trimmed.strip_prefix("~/") {
        rest
    } else {
        return PathBuf::from(raw);
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

/// [`expand_home`] for paths that came in as `PathBuf`.
pub fn expand_home_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(raw) => expand_home(raw),
        None => path.to_path_buf(),
    }
}
