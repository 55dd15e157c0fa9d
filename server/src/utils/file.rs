//! Path helpers for config file lookup

use std::path::PathBuf;

/// Resolve a user-supplied config path.
///
/// `~` and `~/…` expand to the home directory; relative paths are anchored
/// at the current working directory.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();
    let cwd = || std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if path.is_empty() {
        return cwd();
    }

    let expanded = match (path, dirs::home_dir()) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    };

    if expanded.is_relative() {
        cwd().join(expanded)
    } else {
        expanded
    }
}
