//! Hook discovery
//!
//! Enumerates a hooks directory for `*.hook` files and returns their
//! identity records in ascending path order. The ordering is part of the
//! contract, not cosmetic: hooks reacting to the same trigger must run in a
//! stable, reproducible sequence regardless of filesystem enumeration order.

use crate::hook::HookFileRef;
use pakt_core::Result;
use std::fs;
use std::path::Path;

/// Suffix every hook file must carry.
pub const HOOK_SUFFIX: &str = ".hook";

/// Whether the file name ends in [`HOOK_SUFFIX`].
#[must_use]
pub fn has_hook_suffix(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(HOOK_SUFFIX))
}

/// Collect the hook files under `dir`, sorted ascending by full path.
///
/// Entries without the `.hook` suffix and non-files are skipped.
///
/// # Errors
///
/// Returns an error if the directory cannot be read; this is an I/O
/// failure, distinct from any validation outcome.
pub fn load_dir(dir: &Path) -> Result<Vec<HookFileRef>> {
    let mut refs: Vec<HookFileRef> = fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_hook_suffix(path))
        .map(HookFileRef::new)
        .collect();

    refs.sort_by(|a, b| a.file_path.cmp(&b.file_path));

    tracing::debug!(dir = %dir.display(), count = refs.len(), "found hook files");

    Ok(refs)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_suffix_check() {
        assert!(has_hook_suffix(Path::new("10-fonts.hook")));
        assert!(has_hook_suffix(Path::new("/etc/pakt.d/hooks/a.hook")));
        assert!(!has_hook_suffix(Path::new("10-fonts.hook~")));
        assert!(!has_hook_suffix(Path::new("notes.txt")));
        assert!(!has_hook_suffix(Path::new("hook")));
    }

    #[test]
    fn test_load_missing_directory_is_io_error() {
        let result = load_dir(Path::new("/nonexistent/pakt/hooks"));
        assert!(matches!(result, Err(pakt_core::Error::Io(_))));
    }

    #[test]
    fn test_load_empty_directory() {
        let temp = TempDir::new().unwrap();
        let refs = load_dir(temp.path()).unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_load_filters_on_suffix() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.hook"), "").unwrap();
        fs::write(temp.path().join("b.hook.bak"), "").unwrap();
        fs::write(temp.path().join("readme.md"), "").unwrap();

        let refs = load_dir(temp.path()).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].file_name, "a.hook");
    }

    #[test]
    fn test_load_skips_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub.hook")).unwrap();
        fs::write(temp.path().join("real.hook"), "").unwrap();

        let refs = load_dir(temp.path()).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].file_name, "real.hook");
    }

    #[test]
    fn test_load_sorts_by_full_path() {
        let temp = TempDir::new().unwrap();
        for name in ["30-last.hook", "10-first.hook", "20-middle.hook"] {
            fs::write(temp.path().join(name), "").unwrap();
        }

        let refs = load_dir(temp.path()).unwrap();
        let names: Vec<&str> = refs.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["10-first.hook", "20-middle.hook", "30-last.hook"]);

        let paths: Vec<&PathBuf> = refs.iter().map(|r| &r.file_path).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }
}
