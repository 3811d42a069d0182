//! Process context for hook operations
//!
//! Resolves the root and hooks directories once, up front, and hands them to
//! the loader and registry by reference. There is no process-wide mutable
//! state: every caller that needs the directories receives a `&Context`.

use crate::Result;
use std::env;
use std::path::PathBuf;

/// Default hooks directory, relative to the root directory.
pub const DEFAULT_HOOKS_PATH: &str = "etc/pakt.d/hooks";

/// Resolved directories for a pakt invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Root of the managed filesystem (defaults to `/`)
    pub rootdir: PathBuf,
    /// Directory scanned for `*.hook` files
    pub hooksdir: PathBuf,
}

impl Context {
    /// Resolve the context from optional overrides.
    ///
    /// The root directory defaults to `/`; a relative root is resolved
    /// against the current working directory. The hooks directory defaults
    /// to [`DEFAULT_HOOKS_PATH`] under the root; a relative override is
    /// resolved against the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the current working directory cannot be read
    /// while resolving a relative root.
    pub fn new(rootdir: Option<PathBuf>, hooksdir: Option<PathBuf>) -> Result<Self> {
        let rootdir = match rootdir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => env::current_dir()?.join(dir),
            None => PathBuf::from("/"),
        };

        let hooksdir = match hooksdir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => rootdir.join(dir),
            None => rootdir.join(DEFAULT_HOOKS_PATH),
        };

        tracing::debug!(
            rootdir = %rootdir.display(),
            hooksdir = %hooksdir.display(),
            "resolved context"
        );

        Ok(Self { rootdir, hooksdir })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_context() {
        let ctx = Context::new(None, None).unwrap();
        assert_eq!(ctx.rootdir, Path::new("/"));
        assert_eq!(ctx.hooksdir, Path::new("/").join(DEFAULT_HOOKS_PATH));
    }

    #[test]
    fn test_absolute_overrides() {
        let ctx = Context::new(
            Some(PathBuf::from("/mnt/target")),
            Some(PathBuf::from("/srv/hooks")),
        )
        .unwrap();
        assert_eq!(ctx.rootdir, Path::new("/mnt/target"));
        assert_eq!(ctx.hooksdir, Path::new("/srv/hooks"));
    }

    #[test]
    fn test_default_hooksdir_follows_rootdir() {
        let ctx = Context::new(Some(PathBuf::from("/mnt/target")), None).unwrap();
        assert_eq!(
            ctx.hooksdir,
            Path::new("/mnt/target").join(DEFAULT_HOOKS_PATH)
        );
    }

    #[test]
    fn test_relative_hooksdir_resolved_against_rootdir() {
        let ctx = Context::new(
            Some(PathBuf::from("/mnt/target")),
            Some(PathBuf::from("custom/hooks")),
        )
        .unwrap();
        assert_eq!(ctx.hooksdir, Path::new("/mnt/target/custom/hooks"));
    }

    #[test]
    fn test_relative_rootdir_resolved_against_cwd() {
        let ctx = Context::new(Some(PathBuf::from("subdir")), None).unwrap();
        assert!(ctx.rootdir.is_absolute());
        assert!(ctx.rootdir.ends_with("subdir"));
    }
}
