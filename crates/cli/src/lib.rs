//! pakt-hook CLI library
//!
//! Standalone validation for pakt hooks: point it at a hooks directory (or a
//! single hook file) and it reports every grammar problem in every hook,
//! followed by a pass/fail summary. Transactional loads inside the package
//! manager use the same engine in fail-fast mode; this tool always
//! accumulates everything so one run produces a complete report.

pub mod logging;
pub mod report;

use anyhow::{Result, bail};
use clap::Parser;
use pakt_core::Context;
use pakt_hooks::{HookRegistry, ParseMode, loader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// pakt-hook - validate pakt transaction hooks
#[derive(Parser)]
#[command(name = "pakt-hook")]
#[command(about = "Validate pakt transaction hooks")]
#[command(version)]
#[command(long_about = "Validate pakt transaction hooks

Checks every *.hook file for grammar problems: section ordering, property
cardinality, duplicate and unknown values. Hooks are processed in the same
deterministic path order the package manager uses when running them.

With no option, the default hooks directory under the root is validated.")]
pub struct Cli {
    /// Path to the hooks directory
    #[arg(short = 'H', long, value_name = "DIR", conflicts_with = "hookfile")]
    pub hooksdir: Option<PathBuf>,

    /// Path to a single hook file
    #[arg(short = 'f', long, value_name = "FILE")]
    pub hookfile: Option<PathBuf>,

    /// Root directory the default hooks directory is resolved under
    #[arg(long, env = "PAKT_ROOTDIR", value_name = "DIR")]
    pub rootdir: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "PAKT_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Run the validation pass and return the process exit code.
///
/// # Errors
///
/// Returns an error when the hooks directory or hook file cannot be used at
/// all (missing, unreadable, wrong extension). Hooks that merely fail
/// validation are reported on stdout and turn the exit code non-zero
/// without being an error here.
pub fn run(cli: Cli) -> Result<ExitCode> {
    logging::init(cli.verbose, cli.log_file.as_deref())?;

    let registry = if let Some(hookfile) = &cli.hookfile {
        load_file(hookfile)?
    } else {
        let context = Context::new(cli.rootdir, cli.hooksdir)?;
        load_dir(&context)?
    };

    tracing::debug!(total = registry.len(), "validation pass complete");
    report::print(&registry);

    if registry.summary().failed > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn load_file(path: &Path) -> Result<HookRegistry> {
    // The extension gate comes first, before any attempt to open the file
    if !loader::has_hook_suffix(path) {
        bail!(
            "The hook file must have the '{}' extension: {}",
            loader::HOOK_SUFFIX,
            path.display()
        );
    }
    if !path.is_file() {
        bail!("'{}': No such file or directory", path.display());
    }
    Ok(HookRegistry::load_file(path, ParseMode::AccumulateAll)?)
}

fn load_dir(context: &Context) -> Result<HookRegistry> {
    let dir = &context.hooksdir;
    if !dir.is_dir() {
        bail!("'{}': No such file or directory", dir.display());
    }
    Ok(HookRegistry::load_dir(dir, ParseMode::AccumulateAll)?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["pakt-hook"]).unwrap();
        assert!(cli.hooksdir.is_none());
        assert!(cli.hookfile.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["pakt-hook", "-H", "/srv/hooks", "-v"]).unwrap();
        assert_eq!(cli.hooksdir, Some(PathBuf::from("/srv/hooks")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_hooksdir_and_hookfile_are_mutually_exclusive() {
        let result = Cli::try_parse_from(["pakt-hook", "-H", "/srv/hooks", "-f", "a.hook"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_file_rejects_wrong_extension_before_open() {
        // The file does not exist; the extension error must win
        let err = load_file(Path::new("/nonexistent/hook.conf")).unwrap_err();
        assert!(err.to_string().contains(".hook"));
        assert!(err.to_string().contains("extension"));
    }

    #[test]
    fn test_load_file_reports_missing_file() {
        let err = load_file(Path::new("/nonexistent/missing.hook")).unwrap_err();
        assert!(err.to_string().contains("No such file or directory"));
    }

    #[test]
    fn test_load_dir_reports_missing_directory() {
        let context = Context::new(Some(PathBuf::from("/nonexistent")), None).unwrap();
        let err = load_dir(&context).unwrap_err();
        assert!(err.to_string().contains("No such file or directory"));
    }

    #[test]
    fn test_load_file_validates_a_hook() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("ok.hook");
        std::fs::write(
            &path,
            "\
[TRIGGER]
OPERATION = Install
TARGET = foo
[ACTION]
DESCRIPTION = d
WHEN = PostTransaction
EXEC = /bin/true
",
        )
        .unwrap();

        let registry = load_file(&path).unwrap();
        let summary = registry.summary();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.diagnostics, 0);
    }

    #[test]
    fn test_load_dir_counts_invalid_hooks() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("bad.hook"), "[TRIGGER]\n").unwrap();

        let context = Context::new(None, Some(temp.path().to_path_buf())).unwrap();
        let registry = load_dir(&context).unwrap();
        let summary = registry.summary();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.failed, 1);
        assert!(summary.diagnostics > 0);
    }
}
