//! Hook registry
//!
//! Orchestrates a load cycle: discovers hook files, parses each one with the
//! mode the caller needs ([`ParseMode::FailFast`] for transactional loads,
//! [`ParseMode::AccumulateAll`] for the standalone validator), and
//! aggregates the outcome. Grammar problems never abort a load; only I/O
//! failures do.

use crate::hook::{Hook, HookFileRef, When};
use crate::loader;
use crate::parse::{self, ParseMode};
use pakt_core::{Error, Result};
use rayon::prelude::*;
use std::path::Path;

/// All hooks loaded during one pass, in path order
#[derive(Debug, Default)]
pub struct HookRegistry {
    hooks: Vec<Hook>,
}

/// Aggregated pass/fail counts for a load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Hooks processed
    pub total: usize,
    /// Hooks that validated cleanly
    pub passed: usize,
    /// Hooks with at least one diagnostic
    pub failed: usize,
    /// Diagnostics across all hooks
    pub diagnostics: usize,
}

impl HookRegistry {
    /// Load every `*.hook` file in `dir`.
    ///
    /// Files are parsed independently after a sequential sort, so the result
    /// is identical to a sequential pass; the fan-out is only a speed-up.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or any hook file cannot be read.
    pub fn load_dir(dir: &Path, mode: ParseMode) -> Result<Self> {
        let mut refs = loader::load_dir(dir)?;
        // The loader already sorts; resorting keeps the ordering guarantee
        // local to this function.
        refs.sort_by(|a, b| a.file_path.cmp(&b.file_path));

        let hooks = refs
            .par_iter()
            .map(|file| parse::parse_file(file, mode))
            .collect::<Result<Vec<_>>>()?;

        let registry = Self { hooks };
        registry.log_invalid(mode);
        Ok(registry)
    }

    /// Load a single hook file, which must carry the `.hook` extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or the file cannot be
    /// read.
    pub fn load_file(path: &Path, mode: ParseMode) -> Result<Self> {
        if !loader::has_hook_suffix(path) {
            return Err(Error::NotAHookFile {
                path: path.to_path_buf(),
            });
        }

        let file = HookFileRef::new(path.to_path_buf());
        let hooks = vec![parse::parse_file(&file, mode)?];

        let registry = Self { hooks };
        registry.log_invalid(mode);
        Ok(registry)
    }

    /// On transactional loads only the first problem per hook is surfaced,
    /// as a warning; the standalone validator prints full reports itself.
    fn log_invalid(&self, mode: ParseMode) {
        if mode != ParseMode::FailFast {
            return;
        }
        for hook in self.hooks.iter().filter(|hook| !hook.valid) {
            if let Some(diagnostic) = hook.diagnostics.first() {
                tracing::warn!(file = %hook.file.file_name, "invalid hook: {diagnostic}");
            }
        }
    }

    /// The loaded hooks, in path order.
    #[must_use]
    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    /// Whether the load produced no hooks at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Number of loaded hooks, valid or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Valid hooks that run at the given transaction phase, in path order.
    pub fn hooks_at(&self, when: When) -> impl Iterator<Item = &Hook> {
        self.hooks
            .iter()
            .filter(move |hook| hook.valid && hook.runs_at(when))
    }

    /// Aggregate counts for reporting.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let passed = self.hooks.iter().filter(|hook| hook.valid).count();
        let diagnostics = self.hooks.iter().map(|hook| hook.diagnostics.len()).sum();
        Summary {
            total: self.hooks.len(),
            passed,
            failed: self.hooks.len() - passed,
            diagnostics,
        }
    }
}
