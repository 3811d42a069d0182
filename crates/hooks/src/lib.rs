//! Hook definition language engine for pakt
//!
//! Declarative `*.hook` files bind package-transaction events
//! (install/upgrade/remove, pre/post transaction) to shell commands. This
//! crate discovers the files, parses and validates their grammar, and
//! provides the matching and word-splitting primitives used when hooks fire.
//!
//! ## Loading model
//!
//! - Discovery returns files in ascending path order; hooks reacting to the
//!   same trigger always run in a stable, reproducible sequence
//! - Grammar problems never abort a load: each file yields a [`Hook`] whose
//!   diagnostics describe what is wrong with it
//! - Transactional loads stop at the first problem per file
//!   ([`ParseMode::FailFast`]); the standalone validator collects everything
//!   ([`ParseMode::AccumulateAll`])
//!
//! ## Module organization
//!
//! - `hook`: the parsed data model (`Hook`, `Trigger`, `Diagnostic`)
//! - `keys`: grammar keywords, ranks, and cardinality rules
//! - `parse`: the line-oriented grammar parser
//! - `loader`: `*.hook` discovery with deterministic ordering
//! - `registry`: whole-directory and single-file loading
//! - `tokenize`: `EXEC` command-line splitting
//! - `matcher`: negatable glob matching for trigger targets

pub mod hook;
pub mod keys;
pub mod loader;
pub mod matcher;
pub mod parse;
pub mod registry;
pub mod tokenize;

// Re-export main types for convenience
pub use hook::{Diagnostic, Hook, HookFileRef, Operation, TargetKind, Trigger, When};
pub use parse::ParseMode;
pub use registry::{HookRegistry, Summary};

// Re-export error types from core
pub use pakt_core::{Error, Result};
