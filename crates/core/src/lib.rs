//! Core types and utilities for pakt
//!
//! This is the foundation crate that all other pakt crates depend on.
//! It provides:
//! - Base error types
//! - The process [`Context`] (root and hooks directory resolution)
//!
//! This crate has no dependencies on other pakt crates.

pub mod context;
pub mod error;

pub use context::Context;
pub use error::{Error, Result};
