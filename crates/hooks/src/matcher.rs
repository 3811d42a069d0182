//! Target pattern matching
//!
//! Hook targets are shell-style globs, optionally negated with a leading
//! `!`. Matching is evaluated at hook-execution time against package names
//! or file paths and is infallible: a pattern the engine cannot compile
//! simply does not match.

/// Match a (possibly `!`-negated) glob pattern against a candidate string.
///
/// The match is full-string: `foo*` matches `foobar`, but `foo` does not.
/// Wildcards `*` and `?` and bracket classes are supported by the engine.
#[must_use]
pub fn matches_target(pattern: &str, candidate: &str) -> bool {
    let (pattern, negate) = match pattern.strip_prefix('!') {
        Some(stripped) => (stripped, true),
        None => (pattern, false),
    };

    let matched = glob::Pattern::new(pattern)
        .map(|pattern| pattern.matches(candidate))
        .unwrap_or(false);

    negate != matched
}
