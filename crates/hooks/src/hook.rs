//! Hook data model
//!
//! The owned tree produced by the parser: one [`Hook`] per file, holding its
//! [`Trigger`]s and any [`Diagnostic`]s. Value enums carry their canonical
//! spellings in one place so the validator and its error text cannot drift
//! apart.

use crate::tokenize::{self, SplitError};
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

/// Identity of a hook file discovered on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookFileRef {
    /// Base name, e.g. `10-ldconfig.hook`
    pub file_name: String,
    /// Full path used for ordering and for opening the file
    pub file_path: PathBuf,
}

impl HookFileRef {
    /// Build a reference from a full path.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file_name,
            file_path,
        }
    }
}

/// One validation problem found while parsing a hook file
///
/// Diagnostics are append-only; their insertion order is the reporting
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-indexed line the problem was found on, `None` for file-level checks
    pub line: Option<usize>,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn new(line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Error occurred at line : {line}\n{}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Package-transaction operations a trigger can react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// A package is being installed
    Install,
    /// A package is being upgraded
    Upgrade,
    /// A package is being removed
    Remove,
}

impl Operation {
    /// Every operation, in canonical order.
    pub const ALL: [Self; 3] = [Self::Install, Self::Upgrade, Self::Remove];

    /// Canonical spelling, as documented to hook authors.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Install => "Install",
            Self::Upgrade => "Upgrade",
            Self::Remove => "Remove",
        }
    }

    /// Case-insensitive lookup of a property value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.as_str().eq_ignore_ascii_case(value))
    }

    /// The `Install|Upgrade|Remove` list used in diagnostics.
    #[must_use]
    pub fn accepted() -> String {
        Self::ALL.map(Self::as_str).join("|")
    }
}

/// What a trigger's targets name: package names or filesystem paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Targets are matched against package names
    Package,
    /// Targets are matched against installed file paths
    Path,
}

impl TargetKind {
    /// Every target kind, in canonical order.
    pub const ALL: [Self; 2] = [Self::Package, Self::Path];

    /// Canonical spelling, as documented to hook authors.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Package => "Package",
            Self::Path => "Path",
        }
    }

    /// Case-insensitive lookup of a property value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
    }

    /// The `Package|Path` list used in diagnostics.
    #[must_use]
    pub fn accepted() -> String {
        Self::ALL.map(Self::as_str).join("|")
    }
}

/// Transaction phases a hook can run at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    /// Before the transaction touches the filesystem
    PreTransaction,
    /// After the transaction completed
    PostTransaction,
}

impl When {
    /// Every phase, in canonical order.
    pub const ALL: [Self; 2] = [Self::PreTransaction, Self::PostTransaction];

    /// Canonical spelling, as documented to hook authors.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreTransaction => "PreTransaction",
            Self::PostTransaction => "PostTransaction",
        }
    }

    /// Case-insensitive lookup of a property value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|when| when.as_str().eq_ignore_ascii_case(value))
    }

    /// The `PreTransaction|PostTransaction` list used in diagnostics.
    #[must_use]
    pub fn accepted() -> String {
        Self::ALL.map(Self::as_str).join("|")
    }
}

/// Name table for the `ABORTONFAIL` toggle, shared by the parser and the
/// accepted-values clause of its diagnostics.
const TOGGLE_NAMES: [(&str, bool); 2] = [("False", false), ("True", true)];

/// Case-insensitive lookup of an `ABORTONFAIL` value.
pub(crate) fn parse_toggle(value: &str) -> Option<bool> {
    TOGGLE_NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, toggled)| *toggled)
}

/// The `False|True` list used in diagnostics.
pub(crate) fn toggle_accepted() -> String {
    TOGGLE_NAMES.map(|(name, _)| name).join("|")
}

/// One `[TRIGGER]` block of a hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Operations the trigger reacts to (1..=3, no duplicates)
    pub operations: Vec<Operation>,
    /// Whether targets name packages or paths; matching callers decide the
    /// default when absent
    pub kind: Option<TargetKind>,
    /// Glob patterns, case preserved, optionally `!`-negated (>=1)
    pub targets: Vec<String>,
}

impl Trigger {
    /// Whether this trigger fires for the given operation and candidate
    /// (a package name or file path, depending on [`Trigger::kind`]).
    ///
    /// Negated targets are excluders: a candidate caught by any `!` pattern
    /// never fires, otherwise at least one plain pattern must match. A
    /// trigger with only negated targets fires for everything they let
    /// through.
    #[must_use]
    pub fn matches(&self, operation: Operation, candidate: &str) -> bool {
        if !self.operations.contains(&operation) {
            return false;
        }

        let mut has_plain = false;
        let mut plain_matched = false;
        for pattern in &self.targets {
            if pattern.starts_with('!') {
                if !crate::matcher::matches_target(pattern, candidate) {
                    return false;
                }
            } else {
                has_plain = true;
                plain_matched |= crate::matcher::matches_target(pattern, candidate);
            }
        }
        !has_plain || plain_matched
    }
}

/// A fully parsed hook file, valid or not
///
/// The tree owns all of its data and carries no back-references; dropping a
/// hook releases everything at once. `valid == diagnostics.is_empty()` holds
/// after every parse pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hook {
    /// Where the hook came from
    pub file: HookFileRef,
    /// The `[TRIGGER]` blocks, in file order (>=1)
    pub triggers: Vec<Trigger>,
    /// Short description, capped at 70 characters by the parser
    pub description: String,
    /// Transaction phases the hook runs at (1..=2, no duplicates)
    pub when: Vec<When>,
    /// The raw command line; split with [`Hook::exec_words`] at run time
    pub exec: String,
    /// Abort the whole transaction when the command fails (default `false`)
    pub abort_on_fail: bool,
    /// Whether the file passed validation
    pub valid: bool,
    /// Everything wrong with the file, in discovery order
    pub diagnostics: Vec<Diagnostic>,
}

impl Hook {
    /// Whether the hook runs at the given transaction phase.
    #[must_use]
    pub fn runs_at(&self, when: When) -> bool {
        self.when.contains(&when)
    }

    /// Whether any trigger fires for the operation/candidate pair.
    #[must_use]
    pub fn triggered_by(&self, operation: Operation, candidate: &str) -> bool {
        self.triggers
            .iter()
            .any(|trigger| trigger.matches(operation, candidate))
    }

    /// Split the `EXEC` command into argv-style words.
    ///
    /// Evaluated lazily at execution time; a malformed command line is an
    /// execution failure, never a parse diagnostic.
    ///
    /// # Errors
    ///
    /// Returns an error if the command contains an unterminated quote.
    pub fn exec_words(&self) -> Result<Vec<Cow<'_, str>>, SplitError> {
        tokenize::split(&self.exec)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_file_ref_splits_name_from_path() {
        let file = HookFileRef::new(PathBuf::from("/etc/pakt.d/hooks/10-fonts.hook"));
        assert_eq!(file.file_name, "10-fonts.hook");
        assert_eq!(
            file.file_path,
            PathBuf::from("/etc/pakt.d/hooks/10-fonts.hook")
        );
    }

    #[test]
    fn test_diagnostic_display_with_line() {
        let diagnostic = Diagnostic::new(Some(4), "The 'Operation' property is required!");
        assert_eq!(
            diagnostic.to_string(),
            "Error occurred at line : 4\nThe 'Operation' property is required!"
        );
    }

    #[test]
    fn test_diagnostic_display_file_level() {
        let diagnostic = Diagnostic::new(None, "The '[ACTION]' section is required!");
        assert_eq!(diagnostic.to_string(), "The '[ACTION]' section is required!");
    }

    #[test]
    fn test_operation_round_trip() {
        for operation in Operation::ALL {
            assert_eq!(Operation::parse(operation.as_str()), Some(operation));
        }
        assert_eq!(Operation::parse("INSTALL"), Some(Operation::Install));
        assert_eq!(Operation::parse("upgrade"), Some(Operation::Upgrade));
        assert_eq!(Operation::parse("Reinstall"), None);
    }

    #[test]
    fn test_accepted_lists_match_tables() {
        assert_eq!(Operation::accepted(), "Install|Upgrade|Remove");
        assert_eq!(TargetKind::accepted(), "Package|Path");
        assert_eq!(When::accepted(), "PreTransaction|PostTransaction");
        assert_eq!(toggle_accepted(), "False|True");
    }

    #[test]
    fn test_toggle_parse() {
        assert_eq!(parse_toggle("True"), Some(true));
        assert_eq!(parse_toggle("FALSE"), Some(false));
        assert_eq!(parse_toggle("yes"), None);
    }

    #[test]
    fn test_trigger_matches_operation_and_target() {
        let trigger = Trigger {
            operations: vec![Operation::Install, Operation::Upgrade],
            kind: Some(TargetKind::Package),
            targets: vec!["linux*".to_string()],
        };

        assert!(trigger.matches(Operation::Install, "linux-firmware"));
        assert!(trigger.matches(Operation::Upgrade, "linux"));
        assert!(!trigger.matches(Operation::Remove, "linux"));
        assert!(!trigger.matches(Operation::Install, "musl"));
    }

    #[test]
    fn test_trigger_negated_target() {
        let trigger = Trigger {
            operations: vec![Operation::Remove],
            kind: Some(TargetKind::Package),
            targets: vec!["!linux*".to_string()],
        };

        assert!(trigger.matches(Operation::Remove, "musl"));
        assert!(!trigger.matches(Operation::Remove, "linux-firmware"));
    }

    #[test]
    fn test_trigger_negated_target_excludes_plain_matches() {
        let trigger = Trigger {
            operations: vec![Operation::Remove],
            kind: Some(TargetKind::Package),
            targets: vec!["linux*".to_string(), "!linux-headers*".to_string()],
        };

        assert!(trigger.matches(Operation::Remove, "linux6.12"));
        assert!(!trigger.matches(Operation::Remove, "linux-headers6.12"));
        assert!(!trigger.matches(Operation::Remove, "musl"));
    }
}
