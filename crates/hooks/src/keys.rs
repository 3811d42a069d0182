//! Grammar keywords and cardinality rules
//!
//! One table drives everything: keyword recognition, the rank used by the
//! key-ordering rule, the occurrence limits, and the wording of the
//! `(Required, Repeatable)` clauses in diagnostics.

use crate::hook::{self, Operation, TargetKind, When};

/// A recognized key of the hook grammar
///
/// Variant order is the rank enforced by the ordering rule: within a file a
/// key may never be followed by a key of lower rank, except `[TRIGGER]`,
/// which starts a new block and resets the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HookKey {
    /// `[TRIGGER]` section marker
    Trigger,
    /// `OPERATION` property
    Operation,
    /// `TYPE` property
    Type,
    /// `TARGET` property
    Target,
    /// `[ACTION]` section marker
    Action,
    /// `DESCRIPTION` property
    Description,
    /// `WHEN` property
    When,
    /// `EXEC` property
    Exec,
    /// `ABORTONFAIL` property
    AbortOnFail,
}

impl HookKey {
    /// Every key, in rank order.
    pub const ALL: [Self; 9] = [
        Self::Trigger,
        Self::Operation,
        Self::Type,
        Self::Target,
        Self::Action,
        Self::Description,
        Self::When,
        Self::Exec,
        Self::AbortOnFail,
    ];

    /// The keyword as it appears in a hook file.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Trigger => "[TRIGGER]",
            Self::Operation => "OPERATION",
            Self::Type => "TYPE",
            Self::Target => "TARGET",
            Self::Action => "[ACTION]",
            Self::Description => "DESCRIPTION",
            Self::When => "WHEN",
            Self::Exec => "EXEC",
            Self::AbortOnFail => "ABORTONFAIL",
        }
    }

    /// Look up a key (already trimmed and upper-cased by the lexer).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.token() == token)
    }

    /// Whether the key is a section marker rather than a property.
    #[must_use]
    pub fn is_marker(self) -> bool {
        matches!(self, Self::Trigger | Self::Action)
    }

    /// How the key is named in diagnostics.
    #[must_use]
    pub fn describe(self) -> String {
        match self {
            Self::Trigger => "'[TRIGGER]' section".to_string(),
            Self::Action => "'[ACTION]' section".to_string(),
            Self::Operation => "'Operation' property".to_string(),
            Self::Type => "'Type' property".to_string(),
            Self::Target => "'Target' property".to_string(),
            Self::Description => "'Description' property".to_string(),
            Self::When => "'When' property".to_string(),
            Self::Exec => "'Exec' property".to_string(),
            Self::AbortOnFail => "'AbortOnFail' property".to_string(),
        }
    }

    /// Accepted values for enumerated properties, `None` for free-form ones.
    #[must_use]
    pub fn accepted_values(self) -> Option<String> {
        match self {
            Self::Operation => Some(Operation::accepted()),
            Self::Type => Some(TargetKind::accepted()),
            Self::When => Some(When::accepted()),
            Self::AbortOnFail => Some(hook::toggle_accepted()),
            _ => None,
        }
    }

    /// Occurrence rules for the key within one section instance.
    #[must_use]
    pub fn cardinality(self) -> Cardinality {
        match self {
            Self::Trigger => Cardinality {
                required: true,
                repeatable: true,
                max: None,
            },
            Self::Operation => Cardinality {
                required: true,
                repeatable: true,
                max: Some(Operation::ALL.len()),
            },
            Self::Type => Cardinality {
                required: false,
                repeatable: false,
                max: Some(1),
            },
            Self::Target => Cardinality {
                required: true,
                repeatable: true,
                max: None,
            },
            Self::Action => Cardinality {
                required: true,
                repeatable: false,
                max: Some(1),
            },
            Self::Description => Cardinality {
                required: true,
                repeatable: false,
                max: Some(1),
            },
            Self::When => Cardinality {
                required: true,
                repeatable: true,
                max: Some(When::ALL.len()),
            },
            Self::Exec => Cardinality {
                required: true,
                repeatable: false,
                max: Some(1),
            },
            Self::AbortOnFail => Cardinality {
                required: false,
                repeatable: false,
                max: Some(1),
            },
        }
    }
}

/// Allowed occurrence counts for a key within one section instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    /// At least one occurrence is mandatory
    pub required: bool,
    /// More than one occurrence is allowed
    pub repeatable: bool,
    /// Upper bound on occurrences, if any
    pub max: Option<usize>,
}

impl Cardinality {
    /// The `(Required, Repeatable)` clause used in diagnostics.
    #[must_use]
    pub fn clause(self) -> String {
        format!(
            "({}, {})",
            if self.required { "Required" } else { "Optional" },
            if self.repeatable {
                "Repeatable"
            } else {
                "Not Repeatable"
            }
        )
    }
}
