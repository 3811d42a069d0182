//! Hook file parsing
//!
//! Line-oriented, stateful parser for the hook grammar. Each file yields one
//! [`Hook`]; grammar problems become [`Diagnostic`]s inside the hook instead
//! of failing the parse, and only an unreadable file is an actual error.
//!
//! The grammar is driven by two rules layered on top of the lexer:
//!
//! - **Ordering**: recognized keys must appear in non-decreasing rank order
//!   (see [`HookKey`]); `[TRIGGER]` resets the ordering and opens a new
//!   trigger block, and must be the first key of the file
//! - **Cardinality**: every key has per-section occurrence limits and the
//!   multi-valued ones reject duplicate values

use crate::hook::{self, Diagnostic, Hook, HookFileRef, Operation, TargetKind, Trigger, When};
use crate::keys::HookKey;
use pakt_core::Result;
use std::fs;

/// Diagnostic accumulation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Stop at the first diagnostic. Used for transactional loads, where
    /// only the first problem per hook is surfaced to the user.
    FailFast,
    /// Walk the whole file and collect every diagnostic. Used by the
    /// standalone validator so one pass produces a complete report.
    AccumulateAll,
}

/// Descriptions longer than this are truncated.
const DESCRIPTION_MAX: usize = 70;
/// Characters kept from an over-long description before the ellipsis.
const DESCRIPTION_KEEP: usize = 67;

/// Parse one hook file from disk.
///
/// # Errors
///
/// Returns an error only when the file cannot be opened or read; grammar
/// problems are recorded in the returned hook's diagnostics.
pub fn parse_file(file: &HookFileRef, mode: ParseMode) -> Result<Hook> {
    let text = match fs::read_to_string(&file.file_path) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(
                file = %file.file_path.display(),
                "unable to open hook file: {err}"
            );
            return Err(err.into());
        }
    };
    Ok(parse_str(file.clone(), &text, mode))
}

/// Parse hook text that is already in memory.
#[must_use]
pub fn parse_str(file: HookFileRef, text: &str, mode: ParseMode) -> Hook {
    let mut parser = Parser::new(mode);
    for (index, raw) in text.lines().enumerate() {
        if parser.halted {
            break;
        }
        parser.line(index + 1, raw);
    }
    parser.finish();
    parser.into_hook(file)
}

/// Mutable state of one `[TRIGGER]` block while it is open
struct TriggerState {
    /// Line of the opening `[TRIGGER]` (or of the first stray property)
    line: usize,
    operation_count: usize,
    type_count: usize,
    target_count: usize,
    operations: Vec<Operation>,
    kind: Option<TargetKind>,
    targets: Vec<String>,
}

impl TriggerState {
    fn new(line: usize) -> Self {
        Self {
            line,
            operation_count: 0,
            type_count: 0,
            target_count: 0,
            operations: Vec::new(),
            kind: None,
            targets: Vec::new(),
        }
    }

    fn into_trigger(self) -> Trigger {
        Trigger {
            operations: self.operations,
            kind: self.kind,
            targets: self.targets,
        }
    }
}

struct Parser {
    mode: ParseMode,
    halted: bool,
    diagnostics: Vec<Diagnostic>,
    prev_key: Option<HookKey>,
    saw_trigger: bool,
    current: Option<TriggerState>,
    triggers: Vec<Trigger>,
    action_line: Option<usize>,
    action_count: usize,
    description_count: usize,
    when_count: usize,
    exec_count: usize,
    abort_count: usize,
    description: Option<String>,
    whens: Vec<When>,
    exec: Option<String>,
    abort_on_fail: Option<bool>,
}

impl Parser {
    fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            halted: false,
            diagnostics: Vec::new(),
            prev_key: None,
            saw_trigger: false,
            current: None,
            triggers: Vec::new(),
            action_line: None,
            action_count: 0,
            description_count: 0,
            when_count: 0,
            exec_count: 0,
            abort_count: 0,
            description: None,
            whens: Vec::new(),
            exec: None,
            abort_on_fail: None,
        }
    }

    /// Record a diagnostic, halting the parse in fail-fast mode.
    fn report(&mut self, line: Option<usize>, message: impl Into<String>) {
        if self.halted {
            return;
        }
        self.diagnostics.push(Diagnostic::new(line, message));
        if self.mode == ParseMode::FailFast {
            self.halted = true;
        }
    }

    fn line(&mut self, lineno: usize, raw: &str) {
        if raw.is_empty() || raw.starts_with('#') {
            return;
        }
        // Sections and properties must start at column 0; this also covers
        // whitespace-only lines.
        if raw.starts_with(char::is_whitespace) {
            self.report(
                Some(lineno),
                "Invalid character at the beginning of the line!",
            );
            return;
        }

        let (key_part, value) = match raw.split_once('=') {
            Some((key_part, value)) => (key_part, Some(value.trim())),
            None => (raw, None),
        };
        let token = key_part.trim().to_uppercase();

        let Some(key) = HookKey::from_token(&token) else {
            self.report(Some(lineno), format!("The '{token}' data is not valid!"));
            return;
        };

        self.check_order(lineno, key);
        if self.halted {
            return;
        }

        match key {
            HookKey::Trigger => self.open_trigger(lineno),
            HookKey::Action => self.open_action(lineno),
            _ => self.property(lineno, key, value),
        }
    }

    /// Enforce the non-decreasing rank rule. `[TRIGGER]` always resets.
    fn check_order(&mut self, lineno: usize, key: HookKey) {
        if key == HookKey::Trigger {
            self.prev_key = Some(key);
            return;
        }
        match self.prev_key {
            None => {
                self.report(
                    Some(lineno),
                    "Incorrect position for the '[TRIGGER]' section! \
                     Please move it to the beginning of the file",
                );
                self.prev_key = Some(key);
            }
            Some(prev) if key < prev => {
                self.report(
                    Some(lineno),
                    format!(
                        "Incorrect position for the {}! Please move it after the {}",
                        prev.describe(),
                        key.describe()
                    ),
                );
            }
            Some(_) => self.prev_key = Some(key),
        }
    }

    fn open_trigger(&mut self, lineno: usize) {
        self.saw_trigger = true;
        self.close_trigger();
        self.current = Some(TriggerState::new(lineno));
    }

    /// Check and flush the open trigger block, if any.
    fn close_trigger(&mut self) {
        let Some(state) = self.current.take() else {
            return;
        };
        if state.operation_count == 0 {
            self.report(Some(state.line), required_message(HookKey::Operation));
        }
        if state.target_count == 0 {
            self.report(Some(state.line), required_message(HookKey::Target));
        }
        self.triggers.push(state.into_trigger());
    }

    fn open_action(&mut self, lineno: usize) {
        self.action_count += 1;
        if over_limit(HookKey::Action, self.action_count) {
            self.report(Some(lineno), occurrence_message(HookKey::Action));
            return;
        }
        self.action_line = Some(lineno);
    }

    fn property(&mut self, lineno: usize, key: HookKey, value: Option<&str>) {
        let value = value.unwrap_or_default();
        if value.is_empty() {
            self.report(Some(lineno), missing_value_message(key));
            return;
        }
        match key {
            HookKey::Operation => self.add_operation(lineno, value),
            HookKey::Type => self.set_kind(lineno, value),
            HookKey::Target => self.add_target(lineno, value),
            HookKey::Description => self.set_description(lineno, value),
            HookKey::When => self.add_when(lineno, value),
            HookKey::Exec => self.set_exec(lineno, value),
            HookKey::AbortOnFail => self.set_abort_on_fail(lineno, value),
            // Markers are handled before this point
            HookKey::Trigger | HookKey::Action => {}
        }
    }

    /// The open trigger block, or an implicit one when the file put trigger
    /// properties before any `[TRIGGER]` (the ordering diagnostic has
    /// already been reported; the walk keeps collecting).
    fn take_trigger(&mut self, lineno: usize) -> TriggerState {
        match self.current.take() {
            Some(state) => state,
            None => {
                self.saw_trigger = true;
                TriggerState::new(lineno)
            }
        }
    }

    fn add_operation(&mut self, lineno: usize, value: &str) {
        let mut state = self.take_trigger(lineno);
        state.operation_count += 1;
        if over_limit(HookKey::Operation, state.operation_count) {
            self.report(Some(lineno), occurrence_message(HookKey::Operation));
        } else {
            match Operation::parse(value) {
                None => self.report(Some(lineno), value_message(HookKey::Operation)),
                Some(operation) => {
                    if state.operations.contains(&operation) {
                        self.report(Some(lineno), duplicate_message(HookKey::Operation));
                    } else {
                        state.operations.push(operation);
                    }
                }
            }
        }
        self.current = Some(state);
    }

    fn set_kind(&mut self, lineno: usize, value: &str) {
        let mut state = self.take_trigger(lineno);
        state.type_count += 1;
        if over_limit(HookKey::Type, state.type_count) {
            self.report(Some(lineno), occurrence_message(HookKey::Type));
        } else {
            match TargetKind::parse(value) {
                None => self.report(Some(lineno), value_message(HookKey::Type)),
                Some(kind) => state.kind = Some(kind),
            }
        }
        self.current = Some(state);
    }

    fn add_target(&mut self, lineno: usize, value: &str) {
        let mut state = self.take_trigger(lineno);
        state.target_count += 1;
        // Targets are free-form globs, case preserved; duplicates are exact
        // literal matches.
        if state.targets.iter().any(|target| target == value) {
            self.report(Some(lineno), duplicate_message(HookKey::Target));
        } else {
            state.targets.push(value.to_string());
        }
        self.current = Some(state);
    }

    fn set_description(&mut self, lineno: usize, value: &str) {
        self.description_count += 1;
        if over_limit(HookKey::Description, self.description_count) {
            self.report(Some(lineno), occurrence_message(HookKey::Description));
            return;
        }
        self.description = Some(truncate_description(value));
    }

    fn add_when(&mut self, lineno: usize, value: &str) {
        self.when_count += 1;
        if over_limit(HookKey::When, self.when_count) {
            self.report(Some(lineno), occurrence_message(HookKey::When));
            return;
        }
        match When::parse(value) {
            None => self.report(Some(lineno), value_message(HookKey::When)),
            Some(when) => {
                if self.whens.contains(&when) {
                    self.report(Some(lineno), duplicate_message(HookKey::When));
                } else {
                    self.whens.push(when);
                }
            }
        }
    }

    fn set_exec(&mut self, lineno: usize, value: &str) {
        self.exec_count += 1;
        if over_limit(HookKey::Exec, self.exec_count) {
            self.report(Some(lineno), occurrence_message(HookKey::Exec));
            return;
        }
        self.exec = Some(value.to_string());
    }

    fn set_abort_on_fail(&mut self, lineno: usize, value: &str) {
        self.abort_count += 1;
        if over_limit(HookKey::AbortOnFail, self.abort_count) {
            self.report(Some(lineno), occurrence_message(HookKey::AbortOnFail));
            return;
        }
        match hook::parse_toggle(value) {
            None => self.report(Some(lineno), value_message(HookKey::AbortOnFail)),
            Some(toggled) => self.abort_on_fail = Some(toggled),
        }
    }

    /// End-of-file checks: trigger boundary, mandatory action properties.
    fn finish(&mut self) {
        self.close_trigger();
        if !self.saw_trigger {
            self.report(None, required_message(HookKey::Trigger));
        }
        if self.action_count == 0 {
            self.report(None, required_message(HookKey::Action));
        }
        let action_line = self.action_line;
        if self.description_count == 0 {
            self.report(action_line, required_message(HookKey::Description));
        }
        if self.when_count == 0 {
            self.report(action_line, required_message(HookKey::When));
        }
        if self.exec_count == 0 {
            self.report(action_line, required_message(HookKey::Exec));
        }
    }

    fn into_hook(self, file: HookFileRef) -> Hook {
        let valid = self.diagnostics.is_empty();
        Hook {
            file,
            triggers: self.triggers,
            description: self.description.unwrap_or_default(),
            when: self.whens,
            exec: self.exec.unwrap_or_default(),
            abort_on_fail: self.abort_on_fail.unwrap_or(false),
            valid,
            diagnostics: self.diagnostics,
        }
    }
}

fn over_limit(key: HookKey, count: usize) -> bool {
    key.cardinality().max.is_some_and(|max| count > max)
}

fn occurrence_message(key: HookKey) -> String {
    let accepted = key
        .accepted_values()
        .map(|values| format!("The accepted values are <{values}>. "))
        .unwrap_or_default();
    format!(
        "An incorrect occurrences number for the {}! {}{}",
        key.describe(),
        accepted,
        key.cardinality().clause()
    )
}

fn value_message(key: HookKey) -> String {
    let accepted = key.accepted_values().unwrap_or_default();
    format!(
        "An incorrect value for the {}! The accepted values are <{accepted}>",
        key.describe()
    )
}

fn duplicate_message(key: HookKey) -> String {
    format!("Duplicate value for the {}!", key.describe())
}

fn required_message(key: HookKey) -> String {
    format!("The {} is required!", key.describe())
}

fn missing_value_message(key: HookKey) -> String {
    format!("Missing value for the {}!", key.describe())
}

fn truncate_description(value: &str) -> String {
    if value.chars().count() <= DESCRIPTION_MAX {
        value.to_string()
    } else {
        let mut truncated: String = value.chars().take(DESCRIPTION_KEEP).collect();
        truncated.push_str("...");
        truncated
    }
}
