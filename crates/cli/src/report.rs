//! Validation report output
//!
//! Per-hook PASS/FAIL lines with their diagnostics, then a closing summary.
//! Exit codes are decided by the caller; this module only prints.

use owo_colors::OwoColorize;
use pakt_hooks::HookRegistry;

const RULE: &str = "------------------------------------------------------";

/// Print the per-hook results and the closing summary.
pub fn print(registry: &HookRegistry) {
    if registry.is_empty() {
        println!("{}", "No hooks found.".yellow());
    } else {
        println!("\n[*] Validating pakt hooks\n");

        for hook in registry.hooks() {
            let verdict = if hook.valid {
                "[ PASSED ]".green().to_string()
            } else {
                "[ FAILED ]".red().to_string()
            };
            println!("==> {} : {}", hook.file.file_name.bold(), verdict);

            if !hook.valid {
                println!("{} errors found\n", hook.diagnostics.len());
                for diagnostic in &hook.diagnostics {
                    println!(":: {diagnostic}");
                }
            }
            println!("{RULE}");
        }
    }

    let summary = registry.summary();
    println!("\n{}\n", "Summary".bold());
    println!("Total hooks = {}", summary.total);
    println!("Total passed = {}", summary.passed);
    println!("Total failed = {}", summary.failed);
    println!("Total errors = {}", summary.diagnostics);

    if summary.diagnostics > 0 {
        println!(
            "\n{}",
            "Please consult the documentation to fix them".yellow()
        );
    }
}
