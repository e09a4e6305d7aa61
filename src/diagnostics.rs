use std::fmt::Write as _;
use std::io::IsTerminal as _;
use std::path::Path;

use crate::commands::CheckReport;
use crate::types::Failure;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Heading printed above the list of broken links.
pub const FAILURE_HEADER: &str = "Broken internal links detected:";

/// Print a report: confirmation to stdout when clean, failure list to stderr otherwise.
pub fn print_report(report: &CheckReport) {
    if report.is_clean() {
        println!("{}", render_success(&report.docs_dir));
        return;
    }

    let bold = std::io::stderr().is_terminal();
    for line in render_failures(&report.failures).lines() {
        if bold && line == FAILURE_HEADER {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
    return;
}

/// One-line confirmation naming the tree that was checked.
pub fn render_success(docs_dir: &Path) -> String {
    let docs = docs_dir.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/");
    return format!("OK: no broken internal links ({docs}/**/*.md)");
}

/// Header followed by one `- <source>:<line> -> <target>` line per failure.
pub fn render_failures(failures: &[Failure]) -> String {
    let mut out = format!("{FAILURE_HEADER}\n");
    for failure in failures {
        let _ = writeln!(out, "- {failure}");
    }
    return out;
}
