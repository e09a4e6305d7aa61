//! The `check` driver: scan the documentation tree and collect broken links.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::Config;
use crate::diagnostics;
use crate::error::Error;
use crate::resolver;
use crate::scanner;
use crate::types::Failure;

/// Inputs to a check run, as given on the command line.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Documentation directory override, relative to `root`.
    pub docs: Option<PathBuf>,
    /// Repository root. Failures are reported relative to it.
    pub root: PathBuf,
}

/// Outcome of scanning a whole documentation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Documentation directory as configured, relative to the repository root.
    pub docs_dir: PathBuf,
    /// Broken links in scan order: files sorted by path, then by line.
    pub failures: Vec<Failure>,
    /// Markdown files scanned.
    pub files_scanned: usize,
    /// Links that survived the skip filter and were checked on disk.
    pub links_checked: usize,
}

impl CheckReport {
    /// True when no broken link was found.
    pub fn is_clean(&self) -> bool {
        return self.failures.is_empty();
    }
}

/// Scan every markdown file under the documentation root and check its links.
///
/// # Errors
///
/// Returns `Error::DocsRootNotFound` if the documentation root is not a directory,
/// `Error::TomlDe`/`Error::InvalidScheme` for a bad config, or `Error::Io` if
/// the repository root or a markdown file cannot be read.
pub fn check(options: &CheckOptions) -> Result<CheckReport, Error> {
    let config = Config::load(&options.root)?;
    let docs_dir = config.docs_dir(options.docs.as_deref());

    let docs_candidate = options.root.join(&docs_dir);
    if !docs_candidate.is_dir() {
        return Err(Error::DocsRootNotFound { path: docs_dir });
    }

    let root = std::fs::canonicalize(&options.root)?;
    let docs_root = resolver::normalize_path(&root.join(&docs_dir));
    let filter = config.target_filter()?;

    let files = scanner::markdown_files(&docs_root, &config);
    let mut failures = Vec::new();
    let mut links_checked = 0_usize;

    for file in &files {
        let bytes = std::fs::read(file)?;
        let content = String::from_utf8_lossy(&bytes);
        let links = scanner::extract_links(&content, file);
        tracing::info!(file = %file.display(), links = links.len(), "scanned");

        for link in &links {
            let Some(resolved) = resolver::resolve(link, &docs_root, &filter) else {
                continue;
            };
            links_checked = links_checked.saturating_add(1);
            if !resolver::target_exists(&resolved) {
                failures.push(Failure::new(link, &resolved.target, &root));
            }
        }
    }

    return Ok(CheckReport {
        docs_dir,
        failures,
        files_scanned: files.len(),
        links_checked,
    });
}

/// Run a check and print its report. Exit 0 when clean, 1 otherwise.
///
/// # Errors
///
/// Returns any error from `check`; nothing is printed in that case.
pub fn run(options: &CheckOptions) -> Result<ExitCode, Error> {
    let report = check(options)?;
    tracing::info!(
        files = report.files_scanned,
        links = report.links_checked,
        broken = report.failures.len(),
        "check complete"
    );
    diagnostics::print_report(&report);
    if report.is_clean() {
        return Ok(ExitCode::SUCCESS);
    }
    return Ok(ExitCode::FAILURE);
}
