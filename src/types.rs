/// Core domain types for doclinks: extracted links, resolved targets, failures.
use std::fmt;
use std::path::{Path, PathBuf};

/// A link target as written in a markdown file. Produced by the scanner and
/// consumed immediately by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// One-based line number of the link in the source file.
    pub line: u32,
    /// Target text exactly as captured, before any cleaning.
    pub raw_target: String,
    /// Markdown file containing this link.
    pub source: PathBuf,
}

/// Output of successful target resolution. `path` is absolute and free of
/// `.`/`..` components, but may not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Candidate base path on disk.
    pub path: PathBuf,
    /// Cleaned target: quotes, title, fragment and query removed.
    pub target: String,
}

impl ResolvedTarget {
    /// Whether the cleaned target explicitly names a directory.
    pub fn has_trailing_slash(&self) -> bool {
        return self.target.ends_with('/');
    }
}

/// A link whose target matched none of its candidate paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// One-based line number of the broken link.
    pub line: u32,
    /// Markdown file relative to the repository root.
    pub source: PathBuf,
    /// Cleaned target that failed to resolve.
    pub target: String,
}

impl Failure {
    /// Build a failure for `link`, expressing its source relative to `root`.
    /// Sources outside `root` keep their full path.
    pub fn new(link: &Link, target: &str, root: &Path) -> Self {
        let source = link.source.strip_prefix(root).unwrap_or(link.source.as_path()).to_path_buf();
        return Self {
            line: link.line,
            source,
            target: target.to_string(),
        };
    }
}

impl fmt::Display for Failure {
    /// `<source>:<line> -> <target>`, always with `/` separators.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self.source.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/");
        return write!(f, "{source}:{} -> {}", self.line, self.target);
    }
}
