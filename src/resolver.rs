//! Turns raw link targets into filesystem paths and checks them against disk.

use std::path::{Component, Path, PathBuf};

use crate::filter::TargetFilter;
use crate::types::{Link, ResolvedTarget};

/// Strip decoration from a raw target: surrounding quotes, a trailing title,
/// then the fragment and the query (fragment first).
pub fn clean_target(raw: &str) -> String {
    let mut target = raw.trim();

    if is_wrapped_in(target, '"') || is_wrapped_in(target, '\'') {
        target = target.get(1..target.len().saturating_sub(1)).unwrap_or("").trim();
    }

    if target.contains(' ') {
        target = target.split_whitespace().next().unwrap_or("");
    }

    let without_fragment = target.split('#').next().unwrap_or("");
    let without_query = without_fragment.split('?').next().unwrap_or("");
    return without_query.trim().to_string();
}

/// Whether `text` starts and ends with `quote`. A lone quote counts and cleans to empty.
fn is_wrapped_in(text: &str, quote: char) -> bool {
    return text.starts_with(quote) && text.ends_with(quote);
}

/// Resolve a link to the path it points at, or `None` if the target is not checkable.
///
/// Targets starting with `/` resolve against `docs_root`; everything else
/// resolves against the directory of the file containing the link.
pub fn resolve(link: &Link, docs_root: &Path, filter: &TargetFilter) -> Option<ResolvedTarget> {
    let raw = link.raw_target.trim();
    if filter.should_skip(raw) {
        tracing::debug!(link_target = raw, line = link.line, "skipped");
        return None;
    }

    let target = clean_target(raw);
    if filter.should_skip(&target) {
        tracing::debug!(link_target = raw, line = link.line, "skipped after cleaning");
        return None;
    }

    let joined = match target.strip_prefix('/') {
        Some(root_relative) => docs_root.join(root_relative.trim_start_matches('/')),
        None => link.source.parent().unwrap_or_else(|| return Path::new("")).join(&target),
    };

    return Some(ResolvedTarget {
        path: normalize_path(&joined),
        target,
    });
}

/// Paths that would satisfy a link. A trailing slash means the author named a
/// directory, so the literal path is not enough on its own.
pub fn candidates(path: &Path, trailing_slash: bool) -> Vec<PathBuf> {
    if trailing_slash {
        return vec![path.join("index.md"), path.with_extension("md")];
    }
    return vec![path.to_path_buf(), path.with_extension("md"), path.join("index.md")];
}

/// True if any candidate for `resolved` exists on disk (file or directory).
pub fn target_exists(resolved: &ResolvedTarget) -> bool {
    let paths = candidates(&resolved.path, resolved.has_trailing_slash());
    tracing::debug!(link_target = %resolved.target, candidates = ?paths, "checking");
    return paths.iter().any(|p| return p.exists());
}

/// Collapse `.` and `..` components in a path without touching the filesystem.
/// `..` never climbs above a root; in a relative path a leading `..` is kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        push_normalized_component(&mut components, component);
    }
    return components.iter().collect();
}

/// Handle a single path component during normalization.
fn push_normalized_component<'a>(components: &mut Vec<Component<'a>>, component: Component<'a>) {
    match component {
        Component::CurDir => {},
        Component::ParentDir => match components.last() {
            Some(Component::Normal(_)) => {
                components.pop();
            },
            Some(Component::RootDir | Component::Prefix(_)) => {},
            Some(Component::CurDir | Component::ParentDir) | None => components.push(component),
        },
        other => components.push(other),
    }
    return;
}
