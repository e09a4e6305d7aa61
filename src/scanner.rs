use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::config::Config;
use crate::types::Link;

/// `[text](target)` and `![alt](target)`, any number per line.
static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"!?\[[^\]]*\]\(([^)]+)\)").expect("valid regex");
});

/// `[label]: target` reference definitions, anchored at line start.
static REFERENCE_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^\s*\[([^\]]+)\]:\s*(\S+)").expect("valid regex");
});

/// Opening or closing line of a fenced code block.
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^\s*```").expect("valid regex");
});

/// Find all markdown files under `docs_root`, sorted by path.
/// Applies the config's include/exclude filters relative to `docs_root`.
/// Entries the walker cannot read are logged and skipped.
pub fn markdown_files(docs_root: &Path, config: &Config) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(docs_root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            },
        };
        if !entry.path().is_file() || entry.path().extension().is_none_or(|ext| return ext != "md") {
            continue;
        }

        let relative = entry.path().strip_prefix(docs_root).unwrap_or(entry.path());
        if !config.should_scan(&relative.to_string_lossy()) {
            tracing::debug!(file = %relative.display(), "excluded by config");
            continue;
        }
        files.push(entry.into_path());
    }

    files.sort();
    return files;
}

/// Extract every link target from markdown `content` outside fenced code blocks.
/// Inline links on a line come before that line's reference definition.
pub fn extract_links(content: &str, source: &Path) -> Vec<Link> {
    let mut links = Vec::new();
    let mut in_fence = false;

    for (line_number, line) in (1_u32..).zip(split_lines(content)) {
        if FENCE.is_match(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        extract_links_from_line(line, line_number, source, &mut links);
    }

    return links;
}

/// Split `content` into lines on every Unicode line boundary: `\n`, `\r\n`,
/// a lone `\r`, vertical tab, form feed, the ASCII separators `\x1c`..`\x1e`,
/// NEL, U+2028 and U+2029. A final terminator does not start an empty line.
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0_usize;
    let mut chars = content.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_boundary(ch) {
            continue;
        }
        lines.push(content.get(start..idx).unwrap_or(""));
        let mut end = idx.saturating_add(ch.len_utf8());
        if ch == '\r' && chars.peek().is_some_and(|&(_, next)| return next == '\n') {
            chars.next();
            end = end.saturating_add(1);
        }
        start = end;
    }

    if start < content.len() {
        lines.push(content.get(start..).unwrap_or(""));
    }
    return lines;
}

/// Characters that end a line.
const fn is_line_boundary(ch: char) -> bool {
    return matches!(
        ch,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    );
}

/// Extract links from a single non-fenced markdown line.
fn extract_links_from_line(line: &str, line_number: u32, source: &Path, links: &mut Vec<Link>) {
    for cap in INLINE_LINK.captures_iter(line) {
        links.push(Link {
            line: line_number,
            raw_target: cap[1].to_string(),
            source: source.to_path_buf(),
        });
    }

    if let Some(cap) = REFERENCE_DEFINITION.captures(line) {
        links.push(Link {
            line: line_number,
            raw_target: cap[2].to_string(),
            source: source.to_path_buf(),
        });
    }
    return;
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;

    fn targets(content: &str) -> Vec<(u32, String)> {
        return extract_links(content, Path::new("docs/a.md"))
            .into_iter()
            .map(|l| return (l.line, l.raw_target))
            .collect();
    }

    #[test]
    fn inline_links_and_images() {
        let found = targets("See [guide](guide.md) and ![logo](img/logo.png).\n");
        assert_eq!(found, vec![(1, "guide.md".to_string()), (1, "img/logo.png".to_string())]);
    }

    #[test]
    fn line_numbers_are_one_based() {
        let found = targets("# Title\n\ntext\n[x](x.md)\n");
        assert_eq!(found, vec![(4, "x.md".to_string())]);
    }

    #[test]
    fn reference_definitions() {
        let found = targets("[guide]: ./guide.md \"Guide\"\n  [api]:   /api/\n");
        assert_eq!(found, vec![(1, "./guide.md".to_string()), (2, "/api/".to_string())]);
    }

    #[test]
    fn reference_definition_must_start_the_line() {
        let found = targets("text [label]: nowhere.md\n");
        assert!(found.is_empty());
    }

    #[test]
    fn fenced_code_is_ignored() {
        let content = "before [a](a.md)\n```\n[fake](nowhere.md)\n[ref]: nowhere.md\n```\nafter [b](b.md)\n";
        let found = targets(content);
        assert_eq!(found, vec![(1, "a.md".to_string()), (6, "b.md".to_string())]);
    }

    #[test]
    fn indented_fence_with_language_tag() {
        let content = "  ```rust\nlet x = [a](b);\n  ```\n[c](c.md)\n";
        assert_eq!(targets(content), vec![(4, "c.md".to_string())]);
    }

    #[test]
    fn unterminated_fence_hides_rest_of_file() {
        let content = "[a](a.md)\n```\n[b](b.md)\n";
        assert_eq!(targets(content), vec![(1, "a.md".to_string())]);
    }

    #[test]
    fn inline_before_reference_on_same_line() {
        let found = targets("[label]: [x](inline.md)\n");
        assert_eq!(found, vec![(1, "inline.md".to_string()), (1, "[x](inline.md)".to_string())]);
    }

    #[test]
    fn every_line_boundary_advances_the_line_number() {
        let content = "[a](a)\r[b](b)\r\n[c](c)\u{2028}[d](d)\u{0c}[e](e)\n";
        let found: Vec<u32> = targets(content).into_iter().map(|(line, _)| return line).collect();
        assert_eq!(found, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn split_lines_matches_line_boundaries() {
        assert_eq!(split_lines("a\r\nb\rc\n"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_skipped() {
        use std::os::unix::fs::PermissionsExt as _;

        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path();
        let locked = docs.join("locked");
        std::fs::create_dir_all(&locked).unwrap();
        std::fs::write(locked.join("hidden.md"), "").unwrap();
        std::fs::write(docs.join("open.md"), "").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits, so the directory stays readable.
        let readable = std::fs::read_dir(&locked).is_ok();
        let files = markdown_files(docs, &Config::default());
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        assert_eq!(files, vec![docs.join("open.md")]);
    }

    #[test]
    fn markdown_files_are_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path();
        std::fs::create_dir_all(docs.join("b")).unwrap();
        std::fs::create_dir_all(docs.join("a")).unwrap();
        std::fs::write(docs.join("z.md"), "").unwrap();
        std::fs::write(docs.join("b/one.md"), "").unwrap();
        std::fs::write(docs.join("a/two.md"), "").unwrap();
        std::fs::write(docs.join("notes.txt"), "").unwrap();
        std::fs::write(docs.join("README.MD"), "").unwrap();

        let files = markdown_files(docs, &Config::default());
        let relative: Vec<PathBuf> =
            files.iter().map(|f| return f.strip_prefix(docs).unwrap().to_path_buf()).collect();
        assert_eq!(
            relative,
            vec![PathBuf::from("a/two.md"), PathBuf::from("b/one.md"), PathBuf::from("z.md")]
        );
    }
}
