use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::filter::TargetFilter;

/// Name of the optional config file at the repository root.
pub const CONFIG_FILE: &str = ".doclinks.toml";

/// Documentation directory used when neither the CLI nor the config names one.
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Project configuration loaded from `.doclinks.toml`.
/// Include/exclude patterns are path prefixes applied to markdown files,
/// relative to the documentation root.
#[derive(Debug, Clone, Default)]
pub struct Config {
    docs_dir: Option<PathBuf>,
    exclude: Vec<String>,
    include: Vec<String>,
    skip_schemes: Vec<String>,
}

/// Raw TOML structure for `.doclinks.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct DoclinksTomlConfig {
    docs_dir: Option<PathBuf>,
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    skip_schemes: Vec<String>,
}

impl Config {
    /// Load config from `.doclinks.toml` in the given root directory.
    /// Returns a default that scans everything if the file doesn't exist.
    /// A file that exists but is malformed is an error, never a silent default.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        tracing::debug!(path = %path.display(), "loaded config");
        return Self::parse(&content);
    }

    /// Parse config from TOML content.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: DoclinksTomlConfig = toml::from_str(content)?;
        return Ok(Self {
            docs_dir: raw.docs_dir,
            exclude: raw.exclude,
            include: raw.include,
            skip_schemes: raw.skip_schemes,
        });
    }

    /// Documentation directory relative to the repository root, without a
    /// trailing separator. `cli_override` takes precedence over the config file.
    pub fn docs_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        let chosen = cli_override
            .or(self.docs_dir.as_deref())
            .unwrap_or_else(|| return Path::new(DEFAULT_DOCS_DIR));
        return chosen.components().collect();
    }

    /// Skip filter with the configured extra schemes applied.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidScheme` for a malformed `skip_schemes` entry.
    pub fn target_filter(&self) -> Result<TargetFilter, Error> {
        return TargetFilter::with_extra_schemes(&self.skip_schemes);
    }

    /// Check whether a markdown file path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let relative_path = relative_path.replace('\\', "/");
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }
}
