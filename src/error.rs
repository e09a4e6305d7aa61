/// Crate-level error types for doclinks.
use std::path::PathBuf;

/// Setup and I/O failures that stop a check before it can produce a report.
/// Broken links are never errors; they are collected as `Failure`s instead.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The documentation root directory does not exist.
    #[error("{}/ not found", path.display())]
    DocsRootNotFound {
        /// Path of the missing documentation root.
        path: PathBuf,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// A configured skip scheme is not a valid URL scheme.
    #[error("invalid scheme in .doclinks.toml: `{scheme}`")]
    InvalidScheme {
        /// The scheme as written in the config file.
        scheme: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
