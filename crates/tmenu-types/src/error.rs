//! Error types for configuration loading and process launching.

use std::path::PathBuf;

/// Problems with the menu configuration document.
///
/// All of these are fatal and are reported before any panel is shown.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unknown menu type: {0}")]
    UnknownMenuType(String),
    #[error("Unsupported command type: {0}")]
    UnknownCommandKind(String),
    #[error("missing required field `{field}` in {context}")]
    MissingField {
        field: &'static str,
        context: String,
    },
}

/// An external process could not be started.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("empty command")]
    EmptyCommand,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{0}")]
    Other(String),
}
