/// Errors that abort a lint run.
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::EngineError;

/// Fatal conditions. Lint findings are not errors; they are the report.
#[derive(Debug, Error)]
pub enum LintError {
    /// The verification engine could not be constructed.
    #[error("{0}")]
    Engine(#[from] EngineError),

    /// An input could not be read for a reason other than "no data attached".
    #[error("Could not read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A positional argument is not a valid glob pattern.
    #[error("Invalid file pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Walking the file tree for a pattern failed.
    #[error("Could not expand '{pattern}': {source}")]
    Walk {
        pattern: String,
        #[source]
        source: ignore::Error,
    },
}

impl LintError {
    /// Return the CLI exit code for this error.
    ///
    /// Configuration failures share status 1 with failing lint results.
    /// Everything else is an abnormal termination.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Engine(_) => 1,
            Self::Read { .. } | Self::Glob { .. } | Self::Walk { .. } => 2,
        }
    }

    /// Machine-readable code for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Engine(_) => "invalid_config",
            Self::Read { .. } => "read_failed",
            Self::Glob { .. } => "invalid_pattern",
            Self::Walk { .. } => "walk_failed",
        }
    }
}
