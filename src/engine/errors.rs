/// Errors raised while constructing the verification engine.
use std::path::PathBuf;

use thiserror::Error;

/// Typed errors from engine construction. The `Display` text is the message
/// shown to the user when the run aborts.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `--config-path` named a file that does not exist.
    #[error("Requested config file '{}' does not exist", path.display())]
    ConfigNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The config file exists but could not be read.
    #[error("Could not read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON or does not match the schema.
    #[error("Invalid config file '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A rule named in the config is not known to the engine.
    #[error("Rule '{rule}' is not a known rule")]
    UnknownRule {
        /// The unknown rule name.
        rule: String,
    },

    /// A rule was configured with a value other than a boolean or severity name.
    #[error("Invalid value {value} for rule '{rule}' (expected true, false, \"error\", \"warn\" or \"off\")")]
    InvalidSeverity {
        /// Rule name.
        rule: String,
        /// The raw JSON value as written.
        value: String,
    },

    /// `extends` names a preset that does not exist.
    #[error("Cannot extend unknown preset '{name}'")]
    UnknownExtends {
        /// The preset name.
        name: String,
    },
}
