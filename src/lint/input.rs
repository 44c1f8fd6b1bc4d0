/// Input sources and reading their text.
use std::io::{IsTerminal, Read};
use std::path::{Component, Path, PathBuf};

use super::errors::LintError;

/// Path spelling of standard input; also its key in the report.
pub const STDIN_PATH: &str = "/dev/stdin";

/// Extension of the templates this tool lints.
pub const TEMPLATE_EXTENSION: &str = ".hbs";

/// `ENXIO`: the stream exists but has no device or data source behind it.
const ENXIO: i32 = 6;

/// Where a template's source comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Standard input, named as `-` or `/dev/stdin`.
    Stdin,
    /// A file, as found by pattern expansion (usually relative).
    File(PathBuf),
}

impl InputSource {
    /// Identifier used as the report key: absolute path, or the stdin path.
    #[must_use]
    pub fn key(&self, cwd: &Path) -> String {
        match self {
            Self::Stdin => STDIN_PATH.to_owned(),
            Self::File(path) => normalize(&cwd.join(path)).to_string_lossy().into_owned(),
        }
    }

    /// Logical module name handed to the engine: the path without its extension.
    #[must_use]
    pub fn module_id(&self) -> String {
        match self {
            Self::Stdin => STDIN_PATH.to_owned(),
            Self::File(path) => {
                let path = path.to_string_lossy();
                path.strip_suffix(TEMPLATE_EXTENSION)
                    .map_or_else(|| path.to_string(), str::to_owned)
            }
        }
    }
}

/// Produces template source for an input.
pub trait SourceReader {
    /// Read the full text of `input`.
    ///
    /// Returns `Ok(None)` when the input is a stream with nothing attached.
    ///
    /// # Errors
    ///
    /// Returns `LintError::Read` for any other failure, including invalid UTF-8.
    fn read(&self, input: &InputSource) -> Result<Option<String>, LintError>;
}

/// Reads files from disk and stdin from the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, input: &InputSource) -> Result<Option<String>, LintError> {
        match input {
            InputSource::Stdin => {
                let stdin = std::io::stdin();
                if stdin.is_terminal() {
                    tracing::debug!("stdin is a terminal, nothing piped");
                    return Ok(None);
                }
                let mut source = String::new();
                match stdin.lock().read_to_string(&mut source) {
                    Ok(_) => Ok(Some(source)),
                    Err(err) if is_not_ready(&err) => Ok(None),
                    Err(source) => Err(LintError::Read {
                        path: PathBuf::from(STDIN_PATH),
                        source,
                    }),
                }
            }
            InputSource::File(path) => match std::fs::read_to_string(path) {
                Ok(source) => Ok(Some(source)),
                Err(err) if is_not_ready(&err) => Ok(None),
                Err(source) => Err(LintError::Read {
                    path: path.clone(),
                    source,
                }),
            },
        }
    }
}

fn is_not_ready(err: &std::io::Error) -> bool {
    cfg!(unix) && err.raw_os_error() == Some(ENXIO)
}

/// Lexically resolve `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
