/// The lint pipeline, from parsed options to exit status.
use std::path::{Path, PathBuf};

use crate::cli::{OutputCtx, RunOptions, write_report};
use crate::engine::{Linter, Verifier};
use crate::expand::{GlobExpander, PathExpander};
use crate::lint::{
    FsReader, LintError, SourceReader, filter_and_count, lint_inputs, resolve_inputs,
};

/// Run against the real file system and the built-in engine.
///
/// The engine is constructed before any input is resolved or read.
///
/// # Errors
///
/// Returns `LintError` for an invalid engine configuration, a bad pattern
/// or an unrecoverable read.
pub fn run(options: &RunOptions, file_args: &[String]) -> Result<i32, LintError> {
    let cwd = std::env::current_dir().map_err(|source| LintError::Read {
        path: PathBuf::from("."),
        source,
    })?;

    let linter = Linter::new(options.config_path.as_deref(), &cwd)?;
    let expander = GlobExpander::new(&cwd)?;
    execute(options, file_args, &linter, &expander, &FsReader, &cwd)
}

/// Resolve, lint, report. Returns the process exit status.
///
/// The status is taken from the unfiltered results; `--quiet` only changes
/// what is printed.
///
/// # Errors
///
/// Returns `LintError` if resolution or reading fails.
pub fn execute(
    options: &RunOptions,
    file_args: &[String],
    verifier: &dyn Verifier,
    expander: &dyn PathExpander,
    reader: &dyn SourceReader,
    cwd: &Path,
) -> Result<i32, LintError> {
    let inputs = resolve_inputs(file_args, expander)?;
    tracing::debug!(inputs = inputs.len(), "resolved inputs");

    let report = lint_inputs(&inputs, verifier, reader, cwd)?;
    let status = report.exit_code();

    let mut results = report.results;
    tracing::debug!(files = results.len(), failed = report.failed, "lint finished");
    if !results.is_empty() {
        let counts = filter_and_count(&mut results, options.quiet);
        write_report(&results, counts, &OutputCtx::new(options));
    }
    Ok(status)
}
