/// Sequential per-input linting and the exit decision.
use std::path::Path;

use super::errors::LintError;
use super::input::{InputSource, SourceReader};
use crate::cli::output::DebugTimer;
use crate::engine::Verifier;
use crate::types::DiagnosticMap;

/// Unfiltered results of a run.
#[derive(Debug, Default)]
pub struct LintReport {
    /// Diagnostics per input, in resolution order. Inputs without any are absent.
    pub results: DiagnosticMap,
    /// Whether any diagnostic was above warning severity.
    ///
    /// Decided here, before any quiet filtering, and never reset.
    pub failed: bool,
}

impl LintReport {
    /// Process exit status for this report.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(self.failed)
    }
}

/// Read and verify every input in order.
///
/// An input whose stream has nothing attached contributes no diagnostics.
///
/// # Errors
///
/// Returns `LintError::Read` on the first unrecoverable read failure.
pub fn lint_inputs(
    inputs: &[InputSource],
    verifier: &dyn Verifier,
    reader: &dyn SourceReader,
    cwd: &Path,
) -> Result<LintReport, LintError> {
    let mut report = LintReport::default();

    for input in inputs {
        let key = input.key(cwd);
        let module_id = input.module_id();
        let _t = DebugTimer::new("lint_file");

        let diagnostics = match reader.read(input)? {
            Some(source) => verifier.verify(&source, &module_id),
            None => {
                tracing::debug!(input = %key, "no data attached, skipping");
                Vec::new()
            }
        };
        tracing::debug!(input = %key, found = diagnostics.len(), "linted");

        if diagnostics.iter().any(|d| d.severity.fails_run()) {
            report.failed = true;
        }
        report.results.insert(key, diagnostics);
    }

    Ok(report)
}
