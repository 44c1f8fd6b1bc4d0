/// Quiet-mode filtering and problem counting.
use crate::types::{DiagnosticMap, Severity};

/// Post-filter problem totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub errors: usize,
    pub warnings: usize,
}

impl Counts {
    #[must_use]
    pub fn total(self) -> usize {
        self.errors + self.warnings
    }
}

/// Filter every entry in place and count what remains.
///
/// Each file's list becomes its errors followed by its warnings; warnings
/// are dropped when `quiet` is set. Severities other than the two defined
/// levels are dropped from display. Files left with nothing are removed.
pub fn filter_and_count(map: &mut DiagnosticMap, quiet: bool) -> Counts {
    let mut counts = Counts::default();
    for entry in map.iter_mut() {
        let (errors, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut entry.diagnostics)
            .into_iter()
            .partition(|d| d.severity == Severity::ERROR);
        let warnings: Vec<_> = if quiet {
            Vec::new()
        } else {
            rest.into_iter()
                .filter(|d| d.severity == Severity::WARNING)
                .collect()
        };

        counts.errors += errors.len();
        counts.warnings += warnings.len();

        entry.diagnostics = errors;
        entry.diagnostics.extend(warnings);
    }
    map.retain_non_empty();
    counts
}
