/// Output formatting: JSON report, text report, summary line, errors.
use std::fmt::Write as _;
use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use super::args::RunOptions;
use crate::lint::{Counts, LintError};
use crate::types::{Diagnostic, DiagnosticMap, ErrorOutput, Severity};

/// Output context passed to all formatters.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputCtx {
    pub json: bool,
    /// Append the offending source to each text-mode message.
    pub verbose: bool,
}

impl OutputCtx {
    /// Construct from run options.
    #[must_use]
    pub fn new(options: &RunOptions) -> Self {
        Self {
            json: options.json,
            verbose: options.verbose,
        }
    }
}

// --- Report ---

/// Write the filtered report to stdout.
///
/// JSON mode prints the whole map and nothing else. Text mode prints one
/// block per file and, when anything remains, a summary line.
pub fn write_report(results: &DiagnosticMap, counts: Counts, ctx: &OutputCtx) {
    if ctx.json {
        print_json(results);
        return;
    }

    for entry in results.iter() {
        let block = format_messages(&entry.key, &entry.diagnostics, ctx.verbose);
        if !block.is_empty() {
            println!("{block}");
        }
    }

    if let Some(summary) = summary_line(counts) {
        println!("{}", summary.red().bold());
    }
}

/// Render one file's diagnostics, or `""` when there are none.
#[must_use]
pub fn format_messages(key: &str, diagnostics: &[Diagnostic], verbose: bool) -> String {
    if diagnostics.is_empty() {
        return String::new();
    }

    let mut out = format!("{key}\n");
    for d in diagnostics {
        let position = format!("{}:{}", d.line, d.column);
        let label = if d.severity == Severity::WARNING {
            d.severity.label().yellow()
        } else {
            d.severity.label().red()
        };
        let message = match (&d.source, verbose) {
            (Some(source), true) => format!("{}\n{source}", d.message),
            _ => d.message.clone(),
        };
        let rule = d.rule.as_deref().unwrap_or_default();
        let _ = writeln!(out, "  {}  {label}  {message}  {}", position.dimmed(), rule.dimmed());
    }
    out
}

/// `✖ N problems (E errors, W warnings)`, or `None` when there is nothing to report.
#[must_use]
pub fn summary_line(counts: Counts) -> Option<String> {
    let total = counts.total();
    (total > 0).then(|| {
        format!(
            "✖ {total} problems ({} errors, {} warnings)",
            counts.errors, counts.warnings
        )
    })
}

// --- Error output ---

/// Write a fatal error to stderr.
pub fn write_error(err: &LintError, json: bool) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    let _ = writeln!(out, "{}", render_error(err, json));
}

/// The engine's failure message is always printed bare. Other fatal errors
/// get the JSON envelope with `--json`.
fn render_error(err: &LintError, json: bool) -> String {
    if json && !matches!(err, LintError::Engine(_)) {
        serde_json::to_string_pretty(&ErrorOutput::from_lint_error(err)).unwrap_or_default()
    } else {
        err.to_string()
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds at debug level on drop.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
}

impl DebugTimer {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(stage = self.label, "{ms:.2}ms");
    }
}

// --- Generic JSON helpers ---

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}
