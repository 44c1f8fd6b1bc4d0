/// Resolve positional arguments into an ordered, deduplicated input list.
use std::collections::HashSet;

use super::errors::LintError;
use super::input::{InputSource, STDIN_PATH, TEMPLATE_EXTENSION};
use crate::expand::PathExpander;

/// Map file arguments to input sources.
///
/// - no arguments means stdin only
/// - `-` and `/dev/stdin` both mean stdin, which appears at most once
/// - anything else is expanded as a pattern, keeping only `.hbs` files
///
/// First occurrence wins when the same input is named twice.
///
/// # Errors
///
/// Returns `LintError` if a pattern is malformed or cannot be expanded.
pub fn resolve_inputs(
    file_args: &[String],
    expander: &dyn PathExpander,
) -> Result<Vec<InputSource>, LintError> {
    if file_args.is_empty() {
        return Ok(vec![InputSource::Stdin]);
    }

    let mut seen = HashSet::new();
    let mut inputs = Vec::new();
    for arg in file_args {
        if arg == "-" || arg == STDIN_PATH {
            if seen.insert(InputSource::Stdin) {
                inputs.push(InputSource::Stdin);
            }
            continue;
        }

        let matches = expander.expand(arg)?;
        tracing::debug!(pattern = %arg, matches = matches.len(), "expanded pattern");
        for path in matches {
            if !path.to_string_lossy().ends_with(TEMPLATE_EXTENSION) {
                continue;
            }
            let input = InputSource::File(path);
            if seen.insert(input.clone()) {
                inputs.push(input);
            }
        }
    }
    Ok(inputs)
}
