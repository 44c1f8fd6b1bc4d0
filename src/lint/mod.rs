/// Lint orchestration: input resolution, reading, per-file linting, filtering.
pub mod errors;
pub mod input;
pub mod resolve;
pub mod run;
pub mod severity;

pub use errors::LintError;
pub use input::{FsReader, SourceReader};
pub use resolve::resolve_inputs;
pub use run::lint_inputs;
pub use severity::{Counts, filter_and_count};
