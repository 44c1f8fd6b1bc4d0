/// CLI layer: argument parsing and output formatting.
pub mod args;
pub mod output;

pub use args::{RunOptions, parse_options};
pub use output::{OutputCtx, write_error, write_report};
