#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! hbslint: lint Handlebars templates from the command line.

mod cli;
mod engine;
mod expand;
mod lint;
mod run;
mod types;

use tracing_subscriber::EnvFilter;

use cli::{parse_options, write_error};

fn main() {
    init_logging();

    let (options, file_args) = parse_options(std::env::args());

    match run::run(&options, &file_args) {
        Ok(status) => std::process::exit(status),
        Err(err) => {
            tracing::debug!(error = ?err, "run aborted");
            write_error(&err, options.json);
            std::process::exit(err.exit_code());
        }
    }
}

/// Log to stderr. Filter from `HBSLINT_LOG`, then `RUST_LOG`, else warnings only.
fn init_logging() {
    let filter = EnvFilter::try_from_env("HBSLINT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("hbslint=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
