/// CLI argument definitions via clap derive, behind a lenient pre-pass.
use std::path::PathBuf;

use clap::Parser;

/// hbslint: lint Handlebars templates.
#[derive(Debug, Parser)]
#[command(
    name = "hbslint",
    about = "Lint Handlebars templates and report problems per file",
    version
)]
pub struct Cli {
    /// Report errors only. Warnings are neither shown nor counted.
    #[arg(long)]
    pub quiet: bool,

    /// Print the full report as a pretty-printed JSON object.
    #[arg(long)]
    pub json: bool,

    /// Show the offending source under each message.
    #[arg(long)]
    pub verbose: bool,

    /// Engine configuration file (default: ./.template-lintrc.json if present).
    #[arg(long, value_name = "PATH", allow_hyphen_values = true)]
    pub config_path: Option<PathBuf>,

    /// Files, directories or glob patterns. `-` or /dev/stdin reads standard
    /// input, which is also the default when no pattern is given.
    #[arg(value_name = "PATTERN")]
    pub files: Vec<String>,
}

/// Options fixed for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub quiet: bool,
    pub json: bool,
    pub verbose: bool,
    pub config_path: Option<PathBuf>,
}

const SWITCHES: [&str; 5] = ["--quiet", "--json", "--verbose", "--help", "--version"];
const CONFIG_PATH: &str = "--config-path";

/// Parse the raw argument list (program name first) into options and file patterns.
///
/// Flags are recognised wherever they appear, and any `--`-prefixed token
/// that is not recognised is dropped rather than rejected. `--config-path`
/// takes the token after its first occurrence as its value; at the end of
/// the list it is ignored. Every token not starting with `--` is a pattern,
/// the config value included. Exits the process for `--help` and `--version`.
#[must_use]
pub fn parse_options<I, T>(raw: I) -> (RunOptions, Vec<String>)
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let cli = Cli::parse_from(normalize_args(raw));
    let options = RunOptions {
        quiet: cli.quiet,
        json: cli.json,
        verbose: cli.verbose,
        config_path: cli.config_path,
    };
    (options, cli.files)
}

/// Rewrite raw arguments into a form clap accepts unconditionally:
/// known flags (each once), then `--`, then every positional.
fn normalize_args<I, T>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut raw = raw.into_iter().map(Into::into);
    let program = raw.next().unwrap_or_else(|| "hbslint".to_owned());
    let raw: Vec<String> = raw.collect();

    let mut flags: Vec<String> = Vec::new();
    let mut positionals: Vec<String> = Vec::new();

    if let Some(i) = raw.iter().position(|arg| arg == CONFIG_PATH) {
        match raw.get(i + 1) {
            Some(value) => flags.push(format!("{CONFIG_PATH}={value}")),
            None => tracing::debug!("--config-path given without a value"),
        }
    }

    for arg in raw {
        if SWITCHES.contains(&arg.as_str()) {
            if !flags.contains(&arg) {
                flags.push(arg);
            }
        } else if arg.starts_with("--") {
            if arg != CONFIG_PATH {
                tracing::debug!(flag = %arg, "ignoring unrecognised flag");
            }
        } else {
            positionals.push(arg);
        }
    }

    let mut args = Vec::with_capacity(flags.len() + positionals.len() + 2);
    args.push(program);
    args.extend(flags);
    args.push("--".to_owned());
    args.extend(positionals);
    args
}
