/// Verification engine: turns template source into diagnostics.
///
/// The orchestrator only sees the [`Verifier`] trait. [`Linter`] is the
/// built-in implementation driven by a [`LintConfig`].
pub mod config;
pub mod errors;
pub mod rules;

use std::path::Path;

pub use config::LintConfig;
pub use errors::EngineError;

use crate::types::Diagnostic;

/// Anything that can inspect template source and report diagnostics.
pub trait Verifier {
    /// Verify `source`, attributing findings to `module_id`.
    ///
    /// Returns diagnostics in the order they should be reported; empty when
    /// nothing was found.
    fn verify(&self, source: &str, module_id: &str) -> Vec<Diagnostic>;
}

/// The built-in rule engine.
#[derive(Debug, Clone, Default)]
pub struct Linter {
    config: LintConfig,
}

impl Linter {
    /// Construct the engine from an optional explicit config path.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if the configuration cannot be found, read or
    /// resolved.
    pub fn new(config_path: Option<&Path>, cwd: &Path) -> Result<Self, EngineError> {
        let config = LintConfig::load(config_path, cwd)?;
        tracing::debug!(
            rules = config.rules.len(),
            ignored = config.ignore.len(),
            "engine ready"
        );
        Ok(Self::with_config(config))
    }

    #[must_use]
    pub fn with_config(config: LintConfig) -> Self {
        Self { config }
    }
}

impl Verifier for Linter {
    fn verify(&self, source: &str, module_id: &str) -> Vec<Diagnostic> {
        if self.config.is_ignored(module_id) {
            tracing::debug!(module_id, "module ignored by config");
            return Vec::new();
        }

        self.config
            .rules
            .iter()
            .flat_map(|(rule, severity)| {
                rule.check(source).into_iter().map(move |f| Diagnostic {
                    rule: Some(rule.name().to_owned()),
                    severity: *severity,
                    module_id: Some(module_id.to_owned()),
                    message: f.message.to_owned(),
                    line: f.line,
                    column: f.column,
                    source: Some(f.source),
                })
            })
            .collect()
    }
}
