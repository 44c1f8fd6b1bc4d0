/// Engine configuration: discovery, parsing and rule resolution.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use super::errors::EngineError;
use super::rules::Rule;
use crate::types::Severity;

/// File looked up in the working directory when `--config-path` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".template-lintrc.json";

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    rules: BTreeMap<String, Value>,
    #[serde(default)]
    ignore: Vec<String>,
}

/// Resolved configuration: which rules run, at what severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintConfig {
    /// Enabled rules in evaluation order.
    pub rules: Vec<(Rule, Severity)>,
    /// Module ids the engine reports nothing for.
    pub ignore: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            rules: recommended(),
            ignore: Vec::new(),
        }
    }
}

impl LintConfig {
    /// Load the config named by `config_path`, or discover one under `cwd`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` when an explicitly requested file is missing, or
    /// when any config file found cannot be read, parsed or resolved.
    pub fn load(config_path: Option<&Path>, cwd: &Path) -> Result<Self, EngineError> {
        let path = match config_path {
            Some(p) => {
                let p = cwd.join(p);
                if !p.is_file() {
                    return Err(EngineError::ConfigNotFound { path: p });
                }
                p
            }
            None => {
                let p = cwd.join(DEFAULT_CONFIG_FILE);
                if !p.is_file() {
                    tracing::debug!("no config file found, using recommended rules");
                    return Ok(Self::default());
                }
                p
            }
        };

        tracing::debug!(path = %path.display(), "loading config");
        let text = std::fs::read_to_string(&path).map_err(|source| EngineError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parse config text. `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` on malformed JSON, unknown rules, unknown
    /// presets or invalid rule values.
    pub fn parse(text: &str, path: PathBuf) -> Result<Self, EngineError> {
        let raw: RawConfig = serde_json::from_str(text)
            .map_err(|source| EngineError::ConfigParse { path, source })?;

        let mut rules = match raw.extends.as_deref() {
            None | Some("recommended") => recommended(),
            Some("none") => Vec::new(),
            Some(other) => {
                return Err(EngineError::UnknownExtends {
                    name: other.to_owned(),
                });
            }
        };

        for (name, value) in &raw.rules {
            let rule = Rule::from_name(name).ok_or_else(|| EngineError::UnknownRule {
                rule: name.clone(),
            })?;
            let severity = severity_from_value(name, value)?;
            rules.retain(|(r, _)| *r != rule);
            if let Some(severity) = severity {
                rules.push((rule, severity));
            }
        }
        // Report in a stable rule order regardless of config key order.
        rules.sort_by_key(|(rule, _)| *rule);

        Ok(Self {
            rules,
            ignore: raw.ignore,
        })
    }

    /// Whether the engine should skip `module_id` entirely.
    #[must_use]
    pub fn is_ignored(&self, module_id: &str) -> bool {
        self.ignore.iter().any(|m| m == module_id)
    }
}

fn recommended() -> Vec<(Rule, Severity)> {
    Rule::ALL
        .iter()
        .filter_map(|rule| rule.recommended().map(|sev| (*rule, sev)))
        .collect()
}

/// `Ok(None)` means the rule is turned off.
fn severity_from_value(rule: &str, value: &Value) -> Result<Option<Severity>, EngineError> {
    match value {
        Value::Bool(true) => Ok(Some(Severity::ERROR)),
        Value::Bool(false) => Ok(None),
        Value::String(s) => match s.as_str() {
            "error" => Ok(Some(Severity::ERROR)),
            "warn" | "warning" => Ok(Some(Severity::WARNING)),
            "off" => Ok(None),
            _ => Err(invalid(rule, value)),
        },
        _ => Err(invalid(rule, value)),
    }
}

fn invalid(rule: &str, value: &Value) -> EngineError {
    EngineError::InvalidSeverity {
        rule: rule.to_owned(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<LintConfig, EngineError> {
        LintConfig::parse(text, PathBuf::from(".template-lintrc.json"))
    }

    #[test]
    fn test_empty_config_is_recommended() {
        let config = parse("{}").unwrap();
        assert_eq!(config, LintConfig::default());
        assert!(config.rules.iter().all(|(r, _)| *r != Rule::NoTrailingSpaces));
    }

    #[test]
    fn test_rule_overrides() {
        let config = parse(
            r#"{"rules": {"no-log": "warn", "no-debugger": false, "no-trailing-spaces": true}}"#,
        )
        .unwrap();
        assert!(config.rules.contains(&(Rule::NoLog, Severity::WARNING)));
        assert!(config.rules.contains(&(Rule::NoTrailingSpaces, Severity::ERROR)));
        assert!(config.rules.iter().all(|(r, _)| *r != Rule::NoDebugger));
    }

    #[test]
    fn test_extends_none() {
        let config = parse(r#"{"extends": "none", "rules": {"no-log": "error"}}"#).unwrap();
        assert_eq!(config.rules, vec![(Rule::NoLog, Severity::ERROR)]);
    }

    #[test]
    fn test_unknown_rule_is_rejected() {
        let err = parse(r#"{"rules": {"no-such-rule": true}}"#).unwrap_err();
        assert!(matches!(err, EngineError::UnknownRule { .. }));
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let err = parse(r#"{"rules": {"no-log": 3}}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSeverity { .. }));
        assert!(err.to_string().contains("no-log"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse("{ rules: "),
            Err(EngineError::ConfigParse { .. })
        ));
        assert!(matches!(
            parse(r#"{"extends": "strict"}"#),
            Err(EngineError::UnknownExtends { .. })
        ));
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = LintConfig::load(Some(Path::new("nope.json")), dir.path()).unwrap_err();
        assert!(matches!(err, EngineError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_discovers_default_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{"ignore": ["app/templates/legacy"]}"#,
        )
        .unwrap();
        let config = LintConfig::load(None, dir.path()).unwrap();
        assert!(config.is_ignored("app/templates/legacy"));
        assert!(!config.is_ignored("app/templates/index"));
    }
}
