/// Shared serializable data model: diagnostics and the per-file report map.
///
/// These types are what gets written to stdout, either as JSON or rendered
/// as text blocks. They are produced by the verification engine and never
/// mutated after that, except for quiet-mode filtering of the map.
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Ordinal classification of a diagnostic.
///
/// Kept numeric on the wire (`1` = warning, `2` = error). Values outside the
/// two defined levels stay representable so the exit decision can treat
/// anything above `WARNING` as failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Severity(pub u8);

impl Severity {
    pub const WARNING: Self = Self(1);
    pub const ERROR: Self = Self(2);

    /// Whether a diagnostic of this severity makes the run exit with status 1.
    #[must_use]
    pub fn fails_run(self) -> bool {
        self > Self::WARNING
    }

    /// Display label used by the text formatter.
    #[must_use]
    pub fn label(self) -> &'static str {
        if self == Self::WARNING {
            "warning"
        } else {
            "error"
        }
    }
}

/// A single issue reported by the verification engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Rule identifier (e.g. "no-debugger"), absent for engine-level findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    pub severity: Severity,
    /// Logical module name the engine attributed the finding to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    pub message: String,
    /// 1-based line.
    pub line: u32,
    /// 0-based column.
    pub column: u32,
    /// Offending source text, shown by `--verbose`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Diagnostics for one resolved input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiagnostics {
    /// Resolved identifier: absolute path or the stdin key.
    pub key: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Ordered mapping from resolved identifier to its diagnostics.
///
/// Insertion order is resolution order. Serialized as a JSON object whose
/// keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticMap {
    entries: Vec<FileDiagnostics>,
}

impl DiagnosticMap {
    /// Record diagnostics for `key`. Empty sequences are not stored.
    pub fn insert(&mut self, key: impl Into<String>, diagnostics: Vec<Diagnostic>) {
        if diagnostics.is_empty() {
            return;
        }
        let key = key.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.diagnostics = diagnostics,
            None => self.entries.push(FileDiagnostics { key, diagnostics }),
        }
    }

    /// Drop entries whose diagnostics were all filtered away.
    pub fn retain_non_empty(&mut self) {
        self.entries.retain(|e| !e.diagnostics.is_empty());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileDiagnostics> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FileDiagnostics> {
        self.entries.iter_mut()
    }
}

impl Serialize for DiagnosticMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.diagnostics)?;
        }
        map.end()
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `LintError`.
    #[must_use]
    pub fn from_lint_error(err: &crate::lint::LintError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(severity: Severity, message: &str) -> Diagnostic {
        Diagnostic {
            rule: Some("no-log".to_owned()),
            severity,
            module_id: None,
            message: message.to_owned(),
            line: 1,
            column: 0,
            source: None,
        }
    }

    #[test]
    fn test_severity_threshold() {
        assert!(!Severity::WARNING.fails_run());
        assert!(Severity::ERROR.fails_run());
        assert!(Severity(7).fails_run());
        assert!(!Severity(0).fails_run());
    }

    #[test]
    fn test_severity_is_numeric_on_the_wire() {
        let json = serde_json::to_value(diag(Severity::ERROR, "boom")).unwrap();
        assert_eq!(json["severity"], 2);
        assert_eq!(json["rule"], "no-log");
        assert!(json.get("source").is_none());
    }

    #[test]
    fn test_map_skips_empty_and_keeps_order() {
        let mut map = DiagnosticMap::default();
        map.insert("/b.hbs", vec![diag(Severity::WARNING, "b")]);
        map.insert("/empty.hbs", vec![]);
        map.insert("/a.hbs", vec![diag(Severity::ERROR, "a")]);
        assert_eq!(map.len(), 2);
        assert!(map.iter().all(|e| e.key != "/empty.hbs"));

        let json = serde_json::to_string(&map).unwrap();
        let b = json.find("/b.hbs").unwrap();
        let a = json.find("/a.hbs").unwrap();
        assert!(b < a);
    }
}
