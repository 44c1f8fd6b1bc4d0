/// Built-in textual rules. Each rule scans template source line by line.
use crate::types::Severity;

/// A built-in rule.
///
/// Variant order is evaluation order, and therefore report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    NoDebugger,
    NoLog,
    NoTripleCurlies,
    NoHtmlComments,
    NoTrailingSpaces,
}

/// A rule match before it is turned into a `Diagnostic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// 1-based line.
    pub line: u32,
    /// 0-based column, in characters.
    pub column: u32,
    pub message: &'static str,
    /// Matched text.
    pub source: String,
}

impl Rule {
    pub const ALL: [Self; 5] = [
        Self::NoDebugger,
        Self::NoLog,
        Self::NoTripleCurlies,
        Self::NoHtmlComments,
        Self::NoTrailingSpaces,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::NoDebugger => "no-debugger",
            Self::NoLog => "no-log",
            Self::NoTripleCurlies => "no-triple-curlies",
            Self::NoHtmlComments => "no-html-comments",
            Self::NoTrailingSpaces => "no-trailing-spaces",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }

    /// Severity in the `recommended` preset, `None` when the preset leaves it off.
    #[must_use]
    pub fn recommended(self) -> Option<Severity> {
        match self {
            Self::NoTrailingSpaces => None,
            _ => Some(Severity::ERROR),
        }
    }

    /// Scan `source` and return every match in position order.
    #[must_use]
    pub fn check(self, source: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
            match self {
                Self::NoDebugger => mustaches_named(
                    line,
                    "debugger",
                    line_no,
                    &mut findings,
                    "Unexpected {{debugger}} usage.",
                ),
                Self::NoLog => mustaches_named(
                    line,
                    "log",
                    line_no,
                    &mut findings,
                    "Unexpected {{log}} usage.",
                ),
                Self::NoTripleCurlies => {
                    for (at, _) in line.match_indices("{{{") {
                        findings.push(Finding {
                            line: line_no,
                            column: char_column(line, at),
                            message: "Usage of triple curly brackets is unsafe",
                            source: until(line, at, "}}}"),
                        });
                    }
                }
                Self::NoHtmlComments => {
                    for (at, _) in line.match_indices("<!--") {
                        let rest = line[at + 4..].trim_start();
                        if rest.starts_with("[if") {
                            continue;
                        }
                        findings.push(Finding {
                            line: line_no,
                            column: char_column(line, at),
                            message: "HTML comment detected",
                            source: until(line, at, "-->"),
                        });
                    }
                }
                Self::NoTrailingSpaces => {
                    let trimmed = line.trim_end();
                    if trimmed.len() != line.len() {
                        findings.push(Finding {
                            line: line_no,
                            column: char_column(line, trimmed.len()),
                            message: "line has trailing whitespace",
                            source: line.to_owned(),
                        });
                    }
                }
            }
        }
        findings
    }
}

/// Push a finding for every `{{name ...}}` mustache on `line`.
fn mustaches_named(
    line: &str,
    name: &str,
    line_no: u32,
    out: &mut Vec<Finding>,
    message: &'static str,
) {
    for (at, _) in line.match_indices("{{") {
        // Only look at the first brace of a run so `{{{log}}}` is seen once.
        if at > 0 && line.as_bytes()[at - 1] == b'{' {
            continue;
        }
        if head_path(&line[at..]) == Some(name) {
            out.push(Finding {
                line: line_no,
                column: char_column(line, at),
                message,
                source: until(line, at, "}}"),
            });
        }
    }
}

/// Helper path of a mustache starting at `text`, e.g. `log` for `{{~log foo}}`.
/// Comments (`{{!`) and block closers (`{{/`) have no head.
fn head_path(text: &str) -> Option<&str> {
    let inner = text.trim_start_matches('{').trim_start_matches('~').trim_start();
    if inner.starts_with('!') || inner.starts_with('/') {
        return None;
    }
    let inner = inner.trim_start_matches('#');
    let end = inner
        .find(|c: char| c.is_whitespace() || c == '}' || c == '~')
        .unwrap_or(inner.len());
    let head = &inner[..end];
    (!head.is_empty()).then_some(head)
}

/// Text from `start` through the first `close` after it, or to end of line.
fn until(line: &str, start: usize, close: &str) -> String {
    let rest = &line[start..];
    match rest.find(close) {
        Some(end) => rest[..end + close.len()].to_owned(),
        None => rest.to_owned(),
    }
}

fn char_column(line: &str, byte_idx: usize) -> u32 {
    u32::try_from(line[..byte_idx].chars().count()).unwrap_or(u32::MAX)
}
