/// Glob pattern expansion with ignore-file support.
use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::lint::LintError;

/// Build, temp and dependency directories never linted.
pub const DEFAULT_IGNORES: [&str; 3] = ["**/dist/**", "**/tmp/**", "**/node_modules/**"];

const IGNORE_FILES: [&str; 2] = [".gitignore", ".ignore"];

/// Turns a file pattern into the paths it names.
pub trait PathExpander {
    /// Expand `pattern` into matching file paths, sorted.
    ///
    /// # Errors
    ///
    /// Returns `LintError::Glob` for a malformed pattern and
    /// `LintError::Walk` if the file tree cannot be traversed.
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>, LintError>;
}

/// Expands patterns against the file system below `root`.
///
/// Relative patterns yield paths relative to `root`; absolute patterns
/// yield absolute paths.
#[derive(Debug, Clone)]
pub struct GlobExpander {
    root: PathBuf,
    ignore: GlobSet,
    respect_ignore_files: bool,
}

impl GlobExpander {
    /// Expander with [`DEFAULT_IGNORES`] that honours `.gitignore` / `.ignore`.
    ///
    /// # Errors
    ///
    /// Returns `LintError::Glob` if an ignore pattern does not compile.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, LintError> {
        Self::with_options(root, &DEFAULT_IGNORES, true)
    }

    /// # Errors
    ///
    /// Returns `LintError::Glob` if an ignore pattern does not compile.
    pub fn with_options(
        root: impl Into<PathBuf>,
        ignore_patterns: &[&str],
        respect_ignore_files: bool,
    ) -> Result<Self, LintError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in ignore_patterns {
            builder.add(Glob::new(pattern).map_err(|source| glob_error(pattern, source))?);
        }
        let ignore = builder.build().map_err(|source| glob_error("<ignore>", source))?;
        Ok(Self {
            root: root.into(),
            ignore,
            respect_ignore_files,
        })
    }

    /// Whether a default ignore glob matches `path`.
    ///
    /// Absolute paths are matched relative to the root, or relative to the
    /// searched directory `base` when they lie outside the root. Directories
    /// above the search never take part.
    fn is_default_ignored(&self, path: &Path, base: &Path) -> bool {
        let rel = if path.is_relative() {
            path
        } else {
            path.strip_prefix(&self.root)
                .or_else(|_| path.strip_prefix(base))
                .unwrap_or(path)
        };
        self.ignore.is_match(rel)
    }

    /// Walk `dir` (relative to root unless absolute), keeping files accepted by `matcher`.
    fn walk(
        &self,
        pattern: &str,
        dir: &Path,
        matcher: Option<&GlobMatcher>,
    ) -> Result<Vec<PathBuf>, LintError> {
        let walk_root = self.root.join(dir);
        if !walk_root.is_dir() {
            return Ok(Vec::new());
        }

        let mut builder = WalkBuilder::new(&walk_root);
        builder
            .hidden(true)
            .follow_links(false)
            .require_git(false)
            .git_global(false)
            .git_ignore(self.respect_ignore_files)
            .git_exclude(self.respect_ignore_files)
            .ignore(self.respect_ignore_files)
            .parents(self.respect_ignore_files);

        let mut found = Vec::new();
        for entry in builder.build() {
            let entry = entry.map_err(|source| walk_error(pattern, source))?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = if dir.is_absolute() {
                entry.path().to_path_buf()
            } else {
                match entry.path().strip_prefix(&self.root) {
                    Ok(rel) => rel.to_path_buf(),
                    Err(_) => continue,
                }
            };
            if self.is_default_ignored(&path, &walk_root) {
                continue;
            }
            if matcher.is_none_or(|m| m.is_match(&path)) {
                found.push(path);
            }
        }
        found.sort();
        Ok(found)
    }

    /// Drop paths excluded by ignore files in `base` or in any directory
    /// between it and the root. The walker only applies those rules to
    /// what lies below `base`.
    fn retain_unignored(
        &self,
        paths: &mut Vec<PathBuf>,
        pattern: &str,
        base: &Path,
    ) -> Result<(), LintError> {
        if !self.respect_ignore_files || paths.is_empty() {
            return Ok(());
        }
        let matchers = self.enclosing_ignores(pattern, &self.root.join(base))?;
        paths.retain(|path| {
            let abs = self.root.join(path);
            let ignored = matchers
                .iter()
                .map(|gi| gi.matched_path_or_any_parents(&abs, false))
                .find(|m| !m.is_none())
                .is_some_and(|m| m.is_ignore());
            if ignored {
                tracing::debug!(path = %path.display(), "excluded by ignore file");
            }
            !ignored
        });
        Ok(())
    }

    /// Ignore-file matchers for `base` and its ancestors up to the root, deepest first.
    fn enclosing_ignores(&self, pattern: &str, base: &Path) -> Result<Vec<Gitignore>, LintError> {
        let dirs: Vec<&Path> = if base.starts_with(&self.root) {
            base.ancestors()
                .take_while(|d| d.starts_with(&self.root))
                .collect()
        } else {
            vec![base]
        };

        let mut matchers = Vec::new();
        for dir in dirs {
            let mut builder = GitignoreBuilder::new(dir);
            for name in IGNORE_FILES {
                let file = dir.join(name);
                if !file.is_file() {
                    continue;
                }
                if let Some(err) = builder.add(&file) {
                    tracing::debug!(file = %file.display(), error = %err, "skipping bad ignore rule");
                }
            }
            let gitignore = builder.build().map_err(|source| walk_error(pattern, source))?;
            if !gitignore.is_empty() {
                matchers.push(gitignore);
            }
        }
        Ok(matchers)
    }
}

impl PathExpander for GlobExpander {
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>, LintError> {
        let pattern = strip_current_dir(pattern);
        let target = self.root.join(pattern);

        let (base, mut found) = if target.is_file() {
            let path = PathBuf::from(pattern);
            let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
            let found = if self.is_default_ignored(&path, &self.root.join(&base)) {
                Vec::new()
            } else {
                vec![path]
            };
            (base, found)
        } else if target.is_dir() {
            let base = PathBuf::from(pattern);
            let found = self.walk(pattern, &base, None)?;
            (base, found)
        } else if has_glob_meta(pattern) {
            let matcher = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|source| glob_error(pattern, source))?
                .compile_matcher();
            let base = PathBuf::from(literal_prefix(pattern));
            let found = self.walk(pattern, &base, Some(&matcher))?;
            (base, found)
        } else {
            tracing::debug!(pattern, "no such file");
            return Ok(Vec::new());
        };

        self.retain_unignored(&mut found, pattern, &base)?;
        Ok(found)
    }
}

fn glob_error(pattern: &str, source: globset::Error) -> LintError {
    LintError::Glob {
        pattern: pattern.to_owned(),
        source,
    }
}

fn walk_error(pattern: &str, source: ignore::Error) -> LintError {
    LintError::Walk {
        pattern: pattern.to_owned(),
        source,
    }
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '[', '{'])
}

fn strip_current_dir(mut pattern: &str) -> &str {
    while let Some(rest) = pattern.strip_prefix("./") {
        pattern = rest;
    }
    pattern
}

/// Leading directory components that contain no glob syntax.
fn literal_prefix(pattern: &str) -> String {
    let segments: Vec<&str> = pattern.split('/').collect();
    let literal: Vec<&str> = segments[..segments.len().saturating_sub(1)]
        .iter()
        .take_while(|s| !has_glob_meta(s))
        .copied()
        .collect();
    if literal == [""] {
        return "/".to_owned();
    }
    literal.join("/")
}
