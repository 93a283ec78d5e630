//! Document discovery
//!
//! Expands search scopes into the list of prefab files to decode. A scope
//! is a file, a directory (searched recursively) or a glob pattern.

use crate::error::CoreError;
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of prefab documents
pub const PREFAB_EXTENSION: &str = "prefab";

/// Discovery options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extension (without dot) of files to keep
    pub extension: String,
    /// Globs of paths to skip, matched relative to the scope directory
    pub exclude: Vec<String>,
    /// Whether to follow symbolic links while walking
    pub follow_links: bool,
}

impl ScanConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different document extension
    #[inline]
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// With an additional exclude glob
    #[inline]
    #[must_use]
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: PREFAB_EXTENSION.to_string(),
            exclude: Vec::new(),
            follow_links: false,
        }
    }
}

/// Expand scopes into document paths
///
/// Scopes are processed in order; directories are walked in file name
/// order. A path reachable from several scopes is listed once, at its
/// first position.
///
/// # Errors
/// [`CoreError::Io`] for a missing scope, [`CoreError::Pattern`] for an
/// invalid glob, [`CoreError::Walk`] if traversal fails.
pub fn discover<S: AsRef<str>>(scopes: &[S], config: &ScanConfig) -> Result<Vec<PathBuf>, CoreError> {
    let scanner = Scanner::new(config)?;
    let mut found = IndexSet::new();

    for scope in scopes {
        let scope = scope.as_ref();
        if is_pattern(scope) {
            scanner.expand_pattern(scope, &mut found)?;
        } else {
            scanner.collect_path(Path::new(scope), &mut found)?;
        }
    }

    tracing::debug!(scopes = scopes.len(), documents = found.len(), "discovered documents");
    Ok(found.into_iter().collect())
}

struct Scanner {
    extension: String,
    follow_links: bool,
    exclude: GlobSet,
}

impl Scanner {
    fn new(config: &ScanConfig) -> Result<Self, CoreError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.exclude {
            let trimmed = pattern.trim();
            if trimmed.is_empty() {
                continue;
            }
            builder.add(Glob::new(trimmed).map_err(|source| CoreError::Pattern {
                pattern: trimmed.to_string(),
                source,
            })?);
        }
        let exclude = builder.build().map_err(|source| CoreError::Pattern {
            pattern: config.exclude.join(","),
            source,
        })?;
        Ok(Self {
            extension: config.extension.clone(),
            follow_links: config.follow_links,
            exclude,
        })
    }

    fn collect_path(&self, path: &Path, found: &mut IndexSet<PathBuf>) -> Result<(), CoreError> {
        let metadata = std::fs::metadata(path).map_err(|e| CoreError::io_error(path, e))?;
        if metadata.is_dir() {
            for file in self.walk(path) {
                found.insert(file?);
            }
        } else {
            // A file scope is its own walk, based at its directory.
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            if self.accepts(path) && !self.is_excluded(base, path) {
                found.insert(path.to_path_buf());
            }
        }
        Ok(())
    }

    fn expand_pattern(&self, pattern: &str, found: &mut IndexSet<PathBuf>) -> Result<(), CoreError> {
        let matcher = compile(pattern)?;
        let base = literal_base(pattern);
        let relative_to_cwd = base.as_os_str().is_empty();
        let root = if relative_to_cwd { Path::new(".") } else { base.as_path() };

        for file in self.walk(root) {
            let file = file?;
            let candidate = if relative_to_cwd {
                file.strip_prefix(".").map(Path::to_path_buf).unwrap_or(file)
            } else {
                file
            };
            // A matching directory selects everything below it.
            if candidate.ancestors().any(|a| matcher.is_match(a)) {
                found.insert(candidate);
            }
        }
        Ok(())
    }

    fn walk<'s>(&'s self, base: &'s Path) -> impl Iterator<Item = Result<PathBuf, CoreError>> + 's {
        WalkDir::new(base)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !self.is_excluded(base, entry.path()))
            .filter_map(move |entry| match entry {
                Ok(entry) if entry.file_type().is_file() && self.accepts(entry.path()) => {
                    Some(Ok(entry.into_path()))
                }
                Ok(_) => None,
                Err(err) => Some(Err(CoreError::from(err))),
            })
    }

    fn is_excluded(&self, base: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(base).unwrap_or(path);
        !relative.as_os_str().is_empty() && self.exclude.is_match(relative)
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.extension.as_str())
    }
}

fn is_pattern(scope: &str) -> bool {
    scope.contains(['*', '?', '[', '{'])
}

fn compile(pattern: &str) -> Result<GlobMatcher, CoreError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| CoreError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Leading components of `pattern` free of glob syntax
fn literal_base(pattern: &str) -> PathBuf {
    Path::new(pattern)
        .components()
        .take_while(|c| !is_pattern(&c.as_os_str().to_string_lossy()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in [
            "assets/ui/panel.prefab",
            "assets/ui/panel.prefab.meta",
            "assets/ui/button.prefab",
            "assets/scenes/main.prefab",
            "assets/temp/old.prefab",
            "readme.txt",
        ] {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"[]").unwrap();
        }
        dir
    }

    fn relative(dir: &tempfile::TempDir, found: Vec<PathBuf>) -> Vec<String> {
        found
            .into_iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn directory_scope_walks_recursively_in_name_order() {
        let dir = tree();
        let scope = dir.path().join("assets").to_string_lossy().into_owned();

        let found = discover(&[scope], &ScanConfig::default()).unwrap();
        assert_eq!(
            relative(&dir, found),
            vec![
                "assets/scenes/main.prefab",
                "assets/temp/old.prefab",
                "assets/ui/button.prefab",
                "assets/ui/panel.prefab",
            ]
        );
    }

    #[test]
    fn exclude_prunes_relative_paths() {
        let dir = tree();
        let scope = dir.path().join("assets").to_string_lossy().into_owned();
        let config = ScanConfig::new().with_exclude("temp").with_exclude("ui/button.*");

        let found = discover(&[scope], &config).unwrap();
        assert_eq!(
            relative(&dir, found),
            vec!["assets/scenes/main.prefab", "assets/ui/panel.prefab"]
        );
    }

    #[test]
    fn explicit_files_are_filtered_by_extension() {
        let dir = tree();
        let prefab = dir.path().join("assets/ui/panel.prefab").to_string_lossy().into_owned();
        let text = dir.path().join("readme.txt").to_string_lossy().into_owned();

        let found = discover(&[prefab, text], &ScanConfig::default()).unwrap();
        assert_eq!(relative(&dir, found), vec!["assets/ui/panel.prefab"]);
    }

    #[test]
    fn explicit_files_use_the_same_relative_exclude() {
        let dir = tree();
        let button = dir.path().join("assets/ui/button.prefab").to_string_lossy().into_owned();
        let panel = dir.path().join("assets/ui/panel.prefab").to_string_lossy().into_owned();
        let config = ScanConfig::new().with_exclude("button.*");

        let found = discover(&[button.clone(), panel], &config).unwrap();
        assert_eq!(relative(&dir, found), vec!["assets/ui/panel.prefab"]);

        let walked = discover(&[dir.path().join("assets/ui").to_string_lossy().into_owned()], &config).unwrap();
        assert_eq!(relative(&dir, walked), vec!["assets/ui/panel.prefab"]);

        let full_path_glob = ScanConfig::new().with_exclude(button.clone());
        assert_eq!(discover(&[button], &full_path_glob).unwrap().len(), 1);
    }

    #[test]
    fn glob_scope_matches_files_and_directories() {
        let dir = tree();
        let root = dir.path().to_string_lossy().into_owned();

        let files = discover(&[format!("{root}/assets/*/main.prefab")], &ScanConfig::default()).unwrap();
        assert_eq!(relative(&dir, files), vec!["assets/scenes/main.prefab"]);

        let dirs = discover(&[format!("{root}/assets/u?")], &ScanConfig::default()).unwrap();
        assert_eq!(
            relative(&dir, dirs),
            vec!["assets/ui/button.prefab", "assets/ui/panel.prefab"]
        );
    }

    #[test]
    fn overlapping_scopes_are_deduplicated() {
        let dir = tree();
        let ui = dir.path().join("assets/ui").to_string_lossy().into_owned();
        let assets = dir.path().join("assets").to_string_lossy().into_owned();

        let found = discover(&[ui, assets], &ScanConfig::default()).unwrap();
        assert_eq!(
            relative(&dir, found),
            vec![
                "assets/ui/button.prefab",
                "assets/ui/panel.prefab",
                "assets/scenes/main.prefab",
                "assets/temp/old.prefab",
            ]
        );
    }

    #[test]
    fn missing_scope_is_io_error() {
        let dir = tree();
        let missing = dir.path().join("nope").to_string_lossy().into_owned();
        assert!(matches!(
            discover(&[missing], &ScanConfig::default()),
            Err(CoreError::Io { .. })
        ));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = discover(&["assets/[oops"], &ScanConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::Pattern { .. }));
    }

    #[test]
    fn literal_base_stops_at_first_pattern_component() {
        assert_eq!(literal_base("assets/ui/*.prefab"), PathBuf::from("assets/ui"));
        assert_eq!(literal_base("**/*.prefab"), PathBuf::new());
    }
}
