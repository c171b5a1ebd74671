//! Exclusion rules for packaging.
//!
//! Repository metadata is always left out. User patterns come from the
//! space-separated `ignored-paths` option.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::PackageError;

/// Names excluded at any depth, along with everything below them.
const ALWAYS_EXCLUDED: &[&str] = &[".git", ".github", ".gitignore"];

/// Compiled exclusion rules.
#[derive(Debug, Clone)]
pub struct ExcludeRules {
    glob_set: GlobSet,
    patterns: Vec<String>,
}

impl ExcludeRules {
    /// Rules with only the built-in exclusions.
    pub fn new() -> Result<Self, PackageError> {
        Self::with_patterns(std::iter::empty::<&str>())
    }

    /// Rules from a space-separated pattern list, e.g. `"node_modules *.log"`.
    pub fn from_ignored_paths(ignored_paths: &str) -> Result<Self, PackageError> {
        Self::with_patterns(ignored_paths.split_whitespace())
    }

    /// Built-in exclusions plus `patterns`.
    ///
    /// A pattern matching a directory also excludes its contents.
    pub fn with_patterns<'p>(
        patterns: impl IntoIterator<Item = &'p str>,
    ) -> Result<Self, PackageError> {
        let mut builder = GlobSetBuilder::new();
        for name in ALWAYS_EXCLUDED {
            add_pattern(&mut builder, &format!("**/{name}"))?;
        }

        let mut user = Vec::new();
        for pattern in patterns {
            let pattern = pattern.trim().trim_start_matches("./").trim_end_matches('/');
            if pattern.is_empty() {
                continue;
            }
            add_pattern(&mut builder, pattern)?;
            user.push(pattern.to_string());
        }

        Ok(Self {
            glob_set: builder.build()?,
            patterns: user,
        })
    }

    /// User-supplied patterns, normalized.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether a root-relative path should be left out of the package.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let path = relative.to_string_lossy().replace('\\', "/");
        self.glob_set.is_match(path.as_str())
    }
}

fn add_pattern(builder: &mut GlobSetBuilder, pattern: &str) -> Result<(), PackageError> {
    builder.add(Glob::new(pattern)?);
    builder.add(Glob::new(&format!("{pattern}/**"))?);
    Ok(())
}
