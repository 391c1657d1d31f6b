//! Source file discovery with include/exclude filtering.

use miette::Diagnostic;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Extensions checked when no include filter is given.
pub const DEFAULT_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx"];

/// Errors raised while resolving the input paths of a run.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum PathError {
    /// A named root does not exist.
    #[error("path does not exist: {path}")]
    #[diagnostic(code(ncc::path::not_found))]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A directory was named without recursion enabled.
    #[error("{path} is a directory")]
    #[diagnostic(
        code(ncc::path::is_directory),
        help("pass --recurse to descend into directories")
    )]
    IsDirectory {
        /// The directory.
        path: PathBuf,
    },

    /// Walking a directory tree failed.
    #[error("failed to walk {root}: {source}")]
    #[diagnostic(code(ncc::path::walk))]
    Walk {
        /// Root being walked.
        root: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },

    /// An include or exclude filter is not a valid glob.
    #[error("invalid glob `{pattern}`: {source}")]
    #[diagnostic(code(ncc::path::glob))]
    Glob {
        /// The filter as given.
        pattern: String,
        /// Underlying glob error.
        source: glob::PatternError,
    },
}

/// Include/exclude glob filters.
///
/// Exclude filters win: a path matching any of them is never selected.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    include: Vec<glob::Pattern>,
    exclude: Vec<glob::Pattern>,
}

impl FileFilter {
    /// Compiles the filters. An include entry written as a bare extension
    /// (`.cpp`) is treated as `*.cpp`.
    ///
    /// # Errors
    ///
    /// Returns an error if any filter is not a valid glob.
    pub fn new<I, E, S, T>(include: I, exclude: E) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let include = include
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                if p.starts_with('.') && !p.contains(['/', '*']) {
                    compile_glob(&format!("*{p}"))
                } else {
                    compile_glob(p)
                }
            })
            .collect::<Result<_, _>>()?;
        let exclude = exclude
            .into_iter()
            .map(|p| compile_glob(p.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(Self { include, exclude })
    }

    /// Returns true if `path` matches an exclude filter, by basename or by
    /// its path relative to `root`.
    #[must_use]
    pub fn is_excluded(&self, path: &Path, root: &Path) -> bool {
        let name = path.file_name().map(|n| n.to_string_lossy());
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.exclude.iter().any(|pattern| {
            name.as_deref().is_some_and(|n| pattern.matches(n)) || pattern.matches_path(relative)
        })
    }

    /// Returns true if a file should be analysed.
    #[must_use]
    pub fn accepts(&self, path: &Path, root: &Path) -> bool {
        if self.is_excluded(path, root) {
            return false;
        }
        if self.include.is_empty() {
            return path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| DEFAULT_EXTENSIONS.contains(&e));
        }
        let name = path.file_name().map(|n| n.to_string_lossy());
        self.include
            .iter()
            .any(|pattern| name.as_deref().is_some_and(|n| pattern.matches(n)))
    }
}

fn compile_glob(pattern: &str) -> Result<glob::Pattern, PathError> {
    glob::Pattern::new(pattern).map_err(|source| PathError::Glob {
        pattern: pattern.to_string(),
        source,
    })
}

/// Selects the files to analyse.
///
/// Roots are processed in the given order. Within a directory root, files
/// come out in lexicographic path order. A file reached twice is yielded
/// once, at its first position.
///
/// # Errors
///
/// Returns an error if a root does not exist, if a root is a directory and
/// `recursive` is false, or if a directory cannot be walked.
pub fn discover(
    roots: &[PathBuf],
    recursive: bool,
    filter: &FileFilter,
) -> Result<Vec<PathBuf>, PathError> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for root in roots {
        if !root.exists() {
            return Err(PathError::NotFound { path: root.clone() });
        }

        if root.is_file() {
            let parent = root.parent().unwrap_or_else(|| Path::new(""));
            if filter.accepts(root, parent) {
                if seen.insert(root.clone()) {
                    files.push(root.clone());
                }
            } else {
                debug!("Filtered out: {}", root.display());
            }
            continue;
        }

        if !recursive {
            return Err(PathError::IsDirectory { path: root.clone() });
        }

        for path in walk(root, filter)? {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn walk(root: &Path, filter: &FileFilter) -> Result<Vec<PathBuf>, PathError> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() > 0 && entry.file_type().is_dir() && filter.is_excluded(entry.path(), root)
            {
                debug!("Pruning excluded directory: {}", entry.path().display());
                return false;
            }
            true
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| PathError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if filter.accepts(entry.path(), root) {
            files.push(entry.into_path());
        } else {
            debug!("Filtered out: {}", entry.path().display());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree(files: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for f in files {
            let path = dir.path().join(f);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        dir
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    fn no_filters() -> FileFilter {
        FileFilter::default()
    }

    #[test]
    fn default_extensions_only() {
        let dir = tree(&["a.cpp", "b.h", "notes.txt", "Makefile"]);
        let files = discover(&[dir.path().to_path_buf()], true, &no_filters()).unwrap();
        assert_eq!(names(dir.path(), &files), ["a.cpp", "b.h"]);
    }

    #[test]
    fn exclude_takes_precedence_over_default_include() {
        let dir = tree(&["a.cpp", "a.hpp", "a.h"]);
        let filter = FileFilter::new(Vec::<String>::new(), ["*.cpp", "*.h"]).unwrap();
        let files = discover(&[dir.path().to_path_buf()], true, &filter).unwrap();
        assert_eq!(names(dir.path(), &files), ["a.hpp"]);
    }

    #[test]
    fn exclude_takes_precedence_over_explicit_include() {
        let dir = tree(&["a.cpp", "b.cpp"]);
        let filter = FileFilter::new(["*.cpp"], ["b.cpp"]).unwrap();
        let files = discover(&[dir.path().to_path_buf()], true, &filter).unwrap();
        assert_eq!(names(dir.path(), &files), ["a.cpp"]);
    }

    #[test]
    fn include_restricts_and_accepts_bare_extension() {
        let dir = tree(&["a.cpp", "b.c", "c.cxx"]);
        let filter = FileFilter::new([".c", "*.cxx"], Vec::<String>::new()).unwrap();
        let files = discover(&[dir.path().to_path_buf()], true, &filter).unwrap();
        assert_eq!(names(dir.path(), &files), ["b.c", "c.cxx"]);
    }

    #[test]
    fn excluded_directory_is_pruned() {
        let dir = tree(&["src/a.cpp", "third_party/x.cpp", "third_party/y/z.h"]);
        let filter = FileFilter::new(Vec::<String>::new(), ["third_party"]).unwrap();
        let files = discover(&[dir.path().to_path_buf()], true, &filter).unwrap();
        assert_eq!(names(dir.path(), &files), ["src/a.cpp"]);
    }

    #[test]
    fn walk_order_is_lexicographic_and_stable() {
        let dir = tree(&["z.cpp", "b/b.cpp", "a.cpp", "b/a.h"]);
        let roots = [dir.path().to_path_buf()];
        let first = discover(&roots, true, &no_filters()).unwrap();
        let second = discover(&roots, true, &no_filters()).unwrap();
        assert_eq!(first, second);
        assert_eq!(names(dir.path(), &first), ["a.cpp", "b/a.h", "b/b.cpp", "z.cpp"]);
    }

    #[test]
    fn roots_keep_given_order_without_duplicates() {
        let dir = tree(&["a.cpp", "b.cpp"]);
        let a = dir.path().join("a.cpp");
        let b = dir.path().join("b.cpp");
        let files = discover(&[b.clone(), a.clone(), b.clone()], false, &no_filters()).unwrap();
        assert_eq!(files, [b, a]);
    }

    #[test]
    fn directory_without_recursion_is_error() {
        let dir = tree(&["a.cpp"]);
        let err = discover(&[dir.path().to_path_buf()], false, &no_filters()).unwrap_err();
        assert!(matches!(err, PathError::IsDirectory { .. }));
    }

    #[test]
    fn missing_root_is_error() {
        let dir = tree(&[]);
        let err = discover(&[dir.path().join("nope.cpp")], false, &no_filters()).unwrap_err();
        assert!(matches!(err, PathError::NotFound { .. }));
    }

    #[test]
    fn invalid_glob_is_error() {
        let err = FileFilter::new(["[a-"], Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, PathError::Glob { .. }));
    }
}
