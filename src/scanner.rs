use crate::error::{Error, Result};
use log::{debug, warn};
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolver turning a list of files and folders into the set of files to process.
///
/// Each input must exist. Files are kept when their name ends with one of the accepted
/// suffixes; folders are walked recursively and every matching file inside is kept.
///
/// # Example
///
/// ```no_run
/// use project_tooling::scanner::FileSetResolver;
///
/// let resolver = FileSetResolver::new(&[".h", ".cpp"]);
/// let file_set = resolver.resolve(&["src", "include/foo.h"]).unwrap();
/// println!("Found {} files", file_set.files.len());
/// ```
#[derive(Debug, Clone)]
pub struct FileSetResolver {
    suffixes: Vec<String>,
    excluded: Vec<PathBuf>,
}

/// Result of a resolution.
#[derive(Debug, Default)]
pub struct FileSet {
    /// Absolute paths of the accepted files, in traversal order
    pub files: Vec<PathBuf>,
    /// Warning messages for entries that could not be read during the walk
    pub warnings: Vec<String>,
}

impl FileSet {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

impl FileSetResolver {
    /// Creates a resolver accepting files whose name ends with one of `suffixes`.
    ///
    /// A suffix is matched against the whole file name, so `CMakeLists.txt` works just
    /// like `.cmake`.
    pub fn new<S: AsRef<str>>(suffixes: &[S]) -> Self {
        Self {
            suffixes: suffixes.iter().map(|s| s.as_ref().to_string()).collect(),
            excluded: Vec::new(),
        }
    }

    /// Skips the subtree rooted at `dir` while walking folders.
    pub fn exclude(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded.push(dir.into());
        self
    }

    /// Returns true if `path` names a file with an accepted suffix.
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }

    /// Resolves `inputs` into a [`FileSet`].
    ///
    /// All inputs are checked before any folder is walked, so a typo in the last argument
    /// fails the whole call without partial work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] with the input as given when it names neither an
    /// existing file nor an existing folder.
    pub fn resolve<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<FileSet> {
        let resolved = inputs
            .iter()
            .map(|input| absolute_existing_path(input.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut file_set = FileSet::default();
        let mut seen = HashSet::new();

        for path in resolved {
            if path.is_file() {
                if self.accepts(&path) && seen.insert(path.clone()) {
                    file_set.files.push(path);
                } else {
                    debug!("Ignoring {}", path.display());
                }
            } else if path.is_dir() {
                self.walk(&path, &mut file_set, &mut seen);
            }
        }

        debug!("Resolved {} files", file_set.files.len());
        Ok(file_set)
    }

    fn walk(&self, root: &Path, file_set: &mut FileSet, seen: &mut HashSet<PathBuf>) {
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| !self.excluded.iter().any(|ex| e.path() == ex.as_path()));

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    // Links to files count, links to folders are not followed.
                    if path.is_file()
                        && self.accepts(path)
                        && seen.insert(path.to_path_buf())
                    {
                        file_set.files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    file_set.warnings.push(warning);
                }
            }
        }
    }
}

/// Returns `input` as an absolute path if it names an existing file or folder.
///
/// Relative inputs are anchored to the current working directory.
///
/// # Errors
///
/// Returns [`Error::PathNotFound`] when nothing exists at `input`.
pub fn absolute_existing_path(input: &Path) -> Result<PathBuf> {
    let candidate = if input.is_absolute() {
        input.to_path_buf()
    } else {
        env::current_dir()?.join(input)
    };

    if candidate.is_file() || candidate.is_dir() {
        Ok(candidate)
    } else {
        Err(Error::PathNotFound(input.to_path_buf()))
    }
}
