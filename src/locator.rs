//! Lookup of external executables on the command search path.

use crate::error::{Error, Result};
use log::{debug, warn};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Finds external tools on a search path.
///
/// By default the process `PATH` is searched. Tests and callers that want to pin the
/// tool set can provide an explicit search path instead.
///
/// # Example
///
/// ```no_run
/// use project_tooling::locator::ExecutableLocator;
///
/// let locator = ExecutableLocator::new();
/// let clang = locator
///     .find(&["clang-format", "clang-format-8"], "sudo apt-get install clang-format")
///     .unwrap();
/// println!("{}", clang.display());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExecutableLocator {
    search_path: Option<OsString>,
}

impl ExecutableLocator {
    /// Creates a locator searching the process `PATH`.
    pub fn new() -> Self {
        Self { search_path: None }
    }

    /// Creates a locator searching only the given directories.
    ///
    /// A directory that cannot appear in a search path (it contains the path separator)
    /// is skipped with a warning; the remaining directories are still searched.
    pub fn with_search_path<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let usable: Vec<PathBuf> = dirs
            .into_iter()
            .map(|d| d.as_ref().to_path_buf())
            .filter(|dir| match env::join_paths([dir]) {
                Ok(_) => true,
                Err(e) => {
                    warn!("Skipping {} from the search path: {}", dir.display(), e);
                    false
                }
            })
            .collect();
        let joined = env::join_paths(&usable).unwrap_or_default();
        Self {
            search_path: Some(joined),
        }
    }

    /// Returns the absolute path of the first candidate found on the search path.
    ///
    /// Candidates are tried in order; several names are useful when a tool is installed
    /// under a versioned name (`clang-format-8`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] naming the first candidate and carrying
    /// `install_hint` when none of the candidates resolves.
    pub fn find(&self, candidates: &[&str], install_hint: &str) -> Result<PathBuf> {
        for name in candidates {
            if let Some(path) = self.lookup(name) {
                debug!("Found {} at {}", name, path.display());
                return Ok(path);
            }
            debug!("{} not found on the search path", name);
        }

        Err(Error::ToolNotFound {
            tool: candidates.first().copied().unwrap_or_default().to_string(),
            hint: install_hint.to_string(),
        })
    }

    fn lookup(&self, name: &str) -> Option<PathBuf> {
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = env::current_dir().ok()?;
                which::which_in(name, Some(paths), cwd)
            }
            None => which::which(name),
        };
        let path = found.ok()?;
        std::path::absolute(&path).ok()
    }
}
