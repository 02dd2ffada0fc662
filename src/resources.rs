//! Location of the files shipped alongside the tools: formatter style files and the
//! documentation templates.
//!
//! The directory is an explicit value handed to each component. The binary picks it from
//! `--resource-dir`, the `PROJECT_TOOLING_RESOURCES` environment variable, or falls back
//! to [`Resources::bundled`].

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Style file for clang-format.
pub const CLANG_FORMAT_STYLE: &str = "_clang-format";
/// Style file for cmake-format.
pub const CMAKE_FORMAT_STYLE: &str = "_cmake-format.yaml";

/// Doxygen configuration template.
pub const DOXYFILE_TEMPLATE: &str = "sphinx/doxygen/Doxyfile.in";
/// Sphinx configuration template.
pub const CONF_PY_TEMPLATE: &str = "sphinx/sphinx/conf.py.in";
/// Main page template.
pub const INDEX_TEMPLATE: &str = "sphinx/sphinx/index.rst.in";
/// CMake module page template.
pub const CMAKE_DOC_TEMPLATE: &str = "sphinx/sphinx/cmake_doc.rst.in";
/// Free-form documentation page template.
pub const GENERAL_DOC_TEMPLATE: &str = "sphinx/sphinx/general_documentation.rst.in";
/// C++ API entry page.
pub const DOXYGEN_INDEX_TEMPLATE: &str = "sphinx/sphinx/doxygen_index.rst.in";
/// C++ API single page listing.
pub const DOXYGEN_INDEX_ONE_PAGE_TEMPLATE: &str = "sphinx/sphinx/doxygen_index_one_page.rst.in";

/// Root directory of the resource files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    root: PathBuf,
}

impl Resources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The `resources/` directory of this package.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/resources"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of `relative` inside the resource directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] when the file does not exist.
    pub fn file(&self, relative: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::ResourceNotFound(path))
        }
    }
}
