use crate::error::{Error, Result};
use crate::scanner::FileSetResolver;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffixes of the C/C++ files doxygen is pointed at.
pub const CPP_SUFFIXES: &[&str] = &[".h", ".hpp", ".hh", ".c", ".cc", ".cpp", ".hxx", ".cxx"];

/// Lower-cased file names accepted as the project readme, in order of preference.
const README_NAMES: &[&str] = &["readme.md", "readme.rst", "readme.txt", "readme"];
/// Lower-cased file names accepted as the project license, in order of preference.
const LICENSE_NAMES: &[&str] = &["license", "license.txt", "license.md"];
/// Folder names holding free-form documentation, in order of preference.
const DOC_DIR_NAMES: &[&str] = &["doc", "docs"];

/// A location where something may live, checked by a predicate.
struct Candidate {
    path: PathBuf,
    accept: fn(&Path) -> bool,
}

impl Candidate {
    fn new(path: PathBuf, accept: fn(&Path) -> bool) -> Self {
        Self { path, accept }
    }
}

/// Returns the first candidate accepted by its predicate.
fn first_match(candidates: Vec<Candidate>) -> Option<PathBuf> {
    candidates.into_iter().find_map(|candidate| {
        let accepted = (candidate.accept)(&candidate.path);
        debug!(
            "Candidate {}: {}",
            candidate.path.display(),
            if accepted { "accepted" } else { "rejected" }
        );
        accepted.then_some(candidate.path)
    })
}

fn is_python_package(path: &Path) -> bool {
    path.join("__init__.py").is_file()
}

fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

/// What a project offers to document.
///
/// Computed once per documentation build by inspecting the project directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Absolute project directory
    pub root: PathBuf,
    /// Project name, i.e. the last component of `root`
    pub name: String,
    /// C/C++ sources and headers found anywhere below `root`
    pub cpp_sources: Vec<PathBuf>,
    /// Python package folder
    pub python_package: Option<PathBuf>,
    /// CMake modules directly inside `root/cmake`, sorted by file name
    pub cmake_modules: Vec<PathBuf>,
    /// Free-form documentation folder
    pub doc_dir: Option<PathBuf>,
    /// Readme file at the project root
    pub readme: Option<PathBuf>,
    /// License file at the project root
    pub license: Option<PathBuf>,
}

impl ProjectLayout {
    /// Inspects `root`.
    ///
    /// `python_override` is tried before the conventional package locations
    /// (`python/<name>`, `src/<name>`, `<name>`); it only needs to be a folder, while the
    /// conventional locations must hold an `__init__.py`. A relative override is anchored
    /// to the current working directory. Folders listed in `excluded`
    /// are not searched for C/C++ files.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not an existing folder with a name, or cannot be
    /// read.
    pub fn detect(root: &Path, python_override: Option<&Path>, excluded: &[PathBuf]) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }
        let root = root.canonicalize()?;
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                Error::InvalidProject(format!("cannot name project at {}", root.display()))
            })?;
        debug!("Inspecting project {} at {}", name, root.display());

        let resolver = excluded
            .iter()
            .fold(FileSetResolver::new(CPP_SUFFIXES), |resolver, dir| resolver.exclude(dir));
        let cpp_sources = resolver.resolve(&[&root])?.files;

        let mut python_candidates = Vec::new();
        if let Some(path) = python_override {
            // Tools run from the output folder, so a relative override must be pinned here.
            python_candidates.push(Candidate::new(std::path::absolute(path)?, is_dir));
        }
        python_candidates.push(Candidate::new(root.join("python").join(&name), is_python_package));
        python_candidates.push(Candidate::new(root.join("src").join(&name), is_python_package));
        python_candidates.push(Candidate::new(root.join(&name), is_python_package));
        let python_package = first_match(python_candidates);

        let doc_dir = first_match(
            DOC_DIR_NAMES
                .iter()
                .map(|dir| Candidate::new(root.join(dir), is_dir))
                .collect(),
        );

        let cmake_modules = find_cmake_modules(&root.join("cmake"))?;

        let root_entries = sorted_files(&root)?;
        let readme = find_named(&root_entries, README_NAMES);
        let license = find_named(&root_entries, LICENSE_NAMES);

        Ok(Self {
            root,
            name,
            cpp_sources,
            python_package,
            cmake_modules,
            doc_dir,
            readme,
            license,
        })
    }

    pub fn has_cpp_api(&self) -> bool {
        !self.cpp_sources.is_empty()
    }

    pub fn has_cmake_api(&self) -> bool {
        !self.cmake_modules.is_empty()
    }
}

fn find_cmake_modules(cmake_dir: &Path) -> Result<Vec<PathBuf>> {
    if !cmake_dir.is_dir() {
        return Ok(Vec::new());
    }
    let resolver = FileSetResolver::new(&[".cmake", "CMakeLists.txt"]);
    Ok(sorted_files(cmake_dir)?
        .into_iter()
        .filter(|path| resolver.accepts(path))
        .collect())
}

/// Regular files directly inside `dir`, sorted by file name.
fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// First name of `names` matching one of `files` case-insensitively.
fn find_named(files: &[PathBuf], names: &[&str]) -> Option<PathBuf> {
    names.iter().find_map(|wanted| {
        files
            .iter()
            .find(|path| {
                path.file_name()
                    .map(|n| n.to_string_lossy().to_lowercase() == *wanted)
                    .unwrap_or(false)
            })
            .cloned()
    })
}
