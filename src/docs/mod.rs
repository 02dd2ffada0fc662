//! Documentation assembly.
//!
//! The [`DocumentationBuilder`] inspects a project, runs the generator matching each API
//! it finds and stitches the results into one Sphinx tree:
//!
//! 1. the output folder `<build>/share/<name>/docs/sphinx` is emptied,
//! 2. C/C++ sources are documented through doxygen and breathe-apidoc,
//! 3. a Python package is documented through sphinx-apidoc,
//! 4. CMake modules get a page listing each of them,
//! 5. a `doc/` or `docs/` folder is copied in,
//! 6. `index.rst` and 7. `conf.py` are rendered from templates,
//! 8. the readme and license are copied,
//! 9. sphinx-build renders the html.
//!
//! A missing tool stops the build; a tool that runs and fails does not.

pub mod layout;
pub mod template;
pub mod tools;

use crate::error::{Error, Result};
use crate::fsutil::{copy_dir_recursive, reset_dir};
use crate::locator::ExecutableLocator;
use crate::process::{run_best_effort, ToolCommand};
use crate::resources::{self, Resources};
use layout::ProjectLayout;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use template::Template;

/// Patterns doxygen uses to pick the files to parse.
pub const DOXYGEN_FILE_PATTERNS: &str = "*.h *.hpp *.hh *.cpp *.c *.cc *.hxx *.cxx";

const CPP_API_SECTION: &str = "C++ API\n-------\n\n.. toctree::\n   :maxdepth: 2\n\n   doxygen_index\n\n";
const PYTHON_API_SECTION: &str =
    "Python API\n----------\n\n* :ref:`modindex`\n\n.. toctree::\n   :maxdepth: 3\n\n   modules\n\n";
const CMAKE_API_SECTION: &str = "CMake API\n---------\n\n.. toctree::\n   :maxdepth: 3\n\n   cmake_doc\n\n";
const README_TOCTREE: &str = ".. toctree::\n   :maxdepth: 2\n\n   readme\n\n";
const LICENSE_SECTION: &str = "License\n-------\n\n.. literalinclude:: license.txt\n\n";
const GENERAL_DOCUMENTATION_SECTION: &str = "General Documentation\n---------------------\n\n\
     .. toctree::\n   :maxdepth: 2\n\n   general_documentation\n\n";

/// Inputs of a documentation build.
#[derive(Debug, Clone)]
pub struct DocConfig {
    /// Build folder; the tree goes to `<build_dir>/share/<name>/docs/sphinx`
    pub build_dir: PathBuf,
    /// Project to document
    pub project_dir: PathBuf,
    /// Python package to document instead of the conventional locations
    pub python_package: Option<PathBuf>,
    /// Version written to `conf.py`
    pub project_version: String,
}

impl DocConfig {
    /// Folder receiving the documentation tree of project `name`.
    pub fn output_dir(&self, name: &str) -> PathBuf {
        self.build_dir
            .join("share")
            .join(name)
            .join("docs")
            .join("sphinx")
    }
}

/// Sections of the main page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiSection {
    GeneralDocumentation,
    Cpp,
    Python,
    Cmake,
}

/// Summary of a documentation build.
#[derive(Debug)]
pub struct DocReport {
    /// Folder holding the assembled tree
    pub output_dir: PathBuf,
    /// What was found in the project
    pub layout: ProjectLayout,
    /// Sections present in `index.rst`
    pub sections: Vec<ApiSection>,
    /// Tools that failed to launch or exited with an error
    pub tool_failures: Vec<String>,
}

/// Builds the documentation of one project.
#[derive(Debug, Clone)]
pub struct DocumentationBuilder {
    config: DocConfig,
    resources: Resources,
    locator: ExecutableLocator,
}

impl DocumentationBuilder {
    pub fn new(config: DocConfig, resources: Resources, locator: ExecutableLocator) -> Self {
        Self {
            config,
            resources,
            locator,
        }
    }

    /// Assembles the tree and renders it to html.
    ///
    /// # Errors
    ///
    /// See [`DocumentationBuilder::compose`]; additionally fails if `sphinx-build` is not
    /// installed.
    pub fn build(&self) -> Result<DocReport> {
        let mut report = self.compose()?;

        info!("Rendering html with sphinx-build...");
        let sphinx_build = tools::SPHINX_BUILD.locate(&self.locator)?;
        let command = tools::sphinx_build_command(&sphinx_build, &report.output_dir);
        self.run_tool(&command, &mut report.tool_failures);

        info!(
            "Documentation available in {}",
            report.output_dir.join("html").display()
        );
        Ok(report)
    }

    /// Assembles the Sphinx tree without rendering it.
    ///
    /// # Errors
    ///
    /// Returns an error if the project folder does not exist, a template is missing, a
    /// tool needed for a detected API is not installed, or the tree cannot be written.
    pub fn compose(&self) -> Result<DocReport> {
        let project_dir = self.config.project_dir.as_path();
        if !project_dir.is_dir() {
            return Err(Error::PathNotFound(project_dir.to_path_buf()));
        }
        let project_dir = project_dir.canonicalize()?;
        let name = project_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| Error::InvalidProject(format!("cannot name project at {}", project_dir.display())))?;

        // Step 1: fresh output folder
        let output_dir = self.config.output_dir(&name);
        info!("Preparing {}", output_dir.display());
        reset_dir(&output_dir)?;
        let output_dir = output_dir.canonicalize()?;

        let mut excluded = vec![output_dir.clone()];
        let build_dir = self.config.build_dir.canonicalize()?;
        if build_dir != project_dir && build_dir.starts_with(&project_dir) {
            excluded.push(build_dir);
        }

        info!("Inspecting project {}...", name);
        let layout = ProjectLayout::detect(
            &project_dir,
            self.config.python_package.as_deref(),
            &excluded,
        )?;

        let mut report = DocReport {
            output_dir,
            layout,
            sections: Vec::new(),
            tool_failures: Vec::new(),
        };

        // Steps 2 to 5: one section per detected API
        let cpp_api = self.document_cpp_api(&mut report)?;
        let python_api = self.document_python_api(&mut report)?;
        let cmake_api = self.document_cmake_api(&mut report)?;
        let general_documentation = self.document_general_documentation(&mut report)?;

        // Step 6: main page
        let header = format!("Welcome to {}'s documentation!", report.layout.name);
        let header = format!("{}\n{}\n", header, "=".repeat(header.chars().count()));
        let license = if report.layout.license.is_some() {
            LICENSE_SECTION
        } else {
            ""
        };
        Template::load(&self.resources.file(resources::INDEX_TEMPLATE)?)?
            .set("HEADER", &header)
            .set("README", &readme_section(report.layout.readme.as_deref()))
            .set("GENERAL_DOCUMENTATION", general_documentation)
            .set("CPP_API", cpp_api)
            .set("PYTHON_API", python_api)
            .set("CMAKE_API", cmake_api)
            .set("LICENSE", license)
            .write_to(&report.output_dir.join("index.rst"))?;

        // Step 7: sphinx configuration
        let python_path = report
            .layout
            .python_package
            .as_deref()
            .and_then(Path::parent)
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        Template::load(&self.resources.file(resources::CONF_PY_TEMPLATE)?)?
            .set("PROJECT_SOURCE_DIR", &report.layout.root.display().to_string())
            .set("PROJECT_NAME", &report.layout.name)
            .set("PROJECT_VERSION", &self.config.project_version)
            .set(
                "DOXYGEN_XML_OUTPUT",
                &report.output_dir.join("doxygen").join("xml").display().to_string(),
            )
            .set("PYTHON_PATH", &python_path)
            .write_to(&report.output_dir.join("conf.py"))?;

        // Step 8: readme and license
        copy_optional(report.layout.readme.as_deref(), &report.output_dir, None, "readme")?;
        copy_optional(
            report.layout.license.as_deref(),
            &report.output_dir,
            Some("license.txt"),
            "license",
        )?;

        info!("Sections: {:?}", report.sections);
        Ok(report)
    }

    fn document_cpp_api(&self, report: &mut DocReport) -> Result<&'static str> {
        if !report.layout.has_cpp_api() {
            debug!("No C/C++ file found");
            return Ok("");
        }
        info!(
            "Documenting the C++ API ({} files)...",
            report.layout.cpp_sources.len()
        );

        let doxygen = tools::DOXYGEN.locate(&self.locator)?;
        let breathe = tools::BREATHE_APIDOC.locate(&self.locator)?;
        let out = report.output_dir.clone();

        fs::copy(
            self.resources.file(resources::DOXYGEN_INDEX_ONE_PAGE_TEMPLATE)?,
            out.join("doxygen_index_one_page.rst"),
        )?;
        fs::copy(
            self.resources.file(resources::DOXYGEN_INDEX_TEMPLATE)?,
            out.join("doxygen_index.rst"),
        )?;

        let doxygen_output = out.join("doxygen");
        let doxyfile = doxygen_output.join("Doxyfile");
        Template::load(&self.resources.file(resources::DOXYFILE_TEMPLATE)?)?
            .set("PROJECT_NAME", &report.layout.name)
            .set("PROJECT_SOURCE_DIR", &report.layout.root.display().to_string())
            .set("DOXYGEN_FILE_PATTERNS", DOXYGEN_FILE_PATTERNS)
            .set("DOXYGEN_OUTPUT", &doxygen_output.display().to_string())
            .write_to(&doxyfile)?;

        let doxygen_run = tools::doxygen_command(&doxygen, &doxyfile, &doxygen_output);
        self.run_tool(&doxygen_run, &mut report.tool_failures);

        let breathe_run = tools::breathe_apidoc_command(
            &breathe,
            &doxygen_output.join("xml"),
            &out.join("breathe_apidoc"),
            &out,
        );
        self.run_tool(&breathe_run, &mut report.tool_failures);

        report.sections.push(ApiSection::Cpp);
        Ok(CPP_API_SECTION)
    }

    fn document_python_api(&self, report: &mut DocReport) -> Result<&'static str> {
        let Some(package) = report.layout.python_package.clone() else {
            info!("No python module for sphinx-apidoc to parse.");
            return Ok("");
        };
        info!("Documenting the Python API of {}...", package.display());

        let sphinx_apidoc = tools::SPHINX_APIDOC.locate(&self.locator)?;
        let command = tools::sphinx_apidoc_command(&sphinx_apidoc, &package, &report.output_dir);
        self.run_tool(&command, &mut report.tool_failures);

        report.sections.push(ApiSection::Python);
        Ok(PYTHON_API_SECTION)
    }

    fn document_cmake_api(&self, report: &mut DocReport) -> Result<&'static str> {
        if !report.layout.has_cmake_api() {
            debug!("No CMake module found");
            return Ok("");
        }
        info!(
            "Documenting the CMake API ({} modules)...",
            report.layout.cmake_modules.len()
        );

        let modules: String = report
            .layout
            .cmake_modules
            .iter()
            .map(|module| cmake_module_entry(module))
            .collect();
        Template::load(&self.resources.file(resources::CMAKE_DOC_TEMPLATE)?)?
            .set("DOC_CMAKE_MODULE", &modules)
            .write_to(&report.output_dir.join("cmake_doc.rst"))?;

        copy_dir_recursive(
            &report.layout.root.join("cmake"),
            &report.output_dir.join("cmake"),
        )?;

        report.sections.push(ApiSection::Cmake);
        Ok(CMAKE_API_SECTION)
    }

    fn document_general_documentation(&self, report: &mut DocReport) -> Result<&'static str> {
        let Some(doc_dir) = report.layout.doc_dir.clone() else {
            debug!("No general documentation folder found");
            return Ok("");
        };
        let dir_name = doc_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "doc".to_string());
        info!("Adding the general documentation from {}...", doc_dir.display());

        copy_dir_recursive(&doc_dir, &report.output_dir.join(&dir_name))?;
        Template::load(&self.resources.file(resources::GENERAL_DOC_TEMPLATE)?)?
            .set("GENERAL_DOCUMENTATION_DIR", &dir_name)
            .write_to(&report.output_dir.join("general_documentation.rst"))?;

        report.sections.push(ApiSection::GeneralDocumentation);
        Ok(GENERAL_DOCUMENTATION_SECTION)
    }

    fn run_tool(&self, command: &ToolCommand, failures: &mut Vec<String>) {
        if let Some(failure) = run_best_effort(command, true) {
            failures.push(failure);
        }
    }
}

/// Section of `cmake_doc.rst` documenting one module.
fn cmake_module_entry(module: &Path) -> String {
    let stem = module
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_name = module
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    format!(
        "{}\n{}\n\n.. cmake-module:: cmake/{}\n\n",
        stem,
        "-".repeat(stem.chars().count()),
        file_name
    )
}

/// Name the readme is copied under: its own name, lower-cased.
fn readme_file_name(readme: &Path) -> String {
    readme
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "readme".to_string())
}

/// Main page entry for the readme; only Markdown and reStructuredText are parsed.
fn readme_section(readme: Option<&Path>) -> String {
    let Some(readme) = readme else {
        return String::new();
    };
    let name = readme_file_name(readme);
    if name.ends_with(".md") || name.ends_with(".rst") {
        README_TOCTREE.to_string()
    } else {
        format!("Readme\n------\n\n.. literalinclude:: {}\n\n", name)
    }
}

/// Copies `source` into `dest_dir` under `dest_name`, or its own lower-cased name.
fn copy_optional(
    source: Option<&Path>,
    dest_dir: &Path,
    dest_name: Option<&str>,
    what: &str,
) -> Result<()> {
    let Some(source) = source else {
        warn!("No {} file found in the project, skipping it", what);
        return Ok(());
    };
    let name = match dest_name {
        Some(name) => name.to_string(),
        None => readme_file_name(source),
    };
    debug!("Copying {} to {}", source.display(), dest_dir.join(&name).display());
    fs::copy(source, dest_dir.join(name))?;
    Ok(())
}
