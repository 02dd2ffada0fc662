//! The external tools of the documentation chain and their command lines.

use crate::error::Result;
use crate::locator::ExecutableLocator;
use crate::process::ToolCommand;
use std::path::{Path, PathBuf};

/// An external documentation tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocTool {
    pub executable: &'static str,
    pub install_hint: &'static str,
}

impl DocTool {
    /// Locates the tool.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::ToolNotFound`] when the tool is not installed.
    pub fn locate(&self, locator: &ExecutableLocator) -> Result<PathBuf> {
        locator.find(&[self.executable], self.install_hint)
    }
}

pub const DOXYGEN: DocTool = DocTool {
    executable: "doxygen",
    install_hint: "(sudo ) apt install doxygen*",
};

pub const BREATHE_APIDOC: DocTool = DocTool {
    executable: "breathe-apidoc",
    install_hint: "(sudo -H) pip3 install breathe",
};

pub const SPHINX_APIDOC: DocTool = DocTool {
    executable: "sphinx-apidoc",
    install_hint: "(sudo -H) pip3 install sphinx",
};

pub const SPHINX_BUILD: DocTool = DocTool {
    executable: "sphinx-build",
    install_hint: "(sudo -H) pip3 install sphinx",
};

/// Kinds of doxygen compounds breathe generates pages for.
pub const BREATHE_GENERATE: &str = "class,interface,struct,union,file,namespace,group";

/// `doxygen <Doxyfile>`, run from the doxygen output folder.
pub fn doxygen_command(doxygen: &Path, doxyfile: &Path, output_dir: &Path) -> ToolCommand {
    ToolCommand::new(doxygen)
        .path_arg(doxyfile)
        .current_dir(output_dir)
}

/// `breathe-apidoc -o <out> <xml> -f -g <kinds>`.
pub fn breathe_apidoc_command(
    breathe: &Path,
    xml_dir: &Path,
    output_dir: &Path,
    doc_build_dir: &Path,
) -> ToolCommand {
    ToolCommand::new(breathe)
        .arg("-o")
        .path_arg(output_dir)
        .path_arg(xml_dir)
        .args(["-f", "-g", BREATHE_GENERATE])
        .current_dir(doc_build_dir)
}

/// `sphinx-apidoc -f -o <out> <package>`.
pub fn sphinx_apidoc_command(sphinx_apidoc: &Path, package: &Path, doc_build_dir: &Path) -> ToolCommand {
    ToolCommand::new(sphinx_apidoc)
        .args(["-f", "-o"])
        .path_arg(doc_build_dir)
        .path_arg(package)
        .current_dir(doc_build_dir)
}

/// `sphinx-build -M html <tree> <tree>`.
pub fn sphinx_build_command(sphinx_build: &Path, doc_build_dir: &Path) -> ToolCommand {
    ToolCommand::new(sphinx_build)
        .args(["-M", "html"])
        .path_arg(doc_build_dir)
        .path_arg(doc_build_dir)
        .current_dir(doc_build_dir)
}
