//! Source formatters driven through external tools.
//!
//! Each formatter knows which executable to look for, which files it accepts, where its
//! style comes from and how to assemble the command line. [`FormatRunner`] does the rest:
//! locating the tool, resolving the inputs and running the commands.
//!
//! # Supported Formatters
//!
//! - **C/C++**: See [`clang::ClangFormatter`]
//! - **CMake**: See [`cmake::CmakeFormatter`]
//! - **Python**: See [`black::BlackFormatter`]
//!
//! # Example
//!
//! ```no_run
//! use project_tooling::formatter::{FormatRunner, clang::ClangFormatter};
//! use project_tooling::locator::ExecutableLocator;
//! use project_tooling::resources::Resources;
//!
//! let runner = FormatRunner::new(ExecutableLocator::new(), Resources::bundled());
//! let report = runner.run(&ClangFormatter, &["src", "include"]).unwrap();
//! println!("Formatted {} files", report.files.len());
//! ```

pub mod black;
pub mod clang;
pub mod cmake;

use crate::error::Result;
use crate::locator::ExecutableLocator;
use crate::process::{run_best_effort, ToolCommand};
use crate::resources::Resources;
use crate::scanner::FileSetResolver;
use crate::style::load_style_config;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Where a formatter takes its style from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    /// The tool runs with its own defaults
    Unstyled,
    /// A YAML resource file flattened to one line and passed inline
    Inline(&'static str),
    /// A resource file passed to the tool by path
    ConfigFile(&'static str),
}

/// A style ready to be put on a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Style {
    None,
    Inline(String),
    File(PathBuf),
}

/// Trait for formatters backed by an external executable.
pub trait SourceFormatter {
    /// Human readable name of the formatted language (e.g. `C/C++`)
    fn label(&self) -> &'static str;

    /// Executable names to look for, in order of preference
    fn executables(&self) -> &'static [&'static str];

    /// Command suggested to the user when no executable is found
    fn install_hint(&self) -> &'static str;

    /// Accepted file name suffixes
    fn extensions(&self) -> &'static [&'static str];

    /// Where the style comes from
    fn style(&self) -> StyleKind {
        StyleKind::Unstyled
    }

    /// Builds the commands formatting `files` in place.
    fn commands(&self, executable: &Path, style: &Style, files: &[PathBuf]) -> Vec<ToolCommand>;
}

/// Outcome of one formatter run.
#[derive(Debug, Default)]
pub struct FormatReport {
    /// Files handed to the tool
    pub files: Vec<PathBuf>,
    /// Commands that could not be launched or exited with an error
    pub failures: Vec<String>,
}

impl FormatReport {
    /// True when there was nothing to format.
    pub fn is_noop(&self) -> bool {
        self.files.is_empty()
    }
}

/// Runs [`SourceFormatter`]s.
#[derive(Debug, Clone)]
pub struct FormatRunner {
    locator: ExecutableLocator,
    resources: Resources,
}

impl FormatRunner {
    pub fn new(locator: ExecutableLocator, resources: Resources) -> Self {
        Self { locator, resources }
    }

    /// Formats every accepted file found in `inputs`.
    ///
    /// Failures of the tool itself are logged and listed in the report but do not make
    /// the call fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the executable is not found, the style file is missing or
    /// invalid, or one of the inputs does not exist.
    pub fn run<P: AsRef<Path>>(
        &self,
        formatter: &dyn SourceFormatter,
        inputs: &[P],
    ) -> Result<FormatReport> {
        info!("Formatting {} files...", formatter.label());

        let executable = self
            .locator
            .find(formatter.executables(), formatter.install_hint())?;
        let style = self.resolve_style(formatter.style())?;

        let file_set = FileSetResolver::new(formatter.extensions()).resolve(inputs)?;
        if file_set.is_empty() {
            info!("No {} file to format in the given paths.", formatter.label());
            return Ok(FormatReport::default());
        }

        info!("Formatting:");
        for file in &file_set.files {
            info!("\t{}", file.display());
        }

        let mut report = FormatReport::default();
        for command in formatter.commands(&executable, &style, &file_set.files) {
            if let Some(failure) = run_best_effort(&command, false) {
                report.failures.push(failure);
            }
        }
        report.files = file_set.files;

        info!("Formatting {} files... Done", formatter.label());
        Ok(report)
    }

    fn resolve_style(&self, kind: StyleKind) -> Result<Style> {
        let style = match kind {
            StyleKind::Unstyled => Style::None,
            StyleKind::Inline(name) => {
                let line = load_style_config(&self.resources.file(name)?)?;
                Style::Inline(line)
            }
            StyleKind::ConfigFile(name) => Style::File(self.resources.file(name)?),
        };
        debug!("Using style {:?}", style);
        Ok(style)
    }
}
