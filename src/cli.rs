use crate::formatter::{FormatRunner, SourceFormatter};
use crate::locator::ExecutableLocator;
use crate::resources::Resources;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Project tooling - format C/C++, CMake and Python sources and build the documentation
#[derive(Parser, Debug)]
#[command(name = "project-tooling")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Folder holding the style files and documentation templates
    #[arg(
        long = "resource-dir",
        value_name = "DIR",
        env = "PROJECT_TOOLING_RESOURCES",
        global = true
    )]
    pub resource_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Available tools
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Format C/C++ files with clang-format
    CppFormat(FormatArgs),
    /// Format CMake files with cmake-format
    CmakeFormat(FormatArgs),
    /// Format Python files with black
    PythonFormat(FormatArgs),
    /// Build the Sphinx documentation of a project
    BuildDoc(BuildDocArgs),
    /// Print a YAML file as a one-line flow mapping
    #[command(name = "yaml2oneline")]
    Yaml2Oneline {
        /// YAML file to convert
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Arguments shared by the formatters
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// List of source files or folders
    #[arg(value_name = "FILE_OR_FOLDER", required = true, num_args = 1..)]
    pub files_or_folders: Vec<PathBuf>,
}

/// Arguments of the documentation build
#[derive(Args, Debug)]
pub struct BuildDocArgs {
    /// Build folder; the documentation goes to <BUILD_DIR>/share/<name>/docs/sphinx
    #[arg(long = "build-dir", value_name = "DIR")]
    pub build_dir: PathBuf,

    /// Project folder to document
    #[arg(long = "package-dir", value_name = "DIR")]
    pub package_dir: PathBuf,

    /// Python package to document instead of the conventional locations
    #[arg(long = "python-dir", value_name = "DIR")]
    pub python_dir: Option<PathBuf>,

    /// Version written in the documentation
    #[arg(long = "project-version", value_name = "VERSION")]
    pub project_version: String,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if let Some(dir) = &args.resource_dir {
        if !dir.is_dir() {
            anyhow::bail!("Resource directory does not exist: {}", dir.display());
        }
    }

    if let Command::BuildDoc(doc) = &args.command {
        if !doc.package_dir.is_dir() {
            anyhow::bail!(
                "Package directory does not exist: {}",
                doc.package_dir.display()
            );
        }
        if let Some(python_dir) = &doc.python_dir {
            if !python_dir.is_dir() {
                anyhow::bail!(
                    "Python package directory does not exist: {}",
                    python_dir.display()
                );
            }
        }
    }

    Ok(args)
}

/// Run the selected tool
pub fn run(args: CliArgs) -> Result<()> {
    use crate::docs::{DocConfig, DocumentationBuilder};
    use crate::formatter::black::BlackFormatter;
    use crate::formatter::clang::ClangFormatter;
    use crate::formatter::cmake::CmakeFormatter;
    use crate::style::load_style_config;

    let resources = match args.resource_dir {
        Some(dir) => Resources::new(dir),
        None => Resources::bundled(),
    };
    debug!("Resources: {}", resources.root().display());
    let locator = ExecutableLocator::new();

    match args.command {
        Command::CppFormat(format_args) => {
            run_formatter(&ClangFormatter, format_args, locator, resources)
        }
        Command::CmakeFormat(format_args) => {
            run_formatter(&CmakeFormatter, format_args, locator, resources)
        }
        Command::PythonFormat(format_args) => {
            run_formatter(&BlackFormatter, format_args, locator, resources)
        }
        Command::BuildDoc(doc) => {
            let config = DocConfig {
                build_dir: doc.build_dir,
                project_dir: doc.package_dir,
                python_package: doc.python_dir,
                project_version: doc.project_version,
            };
            info!("Building the documentation of {}", config.project_dir.display());

            let report = DocumentationBuilder::new(config, resources, locator)
                .build()
                .context("Failed to build the documentation")?;

            info!("Summary:");
            info!("  - Output: {}", report.output_dir.display());
            info!("  - Sections: {:?}", report.sections);
            for failure in &report.tool_failures {
                warn!("  - Failed: {}", failure);
            }
            Ok(())
        }
        Command::Yaml2Oneline { file } => {
            let line = load_style_config(&file)
                .with_context(|| format!("Failed to convert {}", file.display()))?;
            println!("{}", line);
            Ok(())
        }
    }
}

fn run_formatter(
    formatter: &dyn SourceFormatter,
    args: FormatArgs,
    locator: ExecutableLocator,
    resources: Resources,
) -> Result<()> {
    let runner = FormatRunner::new(locator, resources);
    let report = runner
        .run(formatter, &args.files_or_folders)
        .with_context(|| format!("Failed to format {} files", formatter.label()))?;

    if report.is_noop() {
        anyhow::bail!("No {} file to format in the given paths", formatter.label());
    }

    info!("Summary:");
    info!("  - Files formatted: {}", report.files.len());
    for failure in &report.failures {
        warn!("  - Failed: {}", failure);
    }

    Ok(())
}
