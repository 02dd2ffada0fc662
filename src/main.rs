//! Project tooling - command-line front end.
//!
//! Formats C/C++, CMake and Python sources with clang-format, cmake-format and black,
//! and builds a project's Sphinx documentation out of doxygen, breathe and sphinx-apidoc
//! output.
//!
//! # Usage
//!
//! ```bash
//! project-tooling [OPTIONS] <COMMAND>
//! ```
//!
//! # Examples
//!
//! Format the C++ sources of a project:
//! ```bash
//! project-tooling cpp-format include src tests
//! ```
//!
//! Build the documentation:
//! ```bash
//! project-tooling build-doc --build-dir build --package-dir . --project-version 1.0.0
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! project-tooling -v cmake-format CMakeLists.txt cmake
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use project_tooling::cli;

fn main() -> Result<()> {
    // The verbose flag is needed before the logger exists, validation logs after.
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Project tooling starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    cli::run(args)?;

    Ok(())
}
