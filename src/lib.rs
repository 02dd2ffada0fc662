//! Project tooling - formatting and documentation helpers built on external tools.
//!
//! This library locates third-party command-line tools and drives them over a project:
//! clang-format, cmake-format and black for formatting, and doxygen, breathe-apidoc,
//! sphinx-apidoc and sphinx-build for documentation. The tools themselves are not
//! reimplemented; the library decides which files to hand them, which style to apply and
//! how to assemble their output.
//!
//! # Architecture
//!
//! 1. [`locator`] - Finds executables on the search path
//! 2. [`scanner`] - Resolves files and folders into the set of files to process
//! 3. [`style`] - Flattens YAML style files into one-line flow mappings
//! 4. [`process`] - Describes, logs and runs external commands
//! 5. [`resources`] - Points at the style files and documentation templates
//! 6. [`formatter`] - clang-format, cmake-format and black invocations
//! 7. [`docs`] - Detects the APIs of a project and assembles its Sphinx documentation
//!
//! # Example Usage
//!
//! ```no_run
//! use project_tooling::{
//!     docs::{DocConfig, DocumentationBuilder},
//!     formatter::{FormatRunner, cmake::CmakeFormatter},
//!     locator::ExecutableLocator,
//!     resources::Resources,
//! };
//! use std::path::PathBuf;
//!
//! // Format the CMake files of a project
//! let runner = FormatRunner::new(ExecutableLocator::new(), Resources::bundled());
//! runner.run(&CmakeFormatter, &["./my-project"]).unwrap();
//!
//! // Build its documentation
//! let config = DocConfig {
//!     build_dir: PathBuf::from("./my-project/build"),
//!     project_dir: PathBuf::from("./my-project"),
//!     python_package: None,
//!     project_version: "1.0.0".to_string(),
//! };
//! let report = DocumentationBuilder::new(config, Resources::bundled(), ExecutableLocator::new())
//!     .build()
//!     .unwrap();
//! println!("{}", report.output_dir.display());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI application.

pub mod cli;
pub mod locator;
pub mod scanner;
pub mod style;
pub mod process;
pub mod resources;
pub mod formatter;
pub mod docs;
pub mod fsutil;
pub mod error;
