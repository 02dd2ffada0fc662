use super::{SourceFormatter, Style, StyleKind};
use crate::process::ToolCommand;
use crate::resources::CMAKE_FORMAT_STYLE;
use std::path::{Path, PathBuf};

/// CMake formatting through `cmake-format`.
///
/// cmake-format rewrites one file per invocation, so one command is built per file, each
/// writing back onto its input.
pub struct CmakeFormatter;

impl SourceFormatter for CmakeFormatter {
    fn label(&self) -> &'static str {
        "CMake"
    }

    fn executables(&self) -> &'static [&'static str] {
        &["cmake-format"]
    }

    fn install_hint(&self) -> &'static str {
        "(sudo -H) pip3 install cmakelang"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["CMakeLists.txt", ".cmake"]
    }

    fn style(&self) -> StyleKind {
        StyleKind::ConfigFile(CMAKE_FORMAT_STYLE)
    }

    fn commands(&self, executable: &Path, style: &Style, files: &[PathBuf]) -> Vec<ToolCommand> {
        files
            .iter()
            .map(|file| {
                let command = ToolCommand::new(executable);
                let command = match style {
                    Style::File(config) => command.arg("-c").path_arg(config),
                    Style::Inline(_) | Style::None => command,
                };
                command
                    .path_arg(file)
                    .arg("--outfile-path")
                    .path_arg(file)
            })
            .collect()
    }
}
