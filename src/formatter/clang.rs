use super::{SourceFormatter, Style, StyleKind};
use crate::process::ToolCommand;
use crate::resources::CLANG_FORMAT_STYLE;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// C/C++ formatting through `clang-format`.
///
/// The style comes from the bundled `_clang-format` file, flattened to one line and
/// passed as `-style=...`. All files are formatted in place by a single invocation.
pub struct ClangFormatter;

impl SourceFormatter for ClangFormatter {
    fn label(&self) -> &'static str {
        "C/C++"
    }

    fn executables(&self) -> &'static [&'static str] {
        &["clang-format", "clang-format-6.0", "clang-format-8"]
    }

    fn install_hint(&self) -> &'static str {
        "sudo apt-get install clang-format"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".h", ".c", ".hh", ".cc", ".hpp", ".cpp", ".hxx", ".cxx"]
    }

    fn style(&self) -> StyleKind {
        StyleKind::Inline(CLANG_FORMAT_STYLE)
    }

    fn commands(&self, executable: &Path, style: &Style, files: &[PathBuf]) -> Vec<ToolCommand> {
        let mut command = ToolCommand::new(executable);
        match style {
            Style::Inline(line) => command = command.arg(format!("-style={}", line)),
            Style::File(path) => {
                let mut arg = OsString::from("-style=file:");
                arg.push(path);
                command = command.arg(arg);
            }
            Style::None => {}
        }
        command = command.arg("-i");
        for file in files {
            command = command.path_arg(file);
        }
        vec![command]
    }
}
