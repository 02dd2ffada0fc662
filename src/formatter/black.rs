use super::{SourceFormatter, Style};
use crate::process::ToolCommand;
use std::path::{Path, PathBuf};

/// Maximum line length handed to black.
pub const LINE_LENGTH: u32 = 79;

/// Python formatting through `black`.
pub struct BlackFormatter;

impl SourceFormatter for BlackFormatter {
    fn label(&self) -> &'static str {
        "Python"
    }

    fn executables(&self) -> &'static [&'static str] {
        &["black"]
    }

    fn install_hint(&self) -> &'static str {
        "(sudo -H) pip3 install black"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".py", ".pyi"]
    }

    fn commands(&self, executable: &Path, _style: &Style, files: &[PathBuf]) -> Vec<ToolCommand> {
        let mut command = ToolCommand::new(executable)
            .arg("--line-length")
            .arg(LINE_LENGTH.to_string());
        for file in files {
            command = command.path_arg(file);
        }
        vec![command.arg("--verbose")]
    }
}
