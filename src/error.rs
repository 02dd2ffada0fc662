use std::path::PathBuf;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
///
/// Everything here is a configuration error: a missing tool, input path, style file or
/// template. Failures of the external tools themselves are never turned into an `Error`,
/// they are logged and collected in the run reports instead.
#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    ToolNotFound { tool: String, hint: String },
    PathNotFound(PathBuf),
    StyleConfig { file: PathBuf, message: String },
    ResourceNotFound(PathBuf),
    InvalidProject(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::ToolNotFound { tool, hint } => {
                write!(f, "{} executable not found. You may try '{}'", tool, hint)
            }
            Error::PathNotFound(path) => write!(f, "failed to find: {}", path.display()),
            Error::StyleConfig { file, message } => {
                write!(f, "invalid style configuration {}: {}", file.display(), message)
            }
            Error::ResourceNotFound(path) => {
                write!(f, "resource file not found: {}", path.display())
            }
            Error::InvalidProject(msg) => write!(f, "invalid project: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::IoError(err.into())
    }
}
