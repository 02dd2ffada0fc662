//! Placeholder substitution for the documentation templates.
//!
//! A placeholder is an upper-case name between two `@`, for instance `@PROJECT_NAME@`.
//! Substitution is a literal text replacement of every occurrence; values are inserted
//! as they are, nothing is escaped.

use crate::error::Result;
use crate::fsutil::write_to_file;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// A template loaded from disk, possibly partly rendered.
#[derive(Debug, Clone)]
pub struct Template {
    source: PathBuf,
    text: String,
}

impl Template {
    /// Reads a template file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading template {}", path.display());
        let text = fs::read_to_string(path)?;
        Ok(Self {
            source: path.to_path_buf(),
            text,
        })
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: PathBuf::from("<inline>"),
            text: text.into(),
        }
    }

    /// Replaces `@name@` with `value`.
    pub fn set(mut self, name: &str, value: &str) -> Self {
        let token = format!("@{}@", name);
        if !self.text.contains(&token) {
            debug!("{} has no {} placeholder", self.source.display(), token);
        }
        self.text = self.text.replace(&token, value);
        self
    }

    /// Placeholders still present in the text, in order of appearance.
    pub fn unresolved(&self) -> Vec<String> {
        let mut found = Vec::new();
        let mut rest = self.text.as_str();
        while let Some(start) = rest.find('@') {
            let after = &rest[start + 1..];
            let Some(len) = after.find('@') else {
                break;
            };
            let name = &after[..len];
            if is_placeholder_name(name) {
                found.push(format!("@{}@", name));
                rest = &after[len + 1..];
            } else {
                rest = after;
            }
        }
        found
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Writes the rendered text to `path`, warning about placeholders left unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let unresolved = self.unresolved();
        if !unresolved.is_empty() {
            warn!(
                "{} still contains {} after rendering",
                self.source.display(),
                unresolved.join(", ")
            );
        }
        write_to_file(&self.text, path)
    }
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
