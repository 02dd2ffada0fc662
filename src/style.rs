//! Style configuration loading.
//!
//! Formatter style files (`_clang-format`, `_cmake-format.yaml`) are YAML documents.
//! Tools such as clang-format accept the whole style inline on the command line, so this
//! module flattens a YAML document into a single line in flow style:
//!
//! ```text
//! foo: 13
//! bar: 42
//! ```
//!
//! becomes `{bar: 42, foo: 13}`.

use crate::error::{Error, Result};
use log::debug;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Words that YAML 1.1 readers (clang-format among them) take as booleans.
const YAML11_BOOLEANS: &[&str] = &["y", "n", "yes", "no", "on", "off"];

/// Loads a YAML style file and renders it as a one-line flow mapping.
///
/// An empty file yields `{}`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML.
pub fn load_style_config(path: &Path) -> Result<String> {
    debug!("Loading style configuration from {}", path.display());

    let content = fs::read_to_string(path)?;
    let value: Value = serde_yaml::from_str(&content).map_err(|e| Error::StyleConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let line = match value {
        Value::Null => "{}".to_string(),
        other => to_flow_style(&other),
    };
    Ok(line.replace('\n', ""))
}

/// Renders a YAML value in flow style on a single line.
///
/// Mapping keys are sorted. Strings stay plain unless reading them back would change
/// their meaning, in which case they are quoted.
pub fn to_flow_style(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => render_string(s),
        Value::Sequence(items) => {
            let rendered: Vec<String> = items.iter().map(to_flow_style).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Mapping(mapping) => {
            let mut entries: Vec<(&Value, &Value)> = mapping.iter().collect();
            entries.sort_by_cached_key(|(key, _)| sort_key(key));
            let rendered: Vec<String> = entries
                .into_iter()
                .map(|(key, value)| format!("{}: {}", to_flow_style(key), to_flow_style(value)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, to_flow_style(&tagged.value)),
    }
}

fn sort_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => to_flow_style(other),
    }
}

fn render_string(s: &str) -> String {
    if s.chars().any(|c| c.is_control()) {
        return double_quoted(s);
    }
    if is_plain_safe(s) {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "''"))
    }
}

fn is_plain_safe(s: &str) -> bool {
    if s.is_empty() || s.contains([',', '[', ']', '{', '}']) {
        return false;
    }
    if YAML11_BOOLEANS.contains(&s.to_ascii_lowercase().as_str()) {
        return false;
    }
    // A plain scalar is safe when it reads back as the very same string.
    matches!(serde_yaml::from_str::<Value>(s), Ok(Value::String(back)) if back == s)
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn load(content: &str) -> String {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("_clang-format");
        fs::write(&path, content).unwrap();
        load_style_config(&path).unwrap()
    }

    #[test]
    fn test_two_line_mapping_becomes_one_line() {
        let line = load("foo: 13\nbar: 42\n");

        assert_eq!(line, "{bar: 42, foo: 13}");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_clang_format_style() {
        let line = load(
            "---\nBasedOnStyle: Google\nIndentWidth: 4\nAllowShortFunctionsOnASingleLine: false\n\
             BreakBeforeBraces: Allman\nColumnLimit: 80\n",
        );

        assert_eq!(
            line,
            "{AllowShortFunctionsOnASingleLine: false, BasedOnStyle: Google, \
             BreakBeforeBraces: Allman, ColumnLimit: 80, IndentWidth: 4}"
        );
    }

    #[test]
    fn test_nested_values() {
        let line = load("list:\n  - a\n  - b\nmap:\n  inner: 1\n  alpha: x\n");
        assert_eq!(line, "{list: [a, b], map: {alpha: x, inner: 1}}");
    }

    #[test]
    fn test_strings_that_need_quotes() {
        let line = load("a: 'yes'\nb: '42'\nc: 'x, y'\nd: ''\ne: \"it's\"\nf: 'k: v'\n");
        assert_eq!(line, "{a: 'yes', b: '42', c: 'x, y', d: '', e: it's, f: 'k: v'}");
    }

    #[test]
    fn test_quote_inside_quoted_string_is_doubled() {
        let value = Value::String("it's, quoted".to_string());
        assert_eq!(to_flow_style(&value), "'it''s, quoted'");
    }

    #[test]
    fn test_multiline_string_has_no_newline() {
        let line = load("comment: |\n  first\n  second\n");
        assert_eq!(line, "{comment: \"first\\nsecond\\n\"}");
    }

    #[test]
    fn test_null_values() {
        assert_eq!(load("a: ~\n"), "{a: null}");
        assert_eq!(load(""), "{}");
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("_clang-format");
        fs::write(&path, "a: [unclosed\n").unwrap();

        let err = load_style_config(&path).unwrap_err();
        assert!(matches!(err, Error::StyleConfig { .. }));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_style_config(&temp_dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
