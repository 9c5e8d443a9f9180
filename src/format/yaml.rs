//! YAML format backed by `serde_yaml`.

use crate::value::{Value, ValueMap};

use super::{ConfigFormat, FormatError, into_mapping, prefix_lines};

const NAME: &str = "YAML";

/// Block-style YAML with `#` comments.
///
/// Sequences are written unindented under their key, mappings indented by
/// two spaces, and empty collections inline as `[]` / `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YamlFormat;

impl YamlFormat {
    /// Creates the format.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ConfigFormat for YamlFormat {
    fn name(&self) -> &'static str {
        NAME
    }

    fn parse(&self, content: &str) -> Result<ValueMap, FormatError> {
        let blank = content
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'));
        if blank {
            return Ok(ValueMap::new());
        }
        let root: Value = serde_yaml::from_str(content).map_err(|e| FormatError::parse(NAME, e))?;
        into_mapping(NAME, root)
    }

    fn comment(&self, text: &str) -> String {
        prefix_lines(text, "# ")
    }

    fn write_entry(
        &self,
        out: &mut String,
        key: &str,
        value: &Value,
        _has_next: bool,
    ) -> Result<(), FormatError> {
        let rendered_key = serde_yaml::to_string(key).map_err(|e| FormatError::serialize(NAME, key, e))?;
        let dump = serde_yaml::to_string(value).map_err(|e| FormatError::serialize(NAME, key, e))?;

        out.push_str(rendered_key.trim_end());
        out.push(':');
        match value {
            Value::List(items) | Value::Set(items) if !items.is_empty() => {
                out.push('\n');
                out.push_str(&dump);
            }
            Value::Map(map) if !map.is_empty() => {
                out.push('\n');
                for line in dump.lines() {
                    if !line.is_empty() {
                        out.push_str("  ");
                        out.push_str(line);
                    }
                    out.push('\n');
                }
            }
            _ => {
                out.push(' ');
                out.push_str(&dump);
            }
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(())
    }
}
