//! TOML format backed by the `toml` crate.

use crate::value::{Value, ValueMap};

use super::{ConfigFormat, FormatError, into_mapping, prefix_lines};

const NAME: &str = "TOML";

/// TOML with one `key = value` line per option.
///
/// Nested lists and maps are written inline (`[1, 2]`, `{ a = 1 }`), so
/// every option stays next to its comments. TOML has no null, so an option
/// holding [`Value::Null`] fails to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TomlFormat;

impl TomlFormat {
    /// Creates the format.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ConfigFormat for TomlFormat {
    fn name(&self) -> &'static str {
        NAME
    }

    fn parse(&self, content: &str) -> Result<ValueMap, FormatError> {
        let root: Value = toml::from_str(content).map_err(|e| FormatError::parse(NAME, e))?;
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
        let rendered = toml::Value::try_from(value).map_err(|e| FormatError::serialize(NAME, key, e))?;
        out.push_str(&toml_key(key));
        out.push_str(" = ");
        out.push_str(&rendered.to_string());
        out.push('\n');
        Ok(())
    }
}

/// Renders a key bare when TOML allows it, quoted otherwise.
fn toml_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        key.to_owned()
    } else {
        toml::Value::String(key.to_owned()).to_string()
    }
}
