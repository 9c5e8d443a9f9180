//! JSON and JSONC formats backed by `serde_json`.

use crate::value::{Value, ValueMap};

use super::{ConfigFormat, FormatError, WriteOptions, into_mapping, prefix_lines};

/// JSON dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonFlavor {
    /// Strict JSON. No comments are written or accepted.
    Json,
    /// JSON with `//` and `/* */` comments.
    JsonC,
}

impl JsonFlavor {
    /// Returns `true` if the dialect has comment syntax.
    #[must_use]
    pub const fn allows_comments(self) -> bool {
        matches!(self, Self::JsonC)
    }

    /// Dialect name for messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::JsonC => "JSONC",
        }
    }
}

/// A JSON object file with one top-level key per option.
///
/// Values are pretty-printed with two-space indentation. Plain JSON files
/// default to [`WriteOptions::compact`] since they cannot hold comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonFormat {
    flavor: JsonFlavor,
}

impl JsonFormat {
    /// Creates a format for the given dialect.
    #[must_use]
    pub const fn new(flavor: JsonFlavor) -> Self {
        Self { flavor }
    }

    /// Strict JSON.
    #[must_use]
    pub const fn json() -> Self {
        Self::new(JsonFlavor::Json)
    }

    /// JSON with comments.
    #[must_use]
    pub const fn jsonc() -> Self {
        Self::new(JsonFlavor::JsonC)
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn flavor(self) -> JsonFlavor {
        self.flavor
    }
}

impl ConfigFormat for JsonFormat {
    fn name(&self) -> &'static str {
        self.flavor.name()
    }

    fn parse(&self, content: &str) -> Result<ValueMap, FormatError> {
        let name = self.name();
        let root: Value = if self.flavor.allows_comments() {
            serde_json::from_str(&strip_comments(content))
        } else {
            serde_json::from_str(content)
        }
        .map_err(|e| FormatError::parse(name, e))?;
        into_mapping(name, root)
    }

    fn supports_comments(&self) -> bool {
        self.flavor.allows_comments()
    }

    fn default_write_options(&self) -> WriteOptions {
        if self.flavor.allows_comments() {
            WriteOptions::new()
        } else {
            WriteOptions::compact()
        }
    }

    fn comment(&self, text: &str) -> String {
        prefix_lines(text, "  // ")
    }

    fn write_entry(
        &self,
        out: &mut String,
        key: &str,
        value: &Value,
        has_next: bool,
    ) -> Result<(), FormatError> {
        let name = self.name();
        let rendered_key = serde_json::to_string(key).map_err(|e| FormatError::serialize(name, key, e))?;
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|e| FormatError::serialize(name, key, e))?;

        out.push_str("  ");
        out.push_str(&rendered_key);
        out.push_str(": ");
        out.push_str(&rendered.replace('\n', "\n  "));
        if has_next {
            out.push(',');
        }
        out.push('\n');
        Ok(())
    }

    fn begin(&self, out: &mut String) {
        out.push_str("{\n");
    }

    fn end(&self, out: &mut String) {
        out.push('}');
    }
}

/// Removes `//` line comments and `/* */` block comments outside strings.
///
/// Line breaks are kept so parser positions still match the file.
pub(crate) fn strip_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    if previous == '*' && skipped == '/' {
                        break;
                    }
                    previous = skipped;
                }
            }
            _ => out.push(c),
        }
    }
    out
}
