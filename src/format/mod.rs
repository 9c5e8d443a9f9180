//! File formats: parsing files into values and rendering commented files.
//!
//! This module provides:
//! - The [`ConfigFormat`] trait every format implements
//! - The document model handed to formats on save ([`Document`], [`Entry`])
//! - Built-in formats ([`YamlFormat`], [`JsonFormat`], [`TomlFormat`])
//! - Extension-based format lookup ([`FormatRegistry`])
//!
//! # Layout
//!
//! All built-in formats share [`ConfigFormat::render`], which lays out a
//! file as:
//!
//! ```text
//! <file header comment>
//!
//! <option header comment>
//!
//! <option description comment>
//! key: value
//!
//! <option footer comment>
//!
//! <next option...>
//!
//! <file footer comment>
//! ```
//!
//! Formats only decide how a comment and a single key/value look.

mod error;
mod json;
mod registry;
mod toml;
mod yaml;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use error::FormatError;
pub use json::{JsonFlavor, JsonFormat};
pub use registry::{FormatFactory, FormatRegistry};
pub use self::toml::TomlFormat;
pub use yaml::YamlFormat;

use std::path::{Path, PathBuf};

use crate::value::{Value, ValueMap};

/// Layout switches for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Put a blank line between consecutive options.
    pub separate_options: bool,
    /// Emit headers, descriptions and footers as comments.
    ///
    /// Ignored by formats without comment syntax.
    pub write_comments: bool,
}

impl WriteOptions {
    /// Blank lines and comments.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            separate_options: true,
            write_comments: true,
        }
    }

    /// No blank lines, no comments.
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            separate_options: false,
            write_comments: false,
        }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Documentation attached to a single entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Comments<'a> {
    /// Block above the entry, followed by a blank line.
    pub header: Option<&'a str>,
    /// Block directly above the key.
    pub description: Option<&'a str>,
    /// Block below the entry, preceded by a blank line.
    pub footer: Option<&'a str>,
}

/// One key/value pair to write, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<'a> {
    /// Top-level key.
    pub key: &'a str,
    /// Value to write.
    pub value: &'a Value,
    /// Documentation to emit around the pair.
    pub comments: Comments<'a>,
}

/// Everything a format needs to write one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document<'a> {
    /// Comment at the top of the file.
    pub header: Option<&'a str>,
    /// Comment at the bottom of the file.
    pub footer: Option<&'a str>,
    /// Entries in write order.
    pub entries: Vec<Entry<'a>>,
}

/// A file syntax the registry can read from and write to.
///
/// Implementors provide parsing plus the two layout primitives
/// ([`comment`](Self::comment) and [`write_entry`](Self::write_entry));
/// rendering and file I/O come for free.
///
/// # Reading
///
/// [`parse`](Self::parse) must return keys in file order, so data that no
/// option claims can be written back where it was.
pub trait ConfigFormat: Send + Sync {
    /// Format name for messages, e.g. `"YAML"`.
    fn name(&self) -> &'static str;

    /// Parses file content into a top-level mapping.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] for malformed content or a non-mapping root.
    fn parse(&self, content: &str) -> Result<ValueMap, FormatError>;

    /// Whether the syntax has comments at all.
    fn supports_comments(&self) -> bool {
        true
    }

    /// Options a registry starts with when it uses this format.
    fn default_write_options(&self) -> WriteOptions {
        WriteOptions::new()
    }

    /// Renders a possibly multi-line comment, without a trailing newline.
    fn comment(&self, text: &str) -> String;

    /// Appends one key/value pair, including its trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Serialize`] if the value cannot be expressed
    /// in this format.
    fn write_entry(
        &self,
        out: &mut String,
        key: &str,
        value: &Value,
        has_next: bool,
    ) -> Result<(), FormatError>;

    /// Appends anything that must open the file (`{` for JSON).
    fn begin(&self, _out: &mut String) {}

    /// Appends anything that must close the file (`}` for JSON).
    fn end(&self, _out: &mut String) {}

    /// Renders a whole document.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`write_entry`](Self::write_entry).
    fn render(&self, document: &Document<'_>, options: WriteOptions) -> Result<String, FormatError> {
        let comments = options.write_comments && self.supports_comments();
        let comment = |text: Option<&str>| text.filter(|_| comments).map(|t| self.comment(t));

        let mut out = String::new();
        self.begin(&mut out);
        if let Some(header) = comment(document.header) {
            out.push_str(&header);
            out.push_str("\n\n");
        }

        let count = document.entries.len();
        for (index, entry) in document.entries.iter().enumerate() {
            let has_next = index + 1 < count;
            if let Some(header) = comment(entry.comments.header) {
                out.push_str(&header);
                out.push_str("\n\n");
            }
            if let Some(description) = comment(entry.comments.description) {
                out.push_str(&description);
                out.push('\n');
            }
            self.write_entry(&mut out, entry.key, entry.value, has_next)?;
            if let Some(footer) = comment(entry.comments.footer) {
                out.push('\n');
                out.push_str(&footer);
                out.push('\n');
            }
            if has_next && options.separate_options {
                out.push('\n');
            }
        }

        if let Some(footer) = comment(document.footer) {
            out.push('\n');
            out.push_str(&footer);
            out.push('\n');
        }
        self.end(&mut out);
        Ok(out)
    }

    /// Reads and parses a file.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Read`] if the file cannot be read and
    /// [`FormatError::Malformed`] if its content does not parse.
    fn read(&self, path: &Path) -> Result<ValueMap, FormatError> {
        let content = std::fs::read_to_string(path).map_err(|source| FormatError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&content).map_err(|source| FormatError::Malformed {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Renders a document and writes it to `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns rendering errors, or [`FormatError::Write`] on I/O failure.
    fn write(
        &self,
        path: &Path,
        document: &Document<'_>,
        options: WriteOptions,
    ) -> Result<(), FormatError> {
        let content = self.render(document, options)?;
        write_atomic(path, &content)
    }
}

/// Prefixes every line of `text` with `prefix`.
pub(crate) fn prefix_lines(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len() + prefix.len());
    out.push_str(prefix);
    out.push_str(&text.replace('\n', &format!("\n{prefix}")));
    out
}

/// Interprets a parsed document root as the top-level mapping.
///
/// An empty document is an empty mapping.
pub(crate) fn into_mapping(format: &'static str, root: Value) -> Result<ValueMap, FormatError> {
    match root {
        Value::Map(map) => Ok(map),
        Value::Null => Ok(ValueMap::new()),
        other => Err(FormatError::NotAMapping {
            format,
            found: other.kind(),
        }),
    }
}

/// Writes `content` to `path` via a temporary sibling file and a rename.
///
/// Creates missing parent directories.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<(), FormatError> {
    let write_error = |source| FormatError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
    }

    // Append .tmp instead of replacing the extension (config.yml -> config.yml.tmp)
    let temp_path = PathBuf::from(format!("{}.tmp", path.display()));
    std::fs::write(&temp_path, content).map_err(write_error)?;
    if let Err(source) = std::fs::rename(&temp_path, path) {
        // The rename error is reported, not the cleanup's
        let _ = std::fs::remove_file(&temp_path);
        return Err(write_error(source));
    }
    Ok(())
}
