//! Extension-based format lookup.

use std::collections::HashMap;
use std::path::Path;

use super::{ConfigFormat, FormatError, JsonFormat, TomlFormat, YamlFormat};

/// Constructor for a fresh format instance.
pub type FormatFactory = fn() -> Box<dyn ConfigFormat>;

/// Maps file extensions to format constructors.
///
/// The registry is a plain value owned by the application: build it once at
/// startup and pass it to [`Config::from_path`](crate::Config::from_path) or
/// [`Localization::from_pattern`](crate::localization::Localization::from_pattern).
///
/// Extensions are matched case-insensitively, with or without a leading dot.
///
/// # Example
///
/// ```
/// use configured::format::{FormatRegistry, TomlFormat};
///
/// let registry = FormatRegistry::new()
///     .with_format("conf", || Box::new(TomlFormat::new()));
/// assert!(registry.create(".CONF").is_some());
/// assert!(registry.create("yml").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    factories: HashMap<String, FormatFactory>,
}

impl FormatRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in format:
    /// `yml`/`yaml`, `json`, `jsonc` and `toml`.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .with_format("yml", || Box::new(YamlFormat::new()))
            .with_format("yaml", || Box::new(YamlFormat::new()))
            .with_format("json", || Box::new(JsonFormat::json()))
            .with_format("jsonc", || Box::new(JsonFormat::jsonc()))
            .with_format("toml", || Box::new(TomlFormat::new()))
    }

    /// Registers a format, replacing any previous one for the extension.
    #[must_use]
    pub fn with_format(mut self, extension: &str, factory: FormatFactory) -> Self {
        self.register(extension, factory);
        self
    }

    /// Registers a format in place.
    pub fn register(&mut self, extension: &str, factory: FormatFactory) {
        self.factories.insert(normalize(extension), factory);
    }

    /// Returns the constructor registered for an extension.
    #[must_use]
    pub fn factory(&self, extension: &str) -> Option<FormatFactory> {
        self.factories.get(&normalize(extension)).copied()
    }

    /// Creates a format for an extension.
    #[must_use]
    pub fn create(&self, extension: &str) -> Option<Box<dyn ConfigFormat>> {
        self.factory(extension).map(|factory| factory())
    }

    /// Returns the constructor for a path's extension.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingExtension`] if the path has no
    /// extension, or [`FormatError::UnknownFormat`] if none is registered.
    pub fn factory_for_path(&self, path: &Path) -> Result<FormatFactory, FormatError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| FormatError::MissingExtension {
                path: path.to_path_buf(),
            })?;
        self.factory(extension)
            .ok_or_else(|| FormatError::UnknownFormat {
                extension: normalize(extension),
            })
    }

    /// Creates a format for a path's extension.
    ///
    /// # Errors
    ///
    /// See [`factory_for_path`](Self::factory_for_path).
    pub fn format_for_path(&self, path: &Path) -> Result<Box<dyn ConfigFormat>, FormatError> {
        self.factory_for_path(path).map(|factory| factory())
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}
