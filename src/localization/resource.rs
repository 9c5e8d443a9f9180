//! Bundled localization files deployed on first run.

use std::borrow::Cow;
use std::collections::HashMap;

/// Supplies the bundled content of a language's localization file.
///
/// Any `Fn(&str) -> Option<String>` is a provider; [`EmbeddedResources`]
/// covers the common `include_str!` case.
pub trait ResourceProvider: Send + Sync {
    /// Returns the file content for `language`, if one is bundled.
    fn resource(&self, language: &str) -> Option<Cow<'_, str>>;
}

impl<F> ResourceProvider for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn resource(&self, language: &str) -> Option<Cow<'_, str>> {
        self(language).map(Cow::Owned)
    }
}

/// Localization files compiled into the binary.
///
/// ```
/// use configured::localization::{EmbeddedResources, ResourceProvider};
///
/// let resources = EmbeddedResources::new()
///     .with_language("en_us", "greeting: Hello {name}\n");
///
/// assert!(resources.resource("en_us").is_some());
/// assert!(resources.resource("de_de").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    files: HashMap<String, &'static str>,
}

impl EmbeddedResources {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the file content for a language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>, content: &'static str) -> Self {
        self.files.insert(language.into(), content);
        self
    }
}

impl ResourceProvider for EmbeddedResources {
    fn resource(&self, language: &str) -> Option<Cow<'_, str>> {
        self.files.get(language).map(|content| Cow::Borrowed(*content))
    }
}
