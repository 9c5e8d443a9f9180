//! Option descriptors: the declarative unit of a configuration file.
//!
//! A [`ConfigOption`] carries a key, a typed default, documentation text
//! that formats emit as comments, and load listeners. Descriptors are built
//! with consuming `with_*` methods and then handed to a
//! [`Config`](crate::Config); the registry keeps its own clone, so a
//! descriptor is never mutated once registered.

mod registered;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub(crate) use registered::RegisteredOption;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::value::{ConfigValue, TypeHint, Value};

/// Callback run with the resolved value after each load.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A named, typed, defaulted configuration option.
///
/// Two options are equal when their keys are equal, regardless of type,
/// default or documentation.
///
/// # Example
///
/// ```
/// use configured::ConfigOption;
///
/// let port = ConfigOption::new("port", 8080_u16)
///     .with_description("Port the server listens on")
///     .append_default_value();
///
/// assert_eq!(port.key(), "port");
/// assert_eq!(port.description(), Some("Port the server listens on\nDefault: 8080"));
/// ```
#[derive(Clone)]
pub struct ConfigOption<T> {
    key: String,
    default: T,
    hidden: bool,
    description: Option<String>,
    header: Option<String>,
    footer: Option<String>,
    old_keys: Vec<String>,
    listeners: Vec<Listener<T>>,
}

impl<T: ConfigValue> ConfigOption<T> {
    /// Creates an option with the given key and default value.
    #[must_use]
    pub fn new(key: impl Into<String>, default: T) -> Self {
        Self {
            key: key.into(),
            default,
            hidden: false,
            description: None,
            header: None,
            footer: None,
            old_keys: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Returns the option's key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the default value.
    #[must_use]
    pub const fn default_value(&self) -> &T {
        &self.default
    }

    /// Returns the declared type of the option's value.
    #[must_use]
    pub fn type_hint(&self) -> TypeHint {
        T::type_hint()
    }

    /// Hides the option from saved files while it holds its default value.
    ///
    /// A hidden option is still read when present in a file.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Returns `true` if the option is hidden.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Sets the description, written as a comment right above the key.
    ///
    /// Leading and trailing whitespace is trimmed.
    #[must_use]
    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        self.description = Some(description.as_ref().trim().to_owned());
        self
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sets a header comment, separated from the option by a blank line.
    #[must_use]
    pub fn with_header(mut self, header: impl AsRef<str>) -> Self {
        self.header = Some(header.as_ref().trim().to_owned());
        self
    }

    /// Returns the header, if any.
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Sets a footer comment, separated from the option by a blank line.
    #[must_use]
    pub fn with_footer(mut self, footer: impl AsRef<str>) -> Self {
        self.footer = Some(footer.as_ref().trim().to_owned());
        self
    }

    /// Returns the footer, if any.
    #[must_use]
    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    /// Declares a previous key of this option.
    ///
    /// When a loaded file lacks the current key but has an old one, the
    /// value is taken from the old key. Old keys are tried in declaration
    /// order.
    #[must_use]
    pub fn with_old_key(mut self, old_key: impl Into<String>) -> Self {
        self.old_keys.push(old_key.into());
        self
    }

    /// Returns the declared old keys.
    #[must_use]
    pub fn old_keys(&self) -> &[String] {
        &self.old_keys
    }

    /// Adds a listener called with the resolved value after every load in
    /// which the key is present.
    #[must_use]
    pub fn on_load(mut self, listener: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Appends `Default: <value>` to the description on a new line.
    #[must_use]
    pub fn append_default_value(self) -> Self {
        self.append_default("\n", "", "")
    }

    /// Appends `Default: <value>` to the description on the same line.
    #[must_use]
    pub fn append_inlined_default_value(self) -> Self {
        self.append_default(" ", "", "")
    }

    /// Appends `(Default: <value>)` to the description on the same line.
    #[must_use]
    pub fn append_parenthesized_default_value(self) -> Self {
        self.append_default(" ", "(", ")")
    }

    fn append_default(mut self, separator: &str, open: &str, close: &str) -> Self {
        let mut text = self
            .description
            .take()
            .map(|description| description + separator)
            .unwrap_or_default();
        text.push_str(open);
        text.push_str("Default: ");
        text.push_str(&self.default.to_value().to_string());
        text.push_str(close);
        self.description = Some(text);
        self
    }

    /// Converts a stored value into `T`.
    ///
    /// Returns `None` for a missing or null value, and for a value of the
    /// wrong type (logged as a warning).
    pub(crate) fn resolve(&self, value: Option<&Value>) -> Option<T> {
        let value = value.filter(|value| !value.is_null())?;
        match T::from_value(value) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                tracing::warn!("Invalid value type for option '{}': {e}", self.key);
                None
            }
        }
    }

    /// Like [`resolve`](Self::resolve), falling back to the default.
    pub(crate) fn resolve_or_default(&self, value: Option<&Value>) -> T {
        self.resolve(value).unwrap_or_else(|| self.default.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for ConfigOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOption")
            .field("key", &self.key)
            .field("default", &self.default)
            .field("hidden", &self.hidden)
            .field("description", &self.description)
            .field("header", &self.header)
            .field("footer", &self.footer)
            .field("old_keys", &self.old_keys)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T> PartialEq for ConfigOption<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for ConfigOption<T> {}

impl<T> Hash for ConfigOption<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
