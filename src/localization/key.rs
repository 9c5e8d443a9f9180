//! Message keys and their placeholder names.

use std::borrow::Cow;
use std::collections::HashMap;

/// Identifies a localized message.
///
/// Implement it for an enum of messages, or use [`MessageKey`] constants.
/// Plain strings are keys without parameters.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use configured::localization::LocalizationKey;
///
/// enum Message {
///     Welcome,
///     Balance,
/// }
///
/// impl LocalizationKey for Message {
///     fn key(&self) -> Cow<'_, str> {
///         Cow::Borrowed(match self {
///             Self::Welcome => "welcome",
///             Self::Balance => "balance",
///         })
///     }
///
///     fn parameters(&self) -> &[&str] {
///         match self {
///             Self::Welcome => &["player"],
///             Self::Balance => &["player", "amount"],
///         }
///     }
/// }
///
/// assert_eq!(Message::Balance.parameters(), ["player", "amount"]);
/// ```
pub trait LocalizationKey {
    /// Key of the message in the localization file.
    fn key(&self) -> Cow<'_, str>;

    /// Placeholder names, in the order arguments are passed.
    fn parameters(&self) -> &[&str] {
        &[]
    }
}

impl<K: LocalizationKey + ?Sized> LocalizationKey for &K {
    fn key(&self) -> Cow<'_, str> {
        (**self).key()
    }

    fn parameters(&self) -> &[&str] {
        (**self).parameters()
    }
}

impl LocalizationKey for str {
    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl LocalizationKey for String {
    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

/// A message key declared as a constant.
///
/// ```
/// use configured::localization::{LocalizationKey, MessageKey};
///
/// const GREETING: MessageKey = MessageKey::with_parameters("greeting", &["name"]);
///
/// assert_eq!(GREETING.key(), "greeting");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey {
    key: &'static str,
    parameters: &'static [&'static str],
}

impl MessageKey {
    /// A key without parameters.
    #[must_use]
    pub const fn new(key: &'static str) -> Self {
        Self::with_parameters(key, &[])
    }

    /// A key with named placeholders.
    #[must_use]
    pub const fn with_parameters(key: &'static str, parameters: &'static [&'static str]) -> Self {
        Self { key, parameters }
    }
}

impl LocalizationKey for MessageKey {
    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.key)
    }

    fn parameters(&self) -> &[&str] {
        self.parameters
    }
}

/// Placeholder names per message key, filled as keys are registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterTable {
    entries: HashMap<String, Vec<String>>,
}

impl ParameterTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the parameters of a key, replacing earlier ones.
    pub fn insert<I, S>(&mut self, key: impl Into<String>, parameters: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(key.into(), parameters.into_iter().map(Into::into).collect());
    }

    /// Records the parameters declared by a key.
    pub fn insert_key(&mut self, key: &impl LocalizationKey) {
        self.insert(key.key().into_owned(), key.parameters().iter().copied());
    }

    /// Returns the parameters recorded for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of keys in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
