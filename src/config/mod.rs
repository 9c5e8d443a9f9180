//! The option registry bound to one configuration file.
//!
//! This module provides:
//! - The registry itself ([`Config`])
//! - Load results ([`LoadOutcome`])
//! - Registry errors ([`ConfigError`])
//! - Reserved names and defaults ([`defaults`])
//!
//! # Lifecycle
//!
//! 1. Build a [`Config`] for a path and a format
//! 2. Register [`ConfigOption`]s (registration order is file order)
//! 3. [`load`](Config::load): read the file, or create it from defaults
//! 4. [`get`](Config::get) / [`set`](Config::set) values, then
//!    [`save`](Config::save) to regenerate the file with comments
//!
//! # Failure Policy
//!
//! Registering a duplicate key or setting an unregistered option returns
//! an error. Problems with the file itself (missing, unreadable, malformed,
//! values of the wrong type) are logged and never abort the host: the
//! registry keeps its previous values, or falls back to option defaults.
//!
//! # Concurrency
//!
//! `Config` is `Send + Sync` but has no interior locking. Share it behind
//! a `Mutex` or `RwLock` if several threads load or save it.

pub mod defaults;
mod error;
mod load;
mod save;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use error::ConfigError;

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::format::{ConfigFormat, FormatRegistry, WriteOptions};
use crate::option::{ConfigOption, RegisteredOption};
use crate::value::{ConfigValue, Value, ValueMap};

use self::defaults::{UNVERSIONED, VERSION_KEY};

/// Maps a current key to a key an older release may have used.
pub type OldKeyGenerator = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Result of a load call.
///
/// Explicitly models every terminal state of the load state machine:
/// - The file was read (and possibly rewritten for a new version)
/// - The file was missing and got created from defaults
/// - The file was missing and left alone
/// - No file is configured
/// - The file could not be read or parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read and its values replaced the registry's.
    Loaded {
        /// The file carried another version and was saved again.
        migrated: bool,
    },

    /// The file did not exist and was created from the current values.
    Created,

    /// The file did not exist and creation was not requested.
    NotFound,

    /// The config has no file.
    NoFile,

    /// The file could not be read, parsed or created.
    /// Values held before the call are kept.
    Failed {
        /// Reason for the failure (for logging/debugging).
        reason: String,
    },
}

impl LoadOutcome {
    /// Returns `true` if values were read from the file.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Returns `true` if the load failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A set of options backed by one file.
///
/// Values live in an insertion-ordered map keyed by option key. Keys found
/// in the file that no option claims are kept too, and can be written back
/// with [`save_with_unregistered_data`](Self::save_with_unregistered_data).
///
/// # Example
///
/// ```no_run
/// use configured::{Config, ConfigOption};
/// use configured::format::YamlFormat;
///
/// # fn main() -> Result<(), configured::ConfigError> {
/// let mut config = Config::new("config.yml", YamlFormat::new())
///     .with_header("Server settings")
///     .with_version(1);
///
/// let port = config.register(
///     ConfigOption::new("port", 8080_u16).with_description("Listen port"),
/// )?;
/// config.load();
///
/// let port: u16 = config.get(&port);
/// # let _ = port;
/// # Ok(())
/// # }
/// ```
pub struct Config {
    path: Option<PathBuf>,
    format: Box<dyn ConfigFormat>,
    options: IndexMap<String, Box<dyn RegisteredOption>>,
    data: ValueMap,
    version: Option<i32>,
    file_version: Option<i32>,
    header: Option<String>,
    footer: Option<String>,
    write_options: WriteOptions,
    old_key_generator: Option<OldKeyGenerator>,
}

impl Config {
    /// Creates a config for `path` using `format`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, format: impl ConfigFormat + 'static) -> Self {
        Self::from_boxed(Some(path.into()), Box::new(format))
    }

    /// Creates a config for `path`, picking the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Format`] if the path has no extension or no
    /// format is registered for it.
    pub fn from_path(path: impl Into<PathBuf>, formats: &FormatRegistry) -> Result<Self, ConfigError> {
        let path = path.into();
        let format = formats.format_for_path(&path)?;
        Ok(Self::from_boxed(Some(path), format))
    }

    /// Creates a config without a file.
    ///
    /// Loads and saves are no-ops until [`set_path`](Self::set_path) is called.
    #[must_use]
    pub fn detached(format: impl ConfigFormat + 'static) -> Self {
        Self::from_boxed(None, Box::new(format))
    }

    /// Creates a config from an already boxed format.
    #[must_use]
    pub fn from_boxed(path: Option<PathBuf>, format: Box<dyn ConfigFormat>) -> Self {
        let write_options = format.default_write_options();
        Self {
            path,
            format,
            options: IndexMap::new(),
            data: ValueMap::new(),
            version: None,
            file_version: None,
            header: None,
            footer: None,
            write_options,
            old_key_generator: None,
        }
    }

    /// Returns the backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Points the config at another file.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Returns `true` if the backing file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.as_deref().is_some_and(Path::exists)
    }

    /// Returns the file format.
    #[must_use]
    pub fn format(&self) -> &dyn ConfigFormat {
        self.format.as_ref()
    }

    /// Sets the file header comment. Whitespace around it is trimmed.
    #[must_use]
    pub fn with_header(mut self, header: impl AsRef<str>) -> Self {
        self.header = Some(header.as_ref().trim().to_owned());
        self
    }

    /// Returns the file header comment.
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Sets the file footer comment. Whitespace around it is trimmed.
    #[must_use]
    pub fn with_footer(mut self, footer: impl AsRef<str>) -> Self {
        self.footer = Some(footer.as_ref().trim().to_owned());
        self
    }

    /// Returns the file footer comment.
    #[must_use]
    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    /// Declares the schema version this code expects.
    ///
    /// See [`set_version`](Self::set_version).
    #[must_use]
    pub fn with_version(mut self, version: i32) -> Self {
        self.set_version(version);
        self
    }

    /// Declares the schema version this code expects.
    ///
    /// Registers the reserved [`VERSION_KEY`] option (unless an option with
    /// that key already exists). A load that finds another version in the
    /// file saves the file again, stamping this version.
    pub fn set_version(&mut self, version: i32) {
        self.version = Some(version);
        if !self.options.contains_key(VERSION_KEY) {
            self.insert_option(ConfigOption::new(VERSION_KEY, UNVERSIONED));
        }
    }

    /// Returns the declared schema version.
    #[must_use]
    pub const fn version(&self) -> Option<i32> {
        self.version
    }

    /// Returns the version of the file as last loaded or saved.
    ///
    /// `None` before the first load, or if the file has no version key.
    #[must_use]
    pub const fn current_version(&self) -> Option<i32> {
        self.file_version
    }

    /// Puts (or stops putting) a blank line between options.
    #[must_use]
    pub fn with_separate_options(mut self, separate: bool) -> Self {
        self.write_options.separate_options = separate;
        self
    }

    /// Writes (or stops writing) comments.
    ///
    /// Has no effect for formats without comment syntax.
    #[must_use]
    pub fn with_comments(mut self, write_comments: bool) -> Self {
        self.write_options.write_comments = write_comments;
        self
    }

    /// Returns the layout used on save.
    #[must_use]
    pub const fn write_options(&self) -> WriteOptions {
        self.write_options
    }

    /// Derives an old key from every current key.
    ///
    /// Tried after the option's own [old keys](ConfigOption::with_old_key)
    /// when a loaded file lacks the current key.
    #[must_use]
    pub fn with_old_key_generator(
        mut self,
        generator: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.old_key_generator = Some(Box::new(generator));
        self
    }

    /// Registers an option and seeds its value with the default.
    ///
    /// Returns the option back so declarations read as
    /// `let port = config.register(ConfigOption::new("port", 80))?;`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateOption`] if the key is taken. The
    /// registry is left unchanged.
    pub fn register<T: ConfigValue>(
        &mut self,
        option: ConfigOption<T>,
    ) -> Result<ConfigOption<T>, ConfigError> {
        if self.options.contains_key(option.key()) {
            return Err(ConfigError::DuplicateOption {
                key: option.key().to_owned(),
            });
        }
        self.insert_option(option.clone());
        Ok(option)
    }

    /// Creates and registers an option without documentation.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn option_of<T: ConfigValue>(
        &mut self,
        key: impl Into<String>,
        default: T,
    ) -> Result<ConfigOption<T>, ConfigError> {
        self.register(ConfigOption::new(key, default))
    }

    /// Registers options in order.
    ///
    /// # Errors
    ///
    /// Stops at the first duplicate. Options before it stay registered.
    pub fn register_all<T: ConfigValue>(
        &mut self,
        options: impl IntoIterator<Item = ConfigOption<T>>,
    ) -> Result<&mut Self, ConfigError> {
        for option in options {
            self.register(option)?;
        }
        Ok(self)
    }

    /// Returns `true` if an option with this key is registered.
    #[must_use]
    pub fn is_registered(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Returns the registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    /// Returns the option's current value.
    ///
    /// Falls back to the default when the value is missing, null, or of the
    /// wrong type (logged as a warning).
    #[must_use]
    pub fn get<T: ConfigValue>(&self, option: &ConfigOption<T>) -> T {
        option.resolve_or_default(self.data.get(option.key()))
    }

    /// Like [`get`](Self::get), but returns `None` instead of the default.
    #[must_use]
    pub fn get_or_none<T: ConfigValue>(&self, option: &ConfigOption<T>) -> Option<T> {
        option.resolve(self.data.get(option.key()))
    }

    /// Overrides the option's value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnregisteredOption`] if the option was never
    /// registered.
    pub fn set<T: ConfigValue>(
        &mut self,
        option: &ConfigOption<T>,
        value: T,
    ) -> Result<&mut Self, ConfigError> {
        self.ensure_registered(option.key())?;
        self.data.insert(option.key().to_owned(), value.to_value());
        Ok(self)
    }

    /// Drops the option's value so [`get`](Self::get) returns the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnregisteredOption`] if the option was never
    /// registered.
    pub fn reset<T: ConfigValue>(&mut self, option: &ConfigOption<T>) -> Result<&mut Self, ConfigError> {
        self.ensure_registered(option.key())?;
        self.data.shift_remove(option.key());
        Ok(self)
    }

    /// Returns the stored value for a key, registered or not.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns every stored value in order.
    #[must_use]
    pub const fn data(&self) -> &ValueMap {
        &self.data
    }

    fn insert_option<T: ConfigValue>(&mut self, option: ConfigOption<T>) {
        let key = option.key().to_owned();
        self.data.insert(key.clone(), option.default_value().to_value());
        self.options.insert(key, Box::new(option));
    }

    fn ensure_registered(&self, key: &str) -> Result<(), ConfigError> {
        if self.options.contains_key(key) {
            Ok(())
        } else {
            Err(ConfigError::UnregisteredOption { key: key.to_owned() })
        }
    }

    /// Calls the listeners of every registered option that has a value.
    fn notify_listeners(&self) {
        for (key, option) in &self.options {
            if let Some(value) = self.data.get(key) {
                option.notify(Some(value));
            }
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("path", &self.path)
            .field("format", &self.format.name())
            .field("options", &self.options.keys().collect::<Vec<_>>())
            .field("data", &self.data)
            .field("version", &self.version)
            .field("file_version", &self.file_version)
            .field("header", &self.header)
            .field("footer", &self.footer)
            .field("write_options", &self.write_options)
            .field("old_key_generator", &self.old_key_generator.is_some())
            .finish()
    }
}
