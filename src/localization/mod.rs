//! Translated message catalogs stored as configuration files.
//!
//! This module provides:
//! - Message identifiers ([`LocalizationKey`], [`MessageKey`])
//! - Placeholder names per key ([`ParameterTable`])
//! - Bundled default files ([`ResourceProvider`], [`EmbeddedResources`])
//! - The catalog itself ([`Localization`])
//!
//! # Files
//!
//! Each language is one [`Config`] whose options are the registered keys,
//! each defaulting to the key itself. Missing files are deployed from the
//! bundled resource when one exists and generated from the keys otherwise.
//!
//! # Lookup
//!
//! [`Localization::get`] tries the selected language, then the fallback
//! language, then returns the key. Placeholders such as `{player}` are
//! replaced by the arguments, matched to the key's parameter names by
//! position.

mod key;
mod resource;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use key::{LocalizationKey, MessageKey, ParameterTable};
pub use resource::{EmbeddedResources, ResourceProvider};

use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::config::defaults::{PARAMETER_CLOSE, PARAMETER_OPEN};
use crate::config::{Config, ConfigError};
use crate::format::{FormatFactory, FormatRegistry, write_atomic};
use crate::option::ConfigOption;

/// Language passed to the path generator to find the file extension.
const PROBE_LANGUAGE: &str = "default";

/// Maps a language code to its localization file.
pub type PathGenerator = Box<dyn Fn(&str) -> PathBuf + Send + Sync>;

/// A keyed message catalog with a selected and a fallback language.
///
/// # Example
///
/// ```no_run
/// use configured::format::YamlFormat;
/// use configured::localization::{Localization, MessageKey};
///
/// const WELCOME: MessageKey = MessageKey::with_parameters("welcome", &["player"]);
///
/// let mut messages = Localization::new(
///     |language| format!("lang/{language}.yml").into(),
///     || Box::new(YamlFormat::new()),
/// )
/// .with_language("de_de")
/// .with_fallback_language("en_us")
/// .with_version(1);
/// messages.register_key(&WELCOME);
/// messages.load();
///
/// println!("{}", messages.get(&WELCOME, &[&"Alex"]));
/// ```
pub struct Localization {
    path_for: PathGenerator,
    format: FormatFactory,
    keys: IndexSet<String>,
    parameters: ParameterTable,
    open: String,
    close: String,
    language: Option<String>,
    fallback_language: Option<String>,
    version: Option<i32>,
    update_with_new_keys: bool,
    resources: Option<Box<dyn ResourceProvider>>,
    config: Option<Config>,
    fallback_config: Option<Config>,
}

impl Localization {
    /// Creates a catalog storing each language at `path_for(language)`.
    #[must_use]
    pub fn new(
        path_for: impl Fn(&str) -> PathBuf + Send + Sync + 'static,
        format: FormatFactory,
    ) -> Self {
        Self {
            path_for: Box::new(path_for),
            format,
            keys: IndexSet::new(),
            parameters: ParameterTable::new(),
            open: PARAMETER_OPEN.to_owned(),
            close: PARAMETER_CLOSE.to_owned(),
            language: None,
            fallback_language: None,
            version: None,
            update_with_new_keys: false,
            resources: None,
            config: None,
            fallback_config: None,
        }
    }

    /// Like [`new`](Self::new), picking the format by the extension of
    /// `path_for("default")`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Format`] if the generated path has no
    /// extension or no format is registered for it.
    pub fn from_pattern(
        path_for: impl Fn(&str) -> PathBuf + Send + Sync + 'static,
        formats: &FormatRegistry,
    ) -> Result<Self, ConfigError> {
        let format = formats.factory_for_path(&path_for(PROBE_LANGUAGE))?;
        Ok(Self::new(path_for, format))
    }

    /// Selects the language to load.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.set_language(language);
        self
    }

    /// Selects the language to load. Takes effect on the next [`load`](Self::load).
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = Some(language.into());
    }

    /// Returns the selected language.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Sets the language used for keys the selected language lacks.
    #[must_use]
    pub fn with_fallback_language(mut self, language: impl Into<String>) -> Self {
        self.fallback_language = Some(language.into());
        self
    }

    /// Returns the fallback language.
    #[must_use]
    pub fn fallback_language(&self) -> Option<&str> {
        self.fallback_language.as_deref()
    }

    /// Declares the version of the localization files.
    ///
    /// A file with another version is redeployed from the bundled resource.
    #[must_use]
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }

    /// Returns the declared version.
    #[must_use]
    pub const fn version(&self) -> Option<i32> {
        self.version
    }

    /// Rewrites outdated files so they gain newly registered keys.
    #[must_use]
    pub fn with_update_with_new_keys(mut self, update: bool) -> Self {
        self.update_with_new_keys = update;
        self
    }

    /// Changes the placeholder delimiters (`{` and `}` by default).
    #[must_use]
    pub fn with_parameter_delimiters(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.open = open.into();
        self.close = close.into();
        self
    }

    /// Sets where missing or outdated files are deployed from.
    #[must_use]
    pub fn with_resources(mut self, resources: impl ResourceProvider + 'static) -> Self {
        self.resources = Some(Box::new(resources));
        self
    }

    /// Registers a key and records its parameter names.
    pub fn register_key(&mut self, key: &impl LocalizationKey) -> &mut Self {
        self.keys.insert(key.key().into_owned());
        self.parameters.insert_key(key);
        self
    }

    /// Registers keys in order.
    pub fn register_keys<K: LocalizationKey>(&mut self, keys: impl IntoIterator<Item = K>) -> &mut Self {
        for key in keys {
            self.register_key(&key);
        }
        self
    }

    /// Returns the recorded parameter names.
    #[must_use]
    pub const fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    /// Loads (deploying or generating as needed) the selected and fallback
    /// languages.
    ///
    /// Without a selected language the fallback language is selected.
    pub fn load(&mut self) -> &mut Self {
        let language = if let Some(language) = self.language.clone() {
            language
        } else if let Some(fallback) = self.fallback_language.clone() {
            tracing::warn!("No language code specified for localization, using fallback language...");
            self.language = Some(fallback.clone());
            fallback
        } else {
            tracing::warn!("No language or fallback language set for localization!");
            return self;
        };

        let mut config = self.language_config(&language);
        self.deploy_or_load(&mut config, &language);
        self.config = Some(config);

        self.fallback_config = match self.fallback_language.clone() {
            Some(fallback) if fallback != language => {
                let mut config = self.language_config(&fallback);
                self.deploy_or_load(&mut config, &fallback);
                Some(config)
            }
            _ => None,
        };
        self
    }

    /// Returns the message for `key` with placeholders replaced.
    ///
    /// Arguments are matched to the key's parameter names by position;
    /// extra arguments or names are ignored.
    #[must_use]
    pub fn get(&self, key: &impl LocalizationKey, args: &[&dyn Display]) -> String {
        let name = key.key();
        let mut text = self.lookup(&name);
        let recorded = self.parameters.get(&name);
        let names: Vec<&str> = match recorded {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => key.parameters().to_vec(),
        };
        for (parameter, arg) in names.iter().zip(args) {
            let placeholder = format!("{}{parameter}{}", self.open, self.close);
            text = text.replace(&placeholder, &arg.to_string());
        }
        text
    }

    fn lookup(&self, key: &str) -> String {
        let option = ConfigOption::new(key, String::new());
        self.config
            .as_ref()
            .and_then(|config| config.get_or_none(&option))
            .or_else(|| {
                self.fallback_config
                    .as_ref()
                    .and_then(|config| config.get_or_none(&option))
            })
            .unwrap_or_else(|| key.to_owned())
    }

    fn language_config(&self, language: &str) -> Config {
        let mut config =
            Config::from_boxed(Some((self.path_for)(language)), (self.format)()).with_separate_options(false);
        if let Some(version) = self.version {
            config.set_version(version);
        }
        for key in &self.keys {
            if let Err(e) = config.option_of(key.clone(), key.clone()) {
                tracing::warn!("Skipping localization key: {e}");
            }
        }
        config
    }

    fn deploy_or_load(&self, config: &mut Config, language: &str) {
        if !config.exists() {
            if self.resources.is_some() {
                tracing::info!(
                    "No localization file found for '{language}'. Deploying from resource..."
                );
                self.deploy(config, language);
                return;
            }
            tracing::warn!(
                "No localization file found for '{language}', but no resources are set! \
                 Generating a localization file from the registered keys instead."
            );
        }

        if self.update_with_new_keys {
            config.load();
        } else {
            config.load_without_updating();
        }

        if self.is_version_mismatch(config) {
            if self.resources.is_some() {
                tracing::info!(
                    "Version mismatch detected. Deploying from resource for '{language}'..."
                );
                self.deploy(config, language);
            } else {
                tracing::warn!(
                    "Version mismatch detected for '{language}', but no resources are set! \
                     Please ensure the localization files are up to date."
                );
            }
        }
    }

    /// A file without a version key is outdated.
    fn is_version_mismatch(&self, config: &Config) -> bool {
        self.version
            .is_some_and(|version| config.current_version() != Some(version))
    }

    fn deploy(&self, config: &mut Config, language: &str) {
        let deployed = config
            .path()
            .is_some_and(|path| self.deploy_resource(path, language));
        if !deployed {
            config.load();
            return;
        }
        config.load_without_updating();
        if self.version.is_some() && config.current_version().is_none() {
            // Stamp the version without dropping keys this build doesn't know
            config.save_with_unregistered_data();
        }
    }

    fn deploy_resource(&self, path: &Path, language: &str) -> bool {
        let Some(resources) = &self.resources else {
            return false;
        };
        let Some(content) = resources.resource(language) else {
            tracing::error!(
                "Failed to deploy resource: no bundled localization for '{language}'. \
                 Local file will be used instead."
            );
            return false;
        };
        tracing::info!("Deploying resource for '{language}' to '{}'...", path.display());
        match write_atomic(path, &content) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to deploy resource: {e}");
                false
            }
        }
    }
}

impl fmt::Debug for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localization")
            .field("keys", &self.keys)
            .field("parameters", &self.parameters)
            .field("open", &self.open)
            .field("close", &self.close)
            .field("language", &self.language)
            .field("fallback_language", &self.fallback_language)
            .field("version", &self.version)
            .field("update_with_new_keys", &self.update_with_new_keys)
            .field("resources", &self.resources.is_some())
            .field("config", &self.config)
            .field("fallback_config", &self.fallback_config)
            .finish_non_exhaustive()
    }
}
