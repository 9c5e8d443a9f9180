//! Writing the registry back to its file.

use crate::format::{Comments, Document, Entry};
use crate::option::RegisteredOption;
use crate::value::Value;

use super::defaults::VERSION_KEY;
use super::{Config, ConfigError};

impl Config {
    /// Writes every registered option to the file.
    ///
    /// Failures are logged, never returned; use [`try_save`](Self::try_save)
    /// to handle them.
    pub fn save(&mut self) -> &mut Self {
        self.save_logged(false);
        self
    }

    /// Writes every registered option, then every other key read from the
    /// file, in file order.
    pub fn save_with_unregistered_data(&mut self) -> &mut Self {
        self.save_logged(true);
        self
    }

    /// Like [`save`](Self::save), but returns the failure.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoFile`] without a path, or
    /// [`ConfigError::Format`] if rendering or writing fails.
    pub fn try_save(&mut self) -> Result<(), ConfigError> {
        self.save_internal(false)
    }

    /// Like [`save_with_unregistered_data`](Self::save_with_unregistered_data),
    /// but returns the failure.
    ///
    /// # Errors
    ///
    /// See [`try_save`](Self::try_save).
    pub fn try_save_with_unregistered_data(&mut self) -> Result<(), ConfigError> {
        self.save_internal(true)
    }

    fn save_logged(&mut self, include_unregistered: bool) {
        match self.save_internal(include_unregistered) {
            Ok(()) => {}
            Err(ConfigError::NoFile) => tracing::error!("No file specified for config!"),
            Err(e) => tracing::error!("Failed to save config file: {e}"),
        }
    }

    fn save_internal(&mut self, include_unregistered: bool) -> Result<(), ConfigError> {
        let path = self.path.clone().ok_or(ConfigError::NoFile)?;

        let stamps_version = self.options.contains_key(VERSION_KEY);
        if stamps_version {
            match self.version {
                Some(version) => {
                    self.data
                        .insert(VERSION_KEY.to_owned(), Value::Int(i64::from(version)));
                }
                None => {
                    self.data.shift_remove(VERSION_KEY);
                }
            }
        }

        let registered = self.effective_values();
        let mut entries: Vec<Entry<'_>> = registered
            .iter()
            .map(|(option, value)| Entry {
                key: option.key(),
                value,
                comments: Comments {
                    header: option.header(),
                    description: option.description(),
                    footer: option.footer(),
                },
            })
            .collect();
        if include_unregistered {
            entries.extend(
                self.data
                    .iter()
                    .filter(|(key, _)| !self.options.contains_key(key.as_str()))
                    .map(|(key, value)| Entry {
                        key,
                        value,
                        comments: Comments::default(),
                    }),
            );
        }

        let document = Document {
            header: self.header.as_deref(),
            footer: self.footer.as_deref(),
            entries,
        };

        if !path.exists() {
            tracing::info!("Config file '{}' doesn't exist, creating it", path.display());
        }
        self.format.write(&path, &document, self.write_options)?;

        if stamps_version {
            self.file_version = self.version;
        }
        Ok(())
    }

    /// Pairs every written option with its value or default.
    ///
    /// Hidden options still at their default are left out.
    fn effective_values(&self) -> Vec<(&dyn RegisteredOption, Value)> {
        self.options
            .values()
            .filter_map(|option| {
                let value = self
                    .data
                    .get(option.key())
                    .filter(|value| !value.is_null())
                    .cloned()
                    .unwrap_or_else(|| option.default_raw());
                if option.is_hidden() && option.is_default(&value) {
                    None
                } else {
                    Some((option.as_ref(), value))
                }
            })
            .collect()
    }
}
