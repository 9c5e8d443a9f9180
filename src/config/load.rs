//! Reading the backing file into the registry.

use std::path::Path;

use crate::value::{ValueMap, coerce};

use super::defaults::{UNVERSIONED, VERSION_KEY};
use super::{Config, LoadOutcome};

impl Config {
    /// Loads the file, creating it if missing and rewriting it if its
    /// version differs from the declared one.
    pub fn load(&mut self) -> LoadOutcome {
        self.load_internal(true, true)
    }

    /// Loads the file, creating it if missing. A version mismatch is left
    /// for the caller to handle.
    pub fn load_without_updating(&mut self) -> LoadOutcome {
        self.load_internal(true, false)
    }

    /// Loads the file if it exists, rewriting it on a version mismatch.
    pub fn load_if_exists(&mut self) -> LoadOutcome {
        self.load_internal(false, true)
    }

    /// Loads the file if it exists, without ever writing it.
    pub fn load_if_exists_without_updating(&mut self) -> LoadOutcome {
        self.load_internal(false, false)
    }

    fn load_internal(&mut self, create: bool, update: bool) -> LoadOutcome {
        let Some(path) = self.path.clone() else {
            tracing::error!("No file specified for config!");
            return LoadOutcome::NoFile;
        };

        if !path.exists() {
            let outcome = if create {
                match self.try_save() {
                    Ok(()) => LoadOutcome::Created,
                    Err(e) => {
                        tracing::error!("Failed to create config file '{}': {e}", path.display());
                        LoadOutcome::Failed {
                            reason: e.to_string(),
                        }
                    }
                }
            } else {
                LoadOutcome::NotFound
            };
            // Listeners still see the defaults
            self.notify_listeners();
            return outcome;
        }

        let mut raw = match self.format.read(&path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Failed to load config file '{}': {e}", path.display());
                return LoadOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        self.rename_old_keys(&mut raw);
        self.coerce_registered(&mut raw);
        self.file_version = raw
            .get(VERSION_KEY)
            .and_then(|value| value.as_int())
            .and_then(|version| i32::try_from(version).ok());
        self.data = raw;

        let migrated = update && self.is_version_mismatch() && self.migrate(&path);

        self.notify_listeners();
        LoadOutcome::Loaded { migrated }
    }

    /// Moves values found under an old key to the current key, in place.
    fn rename_old_keys(&self, raw: &mut ValueMap) {
        for (key, option) in &self.options {
            if raw.contains_key(key) {
                continue;
            }
            let generated = self.old_key_generator.as_ref().map(|generate| generate(key));
            let candidates = option
                .old_keys()
                .iter()
                .map(String::as_str)
                .chain(generated.as_deref());
            for old_key in candidates {
                if let Some((index, _, value)) = raw.shift_remove_full(old_key) {
                    tracing::debug!("Renaming config key '{old_key}' to '{key}'");
                    raw.shift_insert(index, key.clone(), value);
                    break;
                }
            }
        }
    }

    /// Converts the values of registered keys to their declared types.
    ///
    /// A value that does not convert is replaced by the option's default.
    fn coerce_registered(&self, raw: &mut ValueMap) {
        for (key, option) in &self.options {
            let Some(value) = raw.get_mut(key) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            match coerce(std::mem::take(value), &option.hint()) {
                Ok(coerced) => *value = coerced,
                Err(e) => {
                    tracing::warn!(
                        "Invalid value type for option '{key}'. Using default value instead. Reason: {e}"
                    );
                    *value = option.default_raw();
                }
            }
        }
    }

    /// Saves the file with the declared version. Returns `true` once written.
    fn migrate(&mut self, path: &Path) -> bool {
        tracing::info!(
            "Config file '{}' has a different version. Saving current version.",
            path.display()
        );
        match self.try_save() {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to migrate config file '{}': {e}", path.display());
                false
            }
        }
    }

    /// A file without a version key counts as [`UNVERSIONED`].
    fn is_version_mismatch(&self) -> bool {
        self.version
            .is_some_and(|version| self.file_version.unwrap_or(UNVERSIONED) != version)
    }
}
