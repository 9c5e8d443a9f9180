//! Configured: code-first configuration files.
//!
//! Declare typed options with defaults and documentation, register them
//! with a [`Config`], and let the library generate, read, validate and
//! regenerate the backing YAML, JSON/JSONC or TOML file.
//!
//! The [`localization`] module reuses the same machinery for translated
//! message catalogs.

pub mod config;
pub mod format;
pub mod localization;
pub mod option;
pub mod value;

#[cfg(test)]
mod test_support;

pub use config::{Config, ConfigError, LoadOutcome};
pub use option::ConfigOption;
pub use value::{ConfigKey, ConfigValue, TypeHint, Value};
