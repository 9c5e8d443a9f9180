//! Default values and reserved names.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// Reserved top-level key holding a file's schema version.
pub const VERSION_KEY: &str = "_version";

/// Value of the version option before any version is stamped.
pub const UNVERSIONED: i32 = 0;

/// Default opening delimiter of localization placeholders.
pub const PARAMETER_OPEN: &str = "{";

/// Default closing delimiter of localization placeholders.
pub const PARAMETER_CLOSE: &str = "}";
