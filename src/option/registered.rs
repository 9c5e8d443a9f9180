//! Type-erased view of a registered option.

use crate::value::{ConfigValue, TypeHint, Value};

use super::ConfigOption;

/// What the registry needs from an option without knowing its type.
pub(crate) trait RegisteredOption: Send + Sync {
    fn key(&self) -> &str;

    fn default_raw(&self) -> Value;

    fn hint(&self) -> TypeHint;

    fn is_hidden(&self) -> bool;

    /// Compares as `T`, so sets match regardless of order.
    fn is_default(&self, value: &Value) -> bool;

    fn header(&self) -> Option<&str>;

    fn description(&self) -> Option<&str>;

    fn footer(&self) -> Option<&str>;

    fn old_keys(&self) -> &[String];

    /// Runs the listeners with the resolved form of `value`.
    fn notify(&self, value: Option<&Value>);
}

impl<T: ConfigValue> RegisteredOption for ConfigOption<T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn default_raw(&self) -> Value {
        self.default.to_value()
    }

    fn hint(&self) -> TypeHint {
        T::type_hint()
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn is_default(&self, value: &Value) -> bool {
        T::from_value(value).is_ok_and(|value| value == self.default)
    }

    fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    fn old_keys(&self) -> &[String] {
        &self.old_keys
    }

    fn notify(&self, value: Option<&Value>) {
        if self.listeners.is_empty() {
            return;
        }
        let resolved = self.resolve_or_default(value);
        for listener in &self.listeners {
            listener(&resolved);
        }
    }
}
