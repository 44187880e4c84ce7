use std::fmt;

use serde::{Deserialize, Deserializer};

/// A wrapper that keeps salts and other key material out of logs.
///
/// The authenticator's salts are held as `Secret<String>` so that a
/// `Debug`-printed configuration or router never shows them. The value is only
/// reachable through [`expose_secret`](Self::expose_secret).
///
/// - No `Deref`, `AsRef`, `Borrow`, `Clone` or `Copy`
/// - `Debug` and `Display` always print `[REDACTED]`
/// - Deserializes transparently from the inner type, so configuration files
///   can carry plain strings
///
/// # Examples
///
/// ```
/// use scoring_core::Secret;
///
/// let salt = Secret::new("Otus".to_string());
///
/// assert_eq!(format!("{:?}", salt), "[REDACTED]");
/// assert_eq!(salt.expose_secret(), "Otus");
/// ```
// Do NOT derive Clone, Copy or Default; secrets are moved, not duplicated.
pub struct Secret<T> {
    // Must stay private: the field is the whole point of the wrapper.
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the secret value.
    ///
    /// Never log or display the returned reference.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Secret<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Secret::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_redacts_debug() {
        let salt = Secret::new("hunter2".to_string());
        let debug_output = format!("{:?}", salt);

        assert_eq!(debug_output, "[REDACTED]");
        assert!(!debug_output.contains("hunter2"));
        assert!(!debug_output.contains("String"));
    }

    #[test]
    fn secret_redacts_display() {
        let salt = Secret::new("42");
        assert_eq!(format!("{}", salt), "[REDACTED]");
    }

    #[test]
    fn secret_exposes_when_explicit() {
        let salt: Secret<String> = "Otus".to_string().into();
        assert_eq!(salt.expose_secret(), "Otus");
    }

    #[test]
    fn secret_deserializes_from_inner_type() {
        let salt: Secret<String> = serde_json::from_str("\"pepper\"").unwrap();
        assert_eq!(salt.expose_secret(), "pepper");
        assert_eq!(format!("{:?}", salt), "[REDACTED]");
    }
}
