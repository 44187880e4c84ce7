use std::env;

use serde::Deserialize;

use crate::secret::Secret;

/// Environment variable overriding the shared salt.
pub const ENV_SALT: &str = "SCORING_SALT";
/// Environment variable overriding the admin login.
pub const ENV_ADMIN_LOGIN: &str = "SCORING_ADMIN_LOGIN";
/// Environment variable overriding the admin salt.
pub const ENV_ADMIN_SALT: &str = "SCORING_ADMIN_SALT";

const DEFAULT_SALT: &str = "Otus";
const DEFAULT_ADMIN_LOGIN: &str = "admin";
const DEFAULT_ADMIN_SALT: &str = "42";

/// Authentication settings injected into the [`Authenticator`](crate::Authenticator).
///
/// Missing keys fall back to the defaults when loaded from JSON.
///
/// ```
/// use scoring_core::ServiceConfig;
///
/// let config: ServiceConfig = serde_json::from_str(r#"{"salt": "pepper"}"#).unwrap();
/// assert_eq!(config.salt.expose_secret(), "pepper");
/// assert_eq!(config.admin_login, "admin");
/// ```
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Salt appended to `account ++ login` for regular callers
    pub salt: Secret<String>,
    /// Login that identifies the admin caller
    pub admin_login: String,
    /// Salt appended to the current UTC hour for the admin caller
    pub admin_salt: Secret<String>,
}

impl ServiceConfig {
    /// Reads the configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            salt: Secret::new(lookup(ENV_SALT).unwrap_or_else(|| DEFAULT_SALT.to_string())),
            admin_login: lookup(ENV_ADMIN_LOGIN).unwrap_or_else(|| DEFAULT_ADMIN_LOGIN.to_string()),
            admin_salt: Secret::new(
                lookup(ENV_ADMIN_SALT).unwrap_or_else(|| DEFAULT_ADMIN_SALT.to_string()),
            ),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
