//! Token authentication.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha512};

use crate::config::ServiceConfig;
use crate::envelope::MethodRequest;
use crate::error::AuthError;
use crate::secret::Secret;

/// Timestamp format mixed into the admin digest (UTC hour resolution).
pub const ADMIN_HOUR_FORMAT: &str = "%Y%m%d%H";

/// Checks envelope tokens against the expected SHA-512 digest.
///
/// - admin: `sha512(YYYYMMDDHH ++ admin_salt)`, with the current UTC hour
/// - everyone else: `sha512(account ++ login ++ salt)`
///
/// The comparison is exact: lowercase hex, no trimming.
///
/// # Examples
///
/// ```
/// use scoring_core::{Authenticator, MethodRequest, ServiceConfig};
/// use serde_json::json;
///
/// let auth = Authenticator::new(ServiceConfig::default());
/// let mut body = json!({
///     "account": "horns&hoofs",
///     "login": "h&f",
///     "method": "online_score",
///     "token": "",
///     "arguments": {},
/// });
///
/// let expected = auth.expected_token(&MethodRequest::new(&body));
/// body["token"] = json!(expected);
///
/// assert!(auth.check(&MethodRequest::new(&body)).is_ok());
/// ```
#[derive(Debug)]
pub struct Authenticator {
    admin_login: String,
    salt: Secret<String>,
    admin_salt: Secret<String>,
}

impl Authenticator {
    /// Creates an authenticator from the injected configuration.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            admin_login: config.admin_login,
            salt: config.salt,
            admin_salt: config.admin_salt,
        }
    }

    /// Returns the login that identifies the admin caller.
    pub fn admin_login(&self) -> &str {
        &self.admin_login
    }

    /// Returns true if the request comes from the admin identity.
    pub fn is_admin(&self, request: &MethodRequest) -> bool {
        request.is_admin(&self.admin_login)
    }

    /// Computes the token this request must carry right now.
    pub fn expected_token(&self, request: &MethodRequest) -> String {
        self.expected_token_at(request, Utc::now())
    }

    /// Computes the token this request must carry at `now`.
    pub fn expected_token_at(&self, request: &MethodRequest, now: DateTime<Utc>) -> String {
        let mut hasher = Sha512::new();
        if self.is_admin(request) {
            hasher.update(now.format(ADMIN_HOUR_FORMAT).to_string());
            hasher.update(self.admin_salt.expose_secret());
        } else {
            hasher.update(request.account());
            hasher.update(request.login());
            hasher.update(self.salt.expose_secret());
        }
        hex::encode(hasher.finalize())
    }

    /// Authenticates the request against the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the token does not match; the error never says why.
    pub fn check(&self, request: &MethodRequest) -> Result<(), AuthError> {
        self.check_at(request, Utc::now())
    }

    /// Authenticates the request as of `now`.
    pub fn check_at(&self, request: &MethodRequest, now: DateTime<Utc>) -> Result<(), AuthError> {
        if self.expected_token_at(request, now) == request.token() {
            Ok(())
        } else {
            Err(AuthError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sha512_hex(input: &str) -> String {
        hex::encode(Sha512::digest(input.as_bytes()))
    }

    fn request(account: &str, login: &str, token: &str) -> MethodRequest {
        MethodRequest::new(&json!({
            "account": account,
            "login": login,
            "token": token,
            "method": "online_score",
            "arguments": {},
        }))
    }

    fn auth() -> Authenticator {
        Authenticator::new(ServiceConfig::default())
    }

    #[test]
    fn user_digest_concatenates_account_login_salt() {
        let expected = sha512_hex("horns&hoofsh&fOtus");
        assert_eq!(auth().expected_token(&request("horns&hoofs", "h&f", "")), expected);
        assert!(auth().check(&request("horns&hoofs", "h&f", &expected)).is_ok());
    }

    #[test]
    fn user_digest_matches_known_token() {
        assert_eq!(
            auth().expected_token(&request("horns&hoofs", "h&f", "")),
            "55cc9ce545bcd144300fe9efc28e65d415b923ebb6be1e19d2750a2c03e80dd2\
             09a27954dca045e5bb12418e7d89b6d718a9e35af34e14e1d5bcd5a08f21fc95"
        );
    }

    #[test]
    fn admin_digest_uses_utc_hour() {
        let now = Utc.with_ymd_and_hms(2017, 7, 20, 13, 59, 0).unwrap();
        let expected = sha512_hex("201707201342");
        let admin = request("horns&hoofs", "admin", &expected);

        assert_eq!(auth().expected_token_at(&admin, now), expected);
        assert!(auth().check_at(&admin, now).is_ok());

        let next_hour = Utc.with_ymd_and_hms(2017, 7, 20, 14, 0, 0).unwrap();
        assert_eq!(auth().check_at(&admin, next_hour), Err(AuthError));
    }

    #[test]
    fn mismatches_are_rejected() {
        let good = sha512_hex("horns&hoofsh&fOtus");
        let cases = [
            String::new(),
            "sdd".to_string(),
            good.to_uppercase(),
            format!(" {}", good),
            format!("{}\n", good),
        ];
        for token in cases {
            assert_eq!(
                auth().check(&request("horns&hoofs", "h&f", &token)),
                Err(AuthError)
            );
        }
    }

    #[test]
    fn injected_secrets_change_the_digest() {
        let custom = Authenticator::new(ServiceConfig {
            salt: Secret::new("pepper".to_string()),
            ..ServiceConfig::default()
        });
        let req = request("a", "b", "");
        assert_eq!(custom.expected_token(&req), sha512_hex("abpepper"));
        assert_ne!(custom.expected_token(&req), auth().expected_token(&req));
    }

    #[test]
    fn debug_does_not_leak_salts() {
        let rendered = format!("{:?}", auth());
        assert!(!rendered.contains("Otus"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
