//! The outer call envelope shared by every method.

use serde_json::{Map, Value};

use crate::field::{FieldDescriptor, FieldValue};
use crate::record::ValidatedRecord;
use crate::schema::Schema;

static ENVELOPE_FIELDS: &[(&str, FieldDescriptor)] = &[
    ("account", FieldDescriptor::char().nullable()),
    ("login", FieldDescriptor::char().required().nullable()),
    ("token", FieldDescriptor::char().required().nullable()),
    ("arguments", FieldDescriptor::arguments().required().nullable()),
    ("method", FieldDescriptor::char().required()),
];

static ENVELOPE: Schema = Schema::new(ENVELOPE_FIELDS);

/// The outer call envelope common to every method.
///
/// `login`, `token` and `arguments` must be present but may be empty;
/// `method` must be present and non-empty; `account` is optional.
///
/// # Examples
///
/// ```
/// use scoring_core::MethodRequest;
/// use serde_json::json;
///
/// let request = MethodRequest::new(&json!({
///     "account": "horns&hoofs",
///     "login": "h&f",
///     "method": "online_score",
///     "token": "",
///     "arguments": {},
/// }));
///
/// assert!(request.record().is_valid());
/// assert_eq!(request.method(), "online_score");
/// assert!(!request.is_admin("admin"));
/// ```
#[derive(Debug, Clone)]
pub struct MethodRequest {
    record: ValidatedRecord,
    arguments: Value,
}

impl MethodRequest {
    /// Returns the shared schema.
    pub fn schema() -> &'static Schema {
        &ENVELOPE
    }

    /// Validates a decoded request body.
    pub fn new(body: &Value) -> Self {
        let record = ValidatedRecord::validate(Self::schema(), body);
        let arguments = record
            .get("arguments")
            .and_then(FieldValue::as_arguments)
            .cloned()
            .map(Value::Object)
            .unwrap_or_else(|| Value::Object(Map::new()));
        Self { record, arguments }
    }

    /// Returns the underlying record.
    pub fn record(&self) -> &ValidatedRecord {
        &self.record
    }

    /// Returns the account, empty when absent.
    pub fn account(&self) -> &str {
        self.record.text("account").unwrap_or_default()
    }

    /// Returns the login, empty when sent empty.
    pub fn login(&self) -> &str {
        self.record.text("login").unwrap_or_default()
    }

    /// Returns the token, empty when sent empty.
    pub fn token(&self) -> &str {
        self.record.text("token").unwrap_or_default()
    }

    /// Returns the method name.
    pub fn method(&self) -> &str {
        self.record.text("method").unwrap_or_default()
    }

    /// Returns the method arguments as a JSON object (empty when sent empty).
    pub fn arguments(&self) -> &Value {
        &self.arguments
    }

    /// Returns true if the login is the admin identity.
    pub fn is_admin(&self, admin_login: &str) -> bool {
        self.login() == admin_login
    }
}
