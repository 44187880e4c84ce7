//! Argument records for the two scoring methods.

use chrono::NaiveDate;
use serde_json::Value;

use crate::field::{FieldDescriptor, FieldValue, Gender};
use crate::record::ValidatedRecord;
use crate::schema::Schema;

static CLIENTS_INTERESTS_FIELDS: &[(&str, FieldDescriptor)] = &[
    ("client_ids", FieldDescriptor::client_ids().required()),
    ("date", FieldDescriptor::date().nullable()),
];

static CLIENTS_INTERESTS: Schema = Schema::new(CLIENTS_INTERESTS_FIELDS);

static ONLINE_SCORE_FIELDS: &[(&str, FieldDescriptor)] = &[
    ("first_name", FieldDescriptor::char().nullable()),
    ("last_name", FieldDescriptor::char().nullable()),
    ("email", FieldDescriptor::email().nullable()),
    ("phone", FieldDescriptor::phone().nullable()),
    ("birthday", FieldDescriptor::birthday().nullable()),
    ("gender", FieldDescriptor::gender().nullable()),
];

static ONLINE_SCORE: Schema = Schema::new(ONLINE_SCORE_FIELDS).with_record_check(has_valid_pair);

/// Pairs of which at least one must be fully filled for `online_score`.
pub const SCORE_FIELD_PAIRS: [(&str, &str); 3] = [
    ("phone", "email"),
    ("first_name", "last_name"),
    ("gender", "birthday"),
];

/// Error appended when no pair in [`SCORE_FIELD_PAIRS`] is fully filled.
pub const NO_VALID_PAIR: &str = "Valid fields pairs not found";

fn has_valid_pair(record: &ValidatedRecord) -> Vec<String> {
    let found = SCORE_FIELD_PAIRS
        .iter()
        .any(|(a, b)| record.has_value(a) && record.has_value(b));
    if found {
        Vec::new()
    } else {
        vec![NO_VALID_PAIR.to_string()]
    }
}

/// Arguments of the `clients_interests` method.
///
/// `client_ids` is a required non-empty list of integers; `date` is an
/// optional `DD.MM.YYYY` date.
#[derive(Debug, Clone)]
pub struct ClientsInterestsRequest {
    record: ValidatedRecord,
}

impl ClientsInterestsRequest {
    /// Returns the shared schema.
    pub fn schema() -> &'static Schema {
        &CLIENTS_INTERESTS
    }

    /// Validates method arguments.
    pub fn new(arguments: &Value) -> Self {
        Self {
            record: ValidatedRecord::validate(Self::schema(), arguments),
        }
    }

    /// Validates method arguments against an explicit reference date.
    pub fn new_on(arguments: &Value, today: NaiveDate) -> Self {
        Self {
            record: ValidatedRecord::validate_on(Self::schema(), arguments, today),
        }
    }

    /// Returns the underlying record.
    pub fn record(&self) -> &ValidatedRecord {
        &self.record
    }

    /// Returns the requested client ids in request order.
    pub fn client_ids(&self) -> &[i64] {
        self.record
            .get("client_ids")
            .and_then(FieldValue::as_client_ids)
            .unwrap_or_default()
    }

    /// Returns the requested date.
    pub fn date(&self) -> Option<NaiveDate> {
        self.record.get("date").and_then(FieldValue::as_date)
    }
}

/// Arguments of the `online_score` method.
///
/// Every field is optional and nullable on its own; the record is valid only if
/// at least one of the [`SCORE_FIELD_PAIRS`] has both members filled.
///
/// # Examples
///
/// ```
/// use scoring_core::requests::OnlineScoreRequest;
/// use serde_json::json;
///
/// let ok = OnlineScoreRequest::new(&json!({"phone": "79175002040", "email": "a@b.c"}));
/// assert!(ok.record().is_valid());
///
/// let lonely = OnlineScoreRequest::new(&json!({"first_name": "A"}));
/// assert_eq!(lonely.record().get_errors(), "Valid fields pairs not found");
/// ```
#[derive(Debug, Clone)]
pub struct OnlineScoreRequest {
    record: ValidatedRecord,
}

impl OnlineScoreRequest {
    /// Returns the shared schema.
    pub fn schema() -> &'static Schema {
        &ONLINE_SCORE
    }

    /// Validates method arguments.
    pub fn new(arguments: &Value) -> Self {
        Self {
            record: ValidatedRecord::validate(Self::schema(), arguments),
        }
    }

    /// Validates method arguments against an explicit reference date.
    pub fn new_on(arguments: &Value, today: NaiveDate) -> Self {
        Self {
            record: ValidatedRecord::validate_on(Self::schema(), arguments, today),
        }
    }

    /// Returns the underlying record.
    pub fn record(&self) -> &ValidatedRecord {
        &self.record
    }

    /// Returns the first name.
    pub fn first_name(&self) -> Option<&str> {
        self.record.text("first_name")
    }

    /// Returns the last name.
    pub fn last_name(&self) -> Option<&str> {
        self.record.text("last_name")
    }

    /// Returns the email.
    pub fn email(&self) -> Option<&str> {
        self.record.text("email")
    }

    /// Returns the phone number.
    pub fn phone(&self) -> Option<&str> {
        self.record.text("phone")
    }

    /// Returns the birthday.
    pub fn birthday(&self) -> Option<NaiveDate> {
        self.record.get("birthday").and_then(FieldValue::as_date)
    }

    /// Returns the gender.
    pub fn gender(&self) -> Option<Gender> {
        self.record.get("gender").and_then(FieldValue::as_gender)
    }

    /// Returns the declared fields that were sent non-empty.
    pub fn has(&self) -> Vec<&'static str> {
        self.record.non_empty_fields()
    }
}
