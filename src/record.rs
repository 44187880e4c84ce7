//! The two-phase validation pipeline shared by every record type.
//!
//! Phase 1 parses each declared field in schema order and collects one error
//! per failing field. Phase 2 runs the schema's record-level check on the
//! partially validated record, unconditionally. Errors are accumulated, never
//! thrown: the record is valid iff the list is empty once both phases ran.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde_json::{Map, Value};

use crate::error::FieldErrorKind;
use crate::field::{FieldKind, FieldValue};
use crate::schema::Schema;

/// A record instance: raw input, parsed values and accumulated errors.
///
/// Created per call and validated exactly once, at construction.
///
/// # Examples
///
/// ```
/// use scoring_core::requests::ClientsInterestsRequest;
/// use scoring_core::record::ValidatedRecord;
/// use serde_json::json;
///
/// let record = ValidatedRecord::validate(
///     ClientsInterestsRequest::schema(),
///     &json!({"date": "20.07.2017"}),
/// );
/// assert!(!record.is_valid());
/// assert_eq!(record.get_errors(), "client_ids not exists");
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedRecord {
    schema: &'static Schema,
    raw: Map<String, Value>,
    parsed: HashMap<&'static str, FieldValue>,
    errors: Vec<String>,
}

impl ValidatedRecord {
    /// Validates `input` against `schema`, using today's UTC date.
    pub fn validate(schema: &'static Schema, input: &Value) -> Self {
        Self::validate_on(schema, input, Utc::now().date_naive())
    }

    /// Validates `input` against `schema` with an explicit reference date.
    pub fn validate_on(schema: &'static Schema, input: &Value, today: NaiveDate) -> Self {
        let mut record = Self {
            schema,
            raw: Map::new(),
            parsed: HashMap::new(),
            errors: Vec::new(),
        };

        match input {
            Value::Object(raw) => {
                record.raw = raw.clone();
                record.check_fields(today);
            }
            // Not a key-value map: nothing can be looked up by field name
            other => record
                .errors
                .push(format!("Unknown error: expected an object, got {}", json_type(other))),
        }

        if let Some(check) = schema.record_check() {
            let extra = check(&record);
            record.errors.extend(extra);
        }

        record
    }

    fn check_fields(&mut self, today: NaiveDate) {
        let schema = self.schema;
        for (name, descriptor) in schema.fields() {
            match descriptor.parse_on(self.raw.get(name), today) {
                Ok(Some(value)) => {
                    self.parsed.insert(name, value);
                }
                Ok(None) => {}
                Err(e) if e.kind() == FieldErrorKind::Missing => {
                    self.errors.push(format!("{} not exists", name));
                }
                Err(e) => self.errors.push(format!("{} has error {}", name, e)),
            }
        }
    }

    /// Returns the schema this record was validated against.
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Returns true if both validation phases produced no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the accumulated error messages, in the order they were found.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Renders the error list as a single `"; "`-joined string.
    pub fn get_errors(&self) -> String {
        self.errors.join("; ")
    }

    /// Returns the raw input value for a field, if the key was present.
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.raw.get(name)
    }

    /// Returns the parsed value for a field that validated with a value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.parsed.get(name)
    }

    /// Returns the parsed string form of a Char, Email or Phone field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// Returns true if `name` is present in the input with a non-empty value.
    ///
    /// Emptiness follows the field's kind, so gender `0` counts as a value.
    /// Undeclared names fall back to JSON-level emptiness.
    pub fn has_value(&self, name: &str) -> bool {
        let Some(value) = self.raw.get(name) else {
            return false;
        };
        match self.schema.descriptor(name) {
            Some(descriptor) => !descriptor.is_empty(value),
            None => !FieldKind::Char.is_empty(value),
        }
    }

    /// Returns the declared fields that carry a non-empty value, in schema order.
    pub fn non_empty_fields(&self) -> Vec<&'static str> {
        self.schema
            .names()
            .filter(|name| self.has_value(name))
            .collect()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
