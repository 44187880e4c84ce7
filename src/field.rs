//! Field descriptors: typed, reusable validation rules bound to one field name.
//!
//! A [`FieldDescriptor`] pairs a [`FieldKind`] with `required` / `nullable`
//! flags and the error text reported when the kind's predicate fails.
//! Descriptors are plain `Copy` values built with `const fn` so that record
//! schemas can be declared as static tables.
//!
//! # Presence vs. emptiness
//!
//! A key may be present in the input with an empty value. Absence is governed
//! by `required`; emptiness by `nullable`. What counts as empty depends on the
//! kind: `0` is empty for a phone number but is a real value for a gender, and
//! `[]` is empty for client ids but an invalid value for arguments.

use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FieldError, FieldErrorKind};

/// Date format accepted by date-like fields (`DD.MM.YYYY`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Days per "year" in the birthday age rule.
pub const DAYS_IN_YEAR: i64 = 365;

/// Maximum accepted age, in [`DAYS_IN_YEAR`]-day years.
pub const MAX_AGE: i64 = 70;

const NOT_EMPTY: &str = "must not be empty";
const NOT_EXISTS: &str = "not exists";

/// The closed set of field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Any string.
    Char,
    /// A key-value map (JSON object).
    Arguments,
    /// A string containing `@`.
    Email,
    /// 11 digits starting with `7`, given as a string or an integer.
    Phone,
    /// A calendar date in `DD.MM.YYYY` form.
    Date,
    /// A [`FieldKind::Date`] no more than [`MAX_AGE`] years in the past.
    BirthDay,
    /// One of the integers 0, 1, 2.
    Gender,
    /// A non-empty list of integers.
    ClientIds,
}

impl FieldKind {
    /// Returns the fixed error text for values failing this kind's predicate.
    pub const fn default_error_text(self) -> &'static str {
        match self {
            FieldKind::Char => "must be a string",
            FieldKind::Arguments => "must be an object",
            FieldKind::Email => "must be a string containing '@'",
            FieldKind::Phone => "must be 11 digits starting with 7",
            FieldKind::Date => "must be a date in DD.MM.YYYY format",
            FieldKind::BirthDay => "must be a DD.MM.YYYY date no more than 70 years ago",
            FieldKind::Gender => "must be one of 0, 1, 2",
            FieldKind::ClientIds => "must be a non-empty list of integers",
        }
    }

    /// Returns true when `value` is this kind's natural empty state.
    ///
    /// `null` is empty for every kind. Beyond that only the empty form of the
    /// kind's own type counts; a value of any other type goes to the predicate.
    pub fn is_empty(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (
                FieldKind::Char
                | FieldKind::Email
                | FieldKind::Phone
                | FieldKind::Date
                | FieldKind::BirthDay,
                Value::String(s),
            ) => s.is_empty(),
            (FieldKind::Phone, Value::Number(n)) => n.as_f64() == Some(0.0),
            (FieldKind::Arguments, Value::Object(map)) => map.is_empty(),
            (FieldKind::ClientIds, Value::Array(items)) => items.is_empty(),
            // Gender 0 ("unknown") is a value, not an absence
            _ => false,
        }
    }

    /// Applies the kind's predicate to a non-empty value.
    fn check(self, value: &Value, today: NaiveDate) -> Option<FieldValue> {
        match self {
            FieldKind::Char => value.as_str().map(|s| FieldValue::Text(s.to_string())),
            FieldKind::Arguments => value.as_object().cloned().map(FieldValue::Arguments),
            FieldKind::Email => value
                .as_str()
                .filter(|s| s.contains('@'))
                .map(|s| FieldValue::Text(s.to_string())),
            FieldKind::Phone => {
                let phone = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return None,
                };
                is_phone_number(&phone).then_some(FieldValue::Phone(phone))
            }
            FieldKind::Date => parse_date(value).map(FieldValue::Date),
            FieldKind::BirthDay => parse_date(value)
                .filter(|date| age_in_years(*date, today) <= MAX_AGE)
                .map(FieldValue::Date),
            FieldKind::Gender => value
                .as_u64()
                .and_then(Gender::from_code)
                .map(FieldValue::Gender),
            FieldKind::ClientIds => {
                let items = value.as_array()?;
                if items.is_empty() {
                    return None;
                }
                items
                    .iter()
                    .map(Value::as_i64)
                    .collect::<Option<Vec<_>>>()
                    .map(FieldValue::ClientIds)
            }
        }
    }
}

fn is_phone_number(phone: &str) -> bool {
    phone.len() == 11 && phone.starts_with('7') && phone.bytes().all(|b| b.is_ascii_digit())
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.as_str()?, DATE_FORMAT).ok()
}

/// Whole 365-day "years" elapsed between `date` and `today`, floored.
///
/// Not calendar arithmetic: leap days push some boundary dates across.
pub fn age_in_years(date: NaiveDate, today: NaiveDate) -> i64 {
    (today - date).num_days().div_euclid(DAYS_IN_YEAR)
}

/// A validation rule for one field.
///
/// # Examples
///
/// ```
/// use scoring_core::field::FieldDescriptor;
/// use serde_json::json;
///
/// let phone = FieldDescriptor::phone().nullable();
///
/// assert!(phone.parse(Some(&json!("79175002040"))).is_ok());
/// assert!(phone.parse(Some(&json!("89175002040"))).is_err());
/// // Empty but nullable: accepted, no value
/// assert_eq!(phone.parse(Some(&json!(""))), Ok(None));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    kind: FieldKind,
    required: bool,
    nullable: bool,
    error_text: &'static str,
}

impl FieldDescriptor {
    /// Creates an optional, non-nullable descriptor of the given kind.
    pub const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            nullable: false,
            error_text: kind.default_error_text(),
        }
    }

    /// A [`FieldKind::Char`] descriptor.
    pub const fn char() -> Self {
        Self::new(FieldKind::Char)
    }

    /// A [`FieldKind::Arguments`] descriptor.
    pub const fn arguments() -> Self {
        Self::new(FieldKind::Arguments)
    }

    /// A [`FieldKind::Email`] descriptor.
    pub const fn email() -> Self {
        Self::new(FieldKind::Email)
    }

    /// A [`FieldKind::Phone`] descriptor.
    pub const fn phone() -> Self {
        Self::new(FieldKind::Phone)
    }

    /// A [`FieldKind::Date`] descriptor.
    pub const fn date() -> Self {
        Self::new(FieldKind::Date)
    }

    /// A [`FieldKind::BirthDay`] descriptor.
    pub const fn birthday() -> Self {
        Self::new(FieldKind::BirthDay)
    }

    /// A [`FieldKind::Gender`] descriptor.
    pub const fn gender() -> Self {
        Self::new(FieldKind::Gender)
    }

    /// A [`FieldKind::ClientIds`] descriptor.
    pub const fn client_ids() -> Self {
        Self::new(FieldKind::ClientIds)
    }

    /// Marks the field as required: its key must be present in the input.
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Marks the field as nullable: a present-but-empty value is accepted.
    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    /// Replaces the error text reported when the predicate fails.
    pub const fn with_error_text(self, error_text: &'static str) -> Self {
        Self { error_text, ..self }
    }

    /// Returns the field kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns whether the key must be present.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns whether an empty value is accepted.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the error text reported when the predicate fails.
    pub fn error_text(&self) -> &'static str {
        self.error_text
    }

    /// Returns true when `value` is empty for this field's kind.
    pub fn is_empty(&self, value: &Value) -> bool {
        self.kind.is_empty(value)
    }

    /// Parses a raw value, using today's UTC date for age checks.
    ///
    /// `raw` is `None` when the key is absent from the input.
    ///
    /// # Errors
    ///
    /// - [`FieldErrorKind::Missing`] if absent while required
    /// - [`FieldErrorKind::Empty`] if present but empty while not nullable
    /// - [`FieldErrorKind::Invalid`] if present and failing the predicate
    pub fn parse(&self, raw: Option<&Value>) -> Result<Option<FieldValue>, FieldError> {
        self.parse_on(raw, Utc::now().date_naive())
    }

    /// Parses a raw value against an explicit reference date.
    ///
    /// Returns `Ok(None)` for an absent optional field or an empty nullable one.
    pub fn parse_on(
        &self,
        raw: Option<&Value>,
        today: NaiveDate,
    ) -> Result<Option<FieldValue>, FieldError> {
        let Some(value) = raw else {
            return if self.required {
                Err(FieldError::new(FieldErrorKind::Missing, NOT_EXISTS))
            } else {
                Ok(None)
            };
        };

        if self.is_empty(value) {
            return if self.nullable {
                Ok(None)
            } else {
                Err(FieldError::new(FieldErrorKind::Empty, NOT_EMPTY))
            };
        }

        self.kind
            .check(value, today)
            .map(Some)
            .ok_or(FieldError::new(FieldErrorKind::Invalid, self.error_text))
    }
}

/// Gender codes accepted by [`FieldKind::Gender`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// 0
    Unknown,
    /// 1
    Male,
    /// 2
    Female,
}

impl Gender {
    /// Maps a numeric code to a gender.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Gender::Unknown),
            1 => Some(Gender::Male),
            2 => Some(Gender::Female),
            _ => None,
        }
    }

    /// Returns the numeric code.
    pub fn code(self) -> u8 {
        match self {
            Gender::Unknown => 0,
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Unknown => write!(f, "unknown"),
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// A successfully parsed, typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Char and Email values
    Text(String),
    /// Phone number in its canonical string form
    Phone(String),
    /// Nested argument map
    Arguments(Map<String, Value>),
    /// Date and BirthDay values
    Date(NaiveDate),
    /// Gender value
    Gender(Gender),
    /// Client id list, in request order
    ClientIds(Vec<i64>),
}

impl FieldValue {
    /// Returns the string form of Text and Phone values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Phone(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the argument map.
    pub fn as_arguments(&self) -> Option<&Map<String, Value>> {
        match self {
            FieldValue::Arguments(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Returns the gender.
    pub fn as_gender(&self) -> Option<Gender> {
        match self {
            FieldValue::Gender(g) => Some(*g),
            _ => None,
        }
    }

    /// Returns the client ids.
    pub fn as_client_ids(&self) -> Option<&[i64]> {
        match self {
            FieldValue::ClientIds(ids) => Some(ids),
            _ => None,
        }
    }
}
