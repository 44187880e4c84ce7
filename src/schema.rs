//! Per-record-type schemas.
//!
//! A [`Schema`] is the ordered table of `(field name, descriptor)` pairs for one
//! record type, plus an optional record-level check run after the field-level
//! phase. Schemas are built entirely from `const fn`s, so each record type
//! declares its schema as a `static` that every instance and thread reads.
//!
//! ```
//! use scoring_core::field::FieldDescriptor;
//! use scoring_core::schema::Schema;
//!
//! static FIELDS: &[(&str, FieldDescriptor)] = &[
//!     ("client_ids", FieldDescriptor::client_ids().required()),
//!     ("date", FieldDescriptor::date().nullable()),
//! ];
//! static SCHEMA: Schema = Schema::new(FIELDS);
//!
//! assert_eq!(SCHEMA.names().collect::<Vec<_>>(), ["client_ids", "date"]);
//! assert!(SCHEMA.descriptor("client_ids").unwrap().is_required());
//! ```

use std::fmt;

use crate::field::FieldDescriptor;
use crate::record::ValidatedRecord;

/// Record-level invariant, run after every field has been parsed.
///
/// Returns the extra error messages to append; empty when the invariant holds.
pub type RecordCheck = fn(&ValidatedRecord) -> Vec<String>;

/// The ordered set of field descriptors belonging to one record type.
#[derive(Clone, Copy)]
pub struct Schema {
    fields: &'static [(&'static str, FieldDescriptor)],
    record_check: Option<RecordCheck>,
}

impl Schema {
    /// Creates a schema over a static field table, in declaration order.
    pub const fn new(fields: &'static [(&'static str, FieldDescriptor)]) -> Self {
        Self {
            fields,
            record_check: None,
        }
    }

    /// Attaches the record-level check.
    pub const fn with_record_check(self, check: RecordCheck) -> Self {
        Self {
            record_check: Some(check),
            ..self
        }
    }

    /// Iterates `(name, descriptor)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldDescriptor)> + '_ {
        self.fields.iter().map(|(name, d)| (*name, d))
    }

    /// Iterates field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Looks up a descriptor by field name.
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, d)| d)
    }

    /// Returns the record-level check, if any.
    pub fn record_check(&self) -> Option<RecordCheck> {
        self.record_check
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if no field name is declared twice.
    pub fn has_unique_names(&self) -> bool {
        self.fields
            .iter()
            .enumerate()
            .all(|(i, (name, _))| self.fields[..i].iter().all(|(other, _)| other != name))
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields)
            .field("record_check", &self.record_check.is_some())
            .finish()
    }
}
