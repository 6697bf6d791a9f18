//! Client record model.
//!
//! A client record is a semi-structured mapping from field name to scalar
//! value. There is no fixed schema: whatever keys the source data carries are
//! queryable. Field access is an explicit lookup so that "field missing" stays
//! distinguishable from "field present with a null or empty value".

use crate::error::{LoadError, RecordError};
use serde_json::{Map, Value};

/// The open field set of a record, as parsed from the source.
pub type Fields = Map<String, Value>;

/// One client record, wrapping its source field mapping.
///
/// Immutable after construction; the whole collection is reloaded and
/// reindexed when the search service is rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRecord {
    /// Document identifier, the string form of the `id` field
    id: String,

    /// The full field mapping, kept unmodified
    fields: Fields,
}

impl ClientRecord {
    /// Construct a record from a parsed field mapping.
    ///
    /// The mapping must carry an `id` field; its string form becomes the index
    /// document identifier. `position` is the record's offset in the source,
    /// used only for error reporting.
    pub fn new(fields: Fields, position: usize) -> Result<Self, LoadError> {
        let id = match fields.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(LoadError::MissingId { position }),
        };

        Ok(Self { id, fields })
    }

    /// The index document identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The indexable representation: the field mapping, unmodified.
    pub fn as_document(&self) -> &Fields {
        &self.fields
    }

    /// Look up a field value. `None` means the field was never declared.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Look up a field value, signalling an error for undeclared fields.
    ///
    /// A field present with a null value yields `Ok(&Value::Null)`, not an
    /// error.
    pub fn try_get(&self, field: &str) -> Result<&Value, RecordError> {
        self.fields
            .get(field)
            .ok_or_else(|| RecordError::UnknownField(field.to_string()))
    }

    /// Whether the record declares the given field at all.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}
