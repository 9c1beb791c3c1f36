//! Loosely-typed records as returned by the record store.
//!
//! Remote tables deliver every field as a scalar or as a single-element
//! collection representing a linked-record reference. The shape is
//! resolved once here, so call sites never re-check it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A field value as stored by the record store.
///
/// Linked-record fields arrive as collections of record ids even when the
/// relationship is many-to-one, so a "scalar" reference is usually a
/// one-element [`FieldValue::Reference`]. The accessors on this type
/// unwrap that defensively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A boolean value (checkbox fields).
    Bool(bool),
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
    /// A linked-record reference: a collection of record ids.
    Reference(Vec<String>),
}

impl FieldValue {
    /// Builds a single-element linked-record reference.
    pub fn reference(id: impl Into<String>) -> Self {
        FieldValue::Reference(vec![id.into()])
    }

    /// Returns the value as text, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a number.
    ///
    /// Numeric text is accepted too; stores are known to deliver number
    /// fields as strings after CSV imports.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns the value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Resolves the value to a single referenced record id.
    ///
    /// Unwraps single-element (or longer) collections to their first
    /// element; plain text is treated as a bare id.
    pub fn reference_id(&self) -> Option<&str> {
        match self {
            FieldValue::Reference(ids) => ids.first().map(|s| s.trim()),
            FieldValue::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then_some(s)
            }
            _ => None,
        }
    }

    /// Checks whether the value references the given record id.
    ///
    /// A collection matches if any element equals the id; bare text
    /// matches on equality.
    pub fn contains_reference(&self, id: &str) -> bool {
        match self {
            FieldValue::Reference(ids) => ids.iter().any(|r| r.trim() == id.trim()),
            FieldValue::Text(s) => s.trim() == id.trim(),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// The field map of a record.
pub type Fields = HashMap<String, FieldValue>;

/// A record as returned by the record store: an id plus a field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The store-assigned record id.
    pub id: String,
    /// The record's fields, keyed by field name.
    #[serde(default)]
    pub fields: Fields,
}

impl Record {
    /// Creates an empty record with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Fields::new(),
        }
    }

    /// Adds a field, consuming and returning the record (builder style).
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns a raw field value.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns a field as text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(FieldValue::as_str)
    }

    /// Returns a field as a number.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(FieldValue::as_f64)
    }

    /// Resolves a field to a single referenced record id.
    pub fn reference(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(FieldValue::reference_id)
    }

    /// Returns a checkbox field, treating an absent field as `default`.
    pub fn flag(&self, name: &str, default: bool) -> bool {
        self.field(name)
            .and_then(FieldValue::as_bool)
            .unwrap_or(default)
    }
}
