//! Host storage seam.
//!
//! The binding never owns the attribute it manages; the host record does.
//! [`AttributeStore`] is the abstraction over "has storage for field X",
//! implemented by whatever the integrator's record type is. [`ShadowStore`]
//! is a ready-made in-memory implementation for lightweight, non-persisted
//! record types and for tests.
//!
//! A host that has no real storage for an attribute reports so through
//! [`AttributeStore::has_attribute`]. The binding checks that capability
//! once, at bind time, and falls back to an instance-local shadow slot. No
//! failed write is ever used as control flow.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::DateTimeValue;

/// Get/set access to named timestamp attributes on a record.
pub trait AttributeStore {
    /// Whether the record has backing storage for `name`.
    ///
    /// Defaults to true. Return false to make bindings keep the value in
    /// their own shadow slot instead of delegating.
    fn has_attribute(&self, name: &str) -> bool {
        let _ = name;
        true
    }

    /// Current value of the attribute. Attributes never written read as
    /// [`DateTimeValue::Empty`].
    fn read_attribute(&self, name: &str) -> DateTimeValue;

    /// Replace the value of the attribute.
    fn write_attribute(&mut self, name: &str, value: DateTimeValue);
}

/// In-memory attribute storage keyed by attribute name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShadowStore {
    slots: HashMap<String, DateTimeValue>,
}

impl ShadowStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeStore for ShadowStore {
    fn read_attribute(&self, name: &str) -> DateTimeValue {
        self.slots.get(name).cloned().unwrap_or(DateTimeValue::Empty)
    }

    fn write_attribute(&mut self, name: &str, value: DateTimeValue) {
        self.slots.insert(name.to_owned(), value);
    }
}
