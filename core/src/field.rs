//! Three-state optional fields.
//!
//! # Design
//! `Option<T>` cannot tell "key missing" from "key set to null". Optional
//! record fields are therefore `Field<T>`: `Absent` means the key is not on
//! the wire at all, `Present(v)` means it is. A schema that allows an
//! explicit null uses `Field<Option<T>>`, so `Present(None)` is the null
//! and stays distinct from `Absent`.
//!
//! Record structs pair every `Field` with
//! `#[serde(default, skip_serializing_if = "Field::is_absent")]`: a missing
//! key decodes to `Absent` and an `Absent` value never writes its key.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An optional record field that is either absent from the payload or
/// present with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field<T> {
    Absent,
    Present(T),
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Absent => Field::Absent,
            Field::Present(value) => Field::Present(value),
        }
    }

    /// The value if present. Loses the absent/present distinction only for
    /// the caller, not for the record.
    pub fn get(&self) -> Option<&T> {
        match self {
            Field::Absent => None,
            Field::Present(value) => Some(value),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Absent => None,
            Field::Present(value) => Some(value),
        }
    }

    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Present(value),
            None => Field::Absent,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Present(value) => Field::Present(f(value)),
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        self.into_option().unwrap_or(default)
    }
}

impl<T> Field<Option<T>> {
    /// True only for an explicit null on the wire.
    pub fn is_null(&self) -> bool {
        matches!(self, Field::Present(None))
    }

    /// Collapse absent and null into `None`.
    pub fn flatten(self) -> Option<T> {
        self.into_option().flatten()
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Present(value)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Present(value) => value.serialize(serializer),
            // Only reachable when a field is missing `skip_serializing_if`.
            Field::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Field::Present)
    }
}
