//! Record codec: typed records to and from JSON objects.
//!
//! # Design
//! Every schema is a plain struct deriving `Serialize`/`Deserialize`.
//! Required fields are bare types, optional ones are `Field<T>`, and each
//! struct ends its serde view with an overflow map of unknown keys:
//!
//! ```ignore
//! #[serde(flatten)]
//! pub additional_properties: Overflow,
//! ```
//!
//! The overflow field is declared first and every record carries
//! `#[serde(remote = "Self")]`, which turns the derives into inherent
//! `serialize`/`deserialize` functions. `impl_record!` supplies the trait
//! impls on top of them: serializing always goes through a
//! `serde_json::Value`, where named fields (written after the overflow
//! entries) replace any stale overflow value under the same key. Whatever
//! serializer the caller uses, the output never repeats a key. On decode,
//! `flatten` collects every key no named field consumed.
//!
//! `impl_record!` wires a struct into the `Record` trait and `wire_enum!`
//! declares a closed enum whose variants map to fixed wire strings.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SchemaError;

/// A JSON object as produced by `Record::encode`.
pub type JsonObject = Map<String, Value>;

/// Wire keys a record does not model, kept in arrival order.
pub type Overflow = Map<String, Value>;

/// A typed, schema-bound representation of a JSON object.
pub trait Record: Serialize + DeserializeOwned {
    /// Schema name used in error messages.
    const SCHEMA: &'static str;

    fn additional_properties(&self) -> &Overflow;

    fn additional_properties_mut(&mut self) -> &mut Overflow;

    fn additional_keys(&self) -> Vec<&str> {
        self.additional_properties().keys().map(String::as_str).collect()
    }

    /// Encode into a JSON object. Absent fields are omitted and overflow keys
    /// never override a named field.
    fn encode(&self) -> Result<JsonObject, SchemaError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(object)) => Ok(object),
            Ok(other) => Err(SchemaError::new(
                Self::SCHEMA,
                format!("encoded to {} instead of an object", json_kind(&other)),
            )),
            Err(e) => Err(SchemaError::new(Self::SCHEMA, e)),
        }
    }

    /// Decode from a JSON object. Keys not consumed by a named field end up
    /// in the overflow map.
    fn decode(object: JsonObject) -> Result<Self, SchemaError> {
        serde_json::from_value(Value::Object(object)).map_err(|e| SchemaError::new(Self::SCHEMA, e))
    }

    fn from_value(value: Value) -> Result<Self, SchemaError> {
        match value {
            Value::Object(object) => Self::decode(object),
            other => Err(SchemaError::new(
                Self::SCHEMA,
                format!("expected an object, found {}", json_kind(&other)),
            )),
        }
    }

    fn from_slice(bytes: &[u8]) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| SchemaError::new(Self::SCHEMA, format!("malformed JSON: {e}")))?;
        Self::from_value(value)
    }

    fn to_json_string(&self) -> Result<String, SchemaError> {
        let object = self.encode()?;
        serde_json::to_string(&object).map_err(|e| SchemaError::new(Self::SCHEMA, e))
    }
}

/// Decode a JSON array whose elements are all records of schema `R`.
pub fn decode_list<R: Record>(value: Value) -> Result<Vec<R>, SchemaError> {
    match value {
        Value::Array(items) => items.into_iter().map(R::from_value).collect(),
        other => Err(SchemaError::new(
            format!("{}[]", R::SCHEMA),
            format!("expected an array, found {}", json_kind(&other)),
        )),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Implement `Record`, `Serialize` and `Deserialize` for a struct with an
/// `additional_properties` field and `#[serde(remote = "Self")]`.
macro_rules! impl_record {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    let value = $ty::serialize(self, serde_json::value::Serializer)
                        .map_err(<S::Error as serde::ser::Error>::custom)?;
                    serde::Serialize::serialize(&value, serializer)
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    $ty::deserialize(deserializer)
                }
            }

            impl $crate::record::Record for $ty {
                const SCHEMA: &'static str = stringify!($ty);

                fn additional_properties(&self) -> &$crate::record::Overflow {
                    &self.additional_properties
                }

                fn additional_properties_mut(&mut self) -> &mut $crate::record::Overflow {
                    &mut self.additional_properties
                }
            }
        )+
    };
}

/// Declare a closed enum of wire-string constants.
///
/// Decoding any string outside the declared set fails; there is no fallback
/// variant.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The string sent on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::SchemaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::error::SchemaError::new(
                        stringify!($name),
                        format!("unknown variant `{other}`"),
                    )),
                }
            }
        }

        impl $crate::endpoint::ToQuery for $name {
            fn to_query(&self) -> Option<String> {
                Some(self.as_str().to_string())
            }
        }
    };
}

pub(crate) use impl_record;
pub(crate) use wire_enum;
