//! Scalars that may arrive natively (`12`) or string-encoded (`"12"`).
//!
//! Use through `#[serde(default, with = "...")]` on `Option<T>` fields:
//!
//! - [`lenient`]: anything that is not a usable value decodes as `None`.
//! - [`strict`]: `null` or an absent field decodes as `None`, but a value
//!   that cannot be read as `T` is an `invalid value` error.
//!
//! Both always encode the native representation, never a quoted string.

use std::str::FromStr;

use serde::de::{self, DeserializeOwned, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Read `value` as `T`: natively first, then by parsing a string.
///
/// `null` and anything unparsable yield `None`.
pub fn coerce<T>(value: Value) -> Option<T>
where
    T: DeserializeOwned + FromStr,
{
    match value {
        Value::Null => None,
        Value::String(raw) => serde_json::from_value(Value::String(raw.clone()))
            .ok()
            .or_else(|| raw.parse().ok()),
        other => serde_json::from_value(other).ok(),
    }
}

fn serialize_native<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_none(),
    }
}

pub mod lenient {
    use super::{Deserialize, DeserializeOwned, Deserializer, FromStr, Serialize, Serializer, Value};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        super::serialize_native(value, serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: DeserializeOwned + FromStr,
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.and_then(super::coerce))
    }
}

pub mod strict {
    use super::{
        Deserialize, DeserializeOwned, Deserializer, FromStr, Serialize, Serializer, Unexpected,
        Value, de,
    };

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        super::serialize_native(value, serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: DeserializeOwned + FromStr,
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => {
                let shown = value.to_string();
                super::coerce(value).map(Some).ok_or_else(|| {
                    de::Error::invalid_value(Unexpected::Other(&shown), &"a number or numeric string")
                })
            }
        }
    }
}
