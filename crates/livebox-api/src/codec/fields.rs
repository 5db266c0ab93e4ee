//! Key-alternatives decoding for hand-written `Deserialize` impls.
//!
//! A [`Fields`] wraps one JSON object. Each accessor takes the acceptable
//! spellings of a logical field in preference order and returns the first
//! one that is present and decodes.

use std::str::FromStr;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::flexible;

/// A JSON object read through alternative key spellings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Decode the first key that is present and valid.
    ///
    /// Fails with a missing-field error naming the first key when none is
    /// present, or with the last decode error when a key was present but
    /// malformed.
    pub fn require<T, E>(&self, keys: &[&'static str]) -> Result<T, E>
    where
        T: DeserializeOwned,
        E: de::Error,
    {
        let mut last_error = None;
        for key in keys {
            if let Some(value) = self.0.get(*key) {
                match T::deserialize(value) {
                    Ok(decoded) => return Ok(decoded),
                    Err(e) => last_error = Some(E::custom(format!("field `{key}`: {e}"))),
                }
            }
        }
        Err(last_error.unwrap_or_else(|| E::missing_field(keys.first().copied().unwrap_or(""))))
    }

    /// Like [`Fields::require`] but absent, `null` and malformed all yield
    /// `None`.
    pub fn optional<T: DeserializeOwned>(&self, keys: &[&str]) -> Option<T> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(|value| Option::<T>::deserialize(value).ok().flatten())
    }

    /// Optional numeric field accepting native or string-encoded values.
    pub fn flexible<T>(&self, keys: &[&str]) -> Option<T>
    where
        T: DeserializeOwned + FromStr,
    {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(|value| flexible::coerce(value.clone()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}
