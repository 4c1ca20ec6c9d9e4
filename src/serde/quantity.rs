//! Helpers for (de)serializing signed quantities.
//!
//! Item files are written by hand, so a quantity may be a JSON number or a decimal/hex string.
//! Quantities are serialized back as decimal strings.

use alloy::primitives::I256;
use serde::{Deserialize, Deserializer, Serializer, de::Error};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Signed(i64),
    Unsigned(u64),
    String(String),
}

/// Serializes an [`I256`] as a decimal string.
pub fn serialize<S>(value: &I256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

/// Deserializes an [`I256`] from a JSON number or a string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<I256, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Signed(n) => I256::try_from(n).map_err(D::Error::custom),
        NumberOrString::Unsigned(n) => I256::try_from(n).map_err(D::Error::custom),
        NumberOrString::String(s) => I256::from_str(s.trim()).map_err(D::Error::custom),
    }
}
