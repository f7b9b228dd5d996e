//! JSON-RPC encodes u64 values as strings (`"version": "42"`) in most places
//! and as numbers in a few; these accept both.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StrOrNum {
    Str(String),
    Num(u64),
}

impl StrOrNum {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            StrOrNum::Num(n) => Ok(n),
            StrOrNum::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected u64, got {s:?}"))),
        }
    }
}

pub fn u64_from_str_or_num<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    StrOrNum::deserialize(deserializer)?.into_u64()
}

pub fn opt_u64_from_str_or_num<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StrOrNum>::deserialize(deserializer)? {
        Some(v) => v.into_u64().map(Some),
        None => Ok(None),
    }
}
