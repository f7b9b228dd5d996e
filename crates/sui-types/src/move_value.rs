//! Move values as rendered in JSON-RPC object content.
//!
//! The RPC renders nested structs as `{"type": .., "fields": {..}}`, enums as
//! `{"type": .., "variant": .., "fields": {..}}`, `UID` as `{"id": "0x.."}`,
//! options as `null` or the inner value, and u64+ integers as strings. This
//! enum captures those shapes so callers match on variants instead of probing
//! for keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::normalize_id;
use crate::type_parsing::normalize_type_name;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoveValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Vector(Vec<MoveValue>),
    Variant {
        #[serde(rename = "type")]
        type_: String,
        variant: String,
        #[serde(default)]
        fields: BTreeMap<String, MoveValue>,
    },
    Struct {
        #[serde(rename = "type")]
        type_: String,
        fields: BTreeMap<String, MoveValue>,
    },
    Fields(BTreeMap<String, MoveValue>),
}

impl MoveValue {
    /// Field map of a struct, enum variant, or bare field object.
    pub fn fields(&self) -> Option<&BTreeMap<String, MoveValue>> {
        match self {
            MoveValue::Struct { fields, .. }
            | MoveValue::Variant { fields, .. }
            | MoveValue::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&MoveValue> {
        self.fields().and_then(|f| f.get(name))
    }

    /// Follow a path of field names, e.g. `["value", "fields", ..]` minus the
    /// `fields` hops, which are implicit.
    pub fn path(&self, names: &[&str]) -> Option<&MoveValue> {
        names.iter().try_fold(self, |v, name| v.field(name))
    }

    pub fn struct_type(&self) -> Option<&str> {
        match self {
            MoveValue::Struct { type_, .. } | MoveValue::Variant { type_, .. } => Some(type_),
            _ => None,
        }
    }

    pub fn variant_name(&self) -> Option<&str> {
        match self {
            MoveValue::Variant { variant, .. } => Some(variant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MoveValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numbers arrive as JSON numbers (u8..u32) or strings (u64 and wider).
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            MoveValue::Number(n) => n.as_u64(),
            MoveValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MoveValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Object ID held by an `address`, `ID` or `UID` value, normalized.
    pub fn as_id(&self) -> Option<String> {
        match self {
            MoveValue::String(s) if s.starts_with("0x") || s.starts_with("0X") => {
                Some(normalize_id(s))
            }
            MoveValue::Fields(fields) | MoveValue::Struct { fields, .. } => {
                fields.get("id").or_else(|| fields.get("bytes"))?.as_id()
            }
            _ => None,
        }
    }

    /// Unwrap `Option<T>`: `null` and empty `vec` mean none.
    pub fn as_option(&self) -> Option<&MoveValue> {
        match self {
            MoveValue::Null => None,
            MoveValue::Struct { type_, fields } if type_.contains("::option::Option") => {
                match fields.get("vec") {
                    Some(MoveValue::Vector(items)) => items.first(),
                    _ => None,
                }
            }
            other => Some(other),
        }
    }

    /// `std::type_name::TypeName` (or a bare type string) as a canonical
    /// type string.
    pub fn as_type_name(&self) -> Option<String> {
        match self {
            MoveValue::String(s) => normalize_type_name(s),
            _ => self.field("name").and_then(MoveValue::as_type_name),
        }
    }

    pub fn as_vec(&self) -> Option<&[MoveValue]> {
        match self {
            MoveValue::Vector(items) => Some(items),
            _ => None,
        }
    }

    /// UTF-8 strings are rendered as JSON strings, but `vector<u8>` names
    /// arrive as byte arrays.
    pub fn as_text(&self) -> Option<String> {
        match self {
            MoveValue::String(s) => Some(s.clone()),
            MoveValue::Vector(items) => {
                let bytes = items
                    .iter()
                    .map(|b| b.as_u64().and_then(|n| u8::try_from(n).ok()))
                    .collect::<Option<Vec<u8>>>()?;
                String::from_utf8(bytes).ok()
            }
            _ => self.field("bytes").and_then(MoveValue::as_text),
        }
    }
}
