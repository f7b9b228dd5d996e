//! Object reads: `sui_getObject`, `suix_getDynamicFields`, `suix_getCoins`.
//!
//! IDs stay as `String` so these round-trip through JSON without hex
//! parsing at the boundary; call [`crate::address::normalize_id`] before
//! comparing them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::normalize_id;
use crate::move_value::MoveValue;
use crate::owner::Owner;
use crate::serde_helpers::u64_from_str_or_num;

/// `(id, version, digest)` triple identifying one object version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub object_id: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: u64,
    pub digest: String,
}

/// Object data as returned with `showType`, `showOwner` and `showContent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: u64,
    pub digest: String,
    #[serde(rename = "type", default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub previous_transaction: Option<String>,
    #[serde(default)]
    pub content: Option<ObjectContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dataType", rename_all = "camelCase")]
pub enum ObjectContent {
    #[serde(rename_all = "camelCase")]
    MoveObject {
        #[serde(rename = "type")]
        type_: String,
        #[serde(default)]
        has_public_transfer: bool,
        fields: MoveValue,
    },
    Package {
        #[serde(default)]
        disassembled: BTreeMap<String, Value>,
    },
}

impl ObjectData {
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            object_id: normalize_id(&self.object_id),
            version: self.version,
            digest: self.digest.clone(),
        }
    }

    /// Struct type, from the `type` field or, failing that, the content.
    pub fn type_name(&self) -> Option<&str> {
        self.object_type.as_deref().or(match &self.content {
            Some(ObjectContent::MoveObject { type_, .. }) => Some(type_.as_str()),
            _ => None,
        })
    }

    pub fn fields(&self) -> Option<&MoveValue> {
        match &self.content {
            Some(ObjectContent::MoveObject { fields, .. }) => Some(fields),
            _ => None,
        }
    }

    pub fn initial_shared_version(&self) -> Option<u64> {
        self.owner.as_ref().and_then(Owner::initial_shared_version)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DynamicFieldKind {
    DynamicField,
    DynamicObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicFieldName {
    #[serde(rename = "type")]
    pub type_: String,
    pub value: Value,
}

/// One entry of a `suix_getDynamicFields` page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFieldInfo {
    pub name: DynamicFieldName,
    #[serde(rename = "type")]
    pub kind: DynamicFieldKind,
    pub object_type: String,
    pub object_id: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: u64,
    pub digest: String,
}

/// A paginated RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

/// A coin owned by an address, from `suix_getCoins`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinInfo {
    pub coin_type: String,
    pub coin_object_id: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: u64,
    pub digest: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub balance: u64,
}

impl CoinInfo {
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            object_id: normalize_id(&self.coin_object_id),
            version: self.version,
            digest: self.digest.clone(),
        }
    }
}
