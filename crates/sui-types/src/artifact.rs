//! Persisted object artifacts.
//!
//! One JSON record per on-chain object the tooling created. Records are
//! never removed: deletion and wrapping only stamp `deletedAt` / `wrappedAt`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::normalize_id;
use crate::move_value::MoveValue;
use crate::object::ObjectData;
use crate::object_change::CreatedChange;
use crate::owner::OwnerDescription;
use crate::type_parsing::{
    dynamic_field_value_type, is_dynamic_field_type, package_id_from_type, type_has_name,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectArtifact {
    pub object_id: String,
    pub object_type: String,
    pub owner: OwnerDescription,
    pub package_id: String,
    pub signer: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_helpers::opt_u64_from_str_or_num"
    )]
    pub initial_shared_version: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_helpers::opt_u64_from_str_or_num"
    )]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_field_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapped_at: Option<String>,
    /// Keys written by other tools, carried through rewrites untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ObjectArtifact {
    /// Key under which changes are matched: the dynamic field's own ID for
    /// field-wrapped objects, the object ID otherwise.
    pub fn identity_key(&self) -> String {
        normalize_id(self.dynamic_field_id.as_deref().unwrap_or(&self.object_id))
    }

    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none() && self.wrapped_at.is_none()
    }

    /// Whether the object type is `module::name`, e.g. `"shop::Shop"`.
    pub fn is_type(&self, module_and_name: &str) -> bool {
        type_has_name(&self.object_type, module_and_name)
    }

    /// Build the record for a newly created object.
    ///
    /// `object` is the full data fetched after execution; the change entry
    /// fills in whatever the fetch did not return. For a
    /// `0x2::dynamic_field::Field<K, V>` wrapper whose value carries a `UID`,
    /// `objectId` is that inner UID, `objectType` is `V`, and the wrapper's
    /// own ID is kept as `dynamicFieldId`. Returns `None` when no package can be derived from
    /// the type.
    pub fn from_created(change: &CreatedChange, object: &ObjectData, signer: &str) -> Option<Self> {
        let object_type = object
            .type_name()
            .unwrap_or(&change.object_type)
            .to_string();
        let package_id = package_id_from_type(&object_type)?;
        let owner = object.owner.as_ref().unwrap_or(&change.owner);

        let wrapper_id = normalize_id(&change.object_id);
        let inner_id = if is_dynamic_field_type(&object_type) {
            object
                .fields()
                .and_then(|f| f.field("value"))
                .and_then(|v| v.field("id"))
                .and_then(MoveValue::as_id)
        } else {
            None
        };
        let (object_id, dynamic_field_id, object_type) = match inner_id {
            Some(inner) => {
                let value_type = dynamic_field_value_type(&object_type).unwrap_or(object_type);
                (inner, Some(wrapper_id), value_type)
            }
            None => (wrapper_id, None, object_type),
        };

        Some(Self {
            object_id,
            object_type,
            owner: owner.describe(),
            package_id,
            signer: normalize_id(signer),
            initial_shared_version: owner.initial_shared_version(),
            version: Some(object.version),
            digest: Some(object.digest.clone()),
            dynamic_field_id,
            deleted_at: None,
            wrapped_at: None,
            extra: BTreeMap::new(),
        })
    }
}
