//! Object changes reported by an executed transaction, and their partition
//! into the buckets the artifact reconciler works on.

use serde::{Deserialize, Serialize};

use crate::owner::Owner;
use crate::serde_helpers::u64_from_str_or_num;

/// One entry of `objectChanges` in a transaction response.
///
/// Internally tagged on `"type"` like the JSON-RPC. Kinds this crate does
/// not model (and `published`, which never produces an artifact update)
/// are kept so the response still parses, and are ignored by [`classify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObjectChange {
    #[serde(rename_all = "camelCase")]
    Published {
        package_id: String,
        #[serde(deserialize_with = "u64_from_str_or_num")]
        version: u64,
        digest: String,
        #[serde(default)]
        modules: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Transferred {
        sender: String,
        recipient: Owner,
        object_type: String,
        object_id: String,
        #[serde(deserialize_with = "u64_from_str_or_num")]
        version: u64,
        digest: String,
    },
    #[serde(rename_all = "camelCase")]
    Mutated {
        sender: String,
        owner: Owner,
        object_type: String,
        object_id: String,
        #[serde(deserialize_with = "u64_from_str_or_num")]
        version: u64,
        #[serde(default, deserialize_with = "crate::serde_helpers::opt_u64_from_str_or_num")]
        previous_version: Option<u64>,
        digest: String,
    },
    #[serde(rename_all = "camelCase")]
    Deleted {
        sender: String,
        object_type: String,
        object_id: String,
        #[serde(deserialize_with = "u64_from_str_or_num")]
        version: u64,
    },
    #[serde(rename_all = "camelCase")]
    Wrapped {
        sender: String,
        object_type: String,
        object_id: String,
        #[serde(deserialize_with = "u64_from_str_or_num")]
        version: u64,
    },
    #[serde(rename_all = "camelCase")]
    Created {
        sender: String,
        owner: Owner,
        object_type: String,
        object_id: String,
        #[serde(deserialize_with = "u64_from_str_or_num")]
        version: u64,
        digest: String,
    },
    #[serde(other)]
    Unknown,
}

impl ObjectChange {
    pub fn object_id(&self) -> Option<&str> {
        match self {
            ObjectChange::Transferred { object_id, .. }
            | ObjectChange::Mutated { object_id, .. }
            | ObjectChange::Deleted { object_id, .. }
            | ObjectChange::Wrapped { object_id, .. }
            | ObjectChange::Created { object_id, .. } => Some(object_id),
            ObjectChange::Published { .. } | ObjectChange::Unknown => None,
        }
    }

    pub fn object_type(&self) -> Option<&str> {
        match self {
            ObjectChange::Transferred { object_type, .. }
            | ObjectChange::Mutated { object_type, .. }
            | ObjectChange::Deleted { object_type, .. }
            | ObjectChange::Wrapped { object_type, .. }
            | ObjectChange::Created { object_type, .. } => Some(object_type),
            ObjectChange::Published { .. } | ObjectChange::Unknown => None,
        }
    }

    pub fn sender(&self) -> Option<&str> {
        match self {
            ObjectChange::Transferred { sender, .. }
            | ObjectChange::Mutated { sender, .. }
            | ObjectChange::Deleted { sender, .. }
            | ObjectChange::Wrapped { sender, .. }
            | ObjectChange::Created { sender, .. } => Some(sender),
            ObjectChange::Published { .. } | ObjectChange::Unknown => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ObjectChange::Published { .. } => "published",
            ObjectChange::Transferred { .. } => "transferred",
            ObjectChange::Mutated { .. } => "mutated",
            ObjectChange::Deleted { .. } => "deleted",
            ObjectChange::Wrapped { .. } => "wrapped",
            ObjectChange::Created { .. } => "created",
            ObjectChange::Unknown => "unknown",
        }
    }
}

/// A created object as reported in the change list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedChange {
    pub object_id: String,
    pub object_type: String,
    pub owner: Owner,
    pub version: u64,
    pub digest: String,
}

/// A mutated or transferred object: new owner, version and digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedChange {
    pub object_id: String,
    pub object_type: String,
    pub owner: Owner,
    pub version: u64,
    pub digest: String,
}

/// A deleted or wrapped object. Only the ID matters for reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedChange {
    pub object_id: String,
    pub object_type: String,
    pub version: u64,
}

/// Object changes partitioned by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedChanges {
    pub created: Vec<CreatedChange>,
    pub deleted: Vec<RemovedChange>,
    pub mutated: Vec<UpdatedChange>,
    pub wrapped: Vec<RemovedChange>,
    pub transferred: Vec<UpdatedChange>,
}

impl ClassifiedChanges {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.deleted.is_empty()
            && self.mutated.is_empty()
            && self.wrapped.is_empty()
            && self.transferred.is_empty()
    }

    /// Mutated followed by transferred; both update owner/version/digest.
    pub fn updated(&self) -> impl Iterator<Item = &UpdatedChange> {
        self.mutated.iter().chain(self.transferred.iter())
    }
}

/// Partition object changes into created / deleted / mutated / wrapped /
/// transferred. Published and unknown kinds land in no bucket.
pub fn classify(changes: &[ObjectChange]) -> ClassifiedChanges {
    let mut out = ClassifiedChanges::default();
    for change in changes {
        match change {
            ObjectChange::Created {
                owner,
                object_type,
                object_id,
                version,
                digest,
                ..
            } => out.created.push(CreatedChange {
                object_id: object_id.clone(),
                object_type: object_type.clone(),
                owner: owner.clone(),
                version: *version,
                digest: digest.clone(),
            }),
            ObjectChange::Mutated {
                owner,
                object_type,
                object_id,
                version,
                digest,
                ..
            } => out.mutated.push(UpdatedChange {
                object_id: object_id.clone(),
                object_type: object_type.clone(),
                owner: owner.clone(),
                version: *version,
                digest: digest.clone(),
            }),
            ObjectChange::Transferred {
                recipient,
                object_type,
                object_id,
                version,
                digest,
                ..
            } => out.transferred.push(UpdatedChange {
                object_id: object_id.clone(),
                object_type: object_type.clone(),
                owner: recipient.clone(),
                version: *version,
                digest: digest.clone(),
            }),
            ObjectChange::Deleted {
                object_type,
                object_id,
                version,
                ..
            } => out.deleted.push(RemovedChange {
                object_id: object_id.clone(),
                object_type: object_type.clone(),
                version: *version,
            }),
            ObjectChange::Wrapped {
                object_type,
                object_id,
                version,
                ..
            } => out.wrapped.push(RemovedChange {
                object_id: object_id.clone(),
                object_type: object_type.clone(),
                version: *version,
            }),
            ObjectChange::Published { .. } | ObjectChange::Unknown => {}
        }
    }
    out
}
