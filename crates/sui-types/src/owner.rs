//! Object ownership, as reported by the RPC and as persisted in artifacts.

use serde::{Deserialize, Serialize};

use crate::address::normalize_address;
use crate::serde_helpers::u64_from_str_or_num;

/// Raw owner representation returned by `sui_getObject` and in object changes.
///
/// Externally tagged, matching the JSON-RPC shape:
/// `{"AddressOwner": "0x.."}`, `{"Shared": {"initial_shared_version": 3}}`, `"Immutable"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    AddressOwner(String),
    ObjectOwner(String),
    Shared {
        #[serde(deserialize_with = "u64_from_str_or_num")]
        initial_shared_version: u64,
    },
    Immutable,
    ConsensusAddressOwner {
        #[serde(deserialize_with = "u64_from_str_or_num")]
        start_version: u64,
        owner: String,
    },
}

impl Owner {
    /// Initial shared version, for shared objects only.
    pub fn initial_shared_version(&self) -> Option<u64> {
        match self {
            Owner::Shared {
                initial_shared_version,
            } => Some(*initial_shared_version),
            _ => None,
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, Owner::Shared { .. })
    }

    /// Address that owns the object, if it is address- or object-owned.
    pub fn owner_address(&self) -> Option<String> {
        match self {
            Owner::AddressOwner(a) | Owner::ObjectOwner(a) => Some(normalize_address(a)),
            Owner::ConsensusAddressOwner { owner, .. } => Some(normalize_address(owner)),
            Owner::Shared { .. } | Owner::Immutable => None,
        }
    }

    /// Persisted description of this owner.
    pub fn describe(&self) -> OwnerDescription {
        match self {
            Owner::AddressOwner(address) => OwnerDescription::Address {
                address: normalize_address(address),
            },
            Owner::ObjectOwner(parent) => OwnerDescription::Object {
                parent_id: normalize_address(parent),
            },
            Owner::Shared {
                initial_shared_version,
            } => OwnerDescription::Shared {
                initial_shared_version: *initial_shared_version,
            },
            Owner::Immutable => OwnerDescription::Immutable,
            Owner::ConsensusAddressOwner {
                start_version,
                owner,
            } => OwnerDescription::ConsensusAddress {
                address: normalize_address(owner),
                start_version: *start_version,
            },
        }
    }
}

/// Owner as written to the artifact file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ownerType", rename_all = "camelCase")]
pub enum OwnerDescription {
    Address {
        address: String,
    },
    #[serde(rename_all = "camelCase")]
    Object {
        parent_id: String,
    },
    #[serde(rename_all = "camelCase")]
    Shared {
        initial_shared_version: u64,
    },
    Immutable,
    #[serde(rename_all = "camelCase")]
    ConsensusAddress {
        address: String,
        start_version: u64,
    },
}

impl std::fmt::Display for OwnerDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnerDescription::Address { address } => write!(f, "address {address}"),
            OwnerDescription::Object { parent_id } => write!(f, "object {parent_id}"),
            OwnerDescription::Shared {
                initial_shared_version,
            } => write!(f, "shared (initial version {initial_shared_version})"),
            OwnerDescription::Immutable => write!(f, "immutable"),
            OwnerDescription::ConsensusAddress {
                address,
                start_version,
            } => write!(f, "consensus address {address} (since {start_version})"),
        }
    }
}
