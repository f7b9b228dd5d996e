//! JSON-shaped fixtures for coins, objects and transaction responses.

use serde_json::{json, Value};
use sui_shop_types::{normalize_id, CoinInfo, ObjectData, TransactionResult};

pub const SENDER: &str = "0x5";
pub const PACKAGE: &str = "0xaa";

pub fn sui_coin(id: &str, version: u64) -> CoinInfo {
    CoinInfo {
        coin_type: "0x2::sui::SUI".to_string(),
        coin_object_id: normalize_id(id),
        version,
        digest: format!("coin-digest-{}", version),
        balance: 1_000_000_000,
    }
}

pub fn object(value: Value) -> ObjectData {
    serde_json::from_value(value).expect("fixture object")
}

pub fn result(value: Value) -> TransactionResult {
    serde_json::from_value(value).expect("fixture transaction result")
}

pub fn success(digest: &str, object_changes: Vec<Value>) -> TransactionResult {
    result(json!({
        "digest": digest,
        "effects": {
            "status": {"status": "success"},
            "gasUsed": {"computationCost": "1000", "storageCost": "2000", "storageRebate": "500"}
        },
        "objectChanges": object_changes,
    }))
}

pub fn failure(digest: &str, error: Option<&str>) -> TransactionResult {
    let status = match error {
        Some(e) => json!({"status": "failure", "error": e}),
        None => json!({"status": "failure"}),
    };
    result(json!({
        "digest": digest,
        "effects": {"status": status},
        "objectChanges": [],
    }))
}

pub fn created(id: &str, object_type: &str, owner: Value, version: u64) -> Value {
    json!({
        "type": "created", "sender": SENDER, "owner": owner,
        "objectType": object_type, "objectId": id,
        "version": version.to_string(), "digest": format!("created-{}", version),
    })
}

pub fn mutated(id: &str, object_type: &str, owner: Value, version: u64, digest: &str) -> Value {
    json!({
        "type": "mutated", "sender": SENDER, "owner": owner,
        "objectType": object_type, "objectId": id,
        "version": version.to_string(), "previousVersion": (version - 1).to_string(),
        "digest": digest,
    })
}

pub fn transferred(
    id: &str,
    object_type: &str,
    recipient: Value,
    version: u64,
    digest: &str,
) -> Value {
    json!({
        "type": "transferred", "sender": SENDER, "recipient": recipient,
        "objectType": object_type, "objectId": id,
        "version": version.to_string(), "digest": digest,
    })
}

pub fn deleted(id: &str, object_type: &str, version: u64) -> Value {
    json!({
        "type": "deleted", "sender": SENDER, "objectType": object_type,
        "objectId": id, "version": version.to_string(),
    })
}

pub fn wrapped(id: &str, object_type: &str, version: u64) -> Value {
    json!({
        "type": "wrapped", "sender": SENDER, "objectType": object_type,
        "objectId": id, "version": version.to_string(),
    })
}

pub fn address_owner(address: &str) -> Value {
    json!({"AddressOwner": address})
}

pub fn shared_owner(initial_shared_version: u64) -> Value {
    json!({"Shared": {"initial_shared_version": initial_shared_version}})
}

/// The shop's shared object.
pub fn shop_object(id: &str, initial_shared_version: u64) -> ObjectData {
    let ty = format!("{}::shop::Shop", PACKAGE);
    object(json!({
        "objectId": id, "version": initial_shared_version.to_string(), "digest": "shop-digest",
        "type": ty, "owner": shared_owner(initial_shared_version),
        "content": {"dataType": "moveObject", "type": ty, "hasPublicTransfer": false,
            "fields": {"id": {"id": id}, "owner": SENDER, "name": "Armory"}}
    }))
}

/// An `ItemListing` stored as a dynamic field of the shop, keyed by its ID.
pub fn listing_field(field_id: &str, listing_id: &str, shop_id: &str) -> ObjectData {
    let ty = format!(
        "0x2::dynamic_field::Field<0x2::object::ID, {}::shop::ItemListing>",
        PACKAGE
    );
    object(json!({
        "objectId": field_id, "version": "7", "digest": "field-digest",
        "type": ty, "owner": {"ObjectOwner": shop_id},
        "content": {"dataType": "moveObject", "type": ty, "hasPublicTransfer": false,
            "fields": {
                "id": {"id": field_id},
                "name": listing_id,
                "value": {"type": format!("{}::shop::ItemListing", PACKAGE), "fields": {
                    "id": {"id": listing_id},
                    "name": "Sword",
                    "base_price_usd_cents": "1999",
                    "stock": "5",
                    "spotlight_discount_template_id": null
                }}
            }}
    }))
}
