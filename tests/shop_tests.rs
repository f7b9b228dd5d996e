//! Shop queries and argument resolution against the in-memory RPC.

mod common;

use common::fixtures::{listing_field, object, shop_object, PACKAGE, SENDER};
use common::MockRpc;
use serde_json::json;
use sui_shop::shop::queries::{fetch_shop, list_listings, owned_tickets};
use sui_shop::shop::tx::{owned_object_arg, parse_object_id, shared_object_arg};
use sui_shop_types::{normalize_id, DynamicFieldInfo};
use sui_types::base_types::SequenceNumber;
use sui_types::transaction::{ObjectArg, SharedObjectMutability};

fn field_info(field: &sui_shop_types::ObjectData, key: &str) -> DynamicFieldInfo {
    serde_json::from_value(json!({
        "name": {"type": "0x2::object::ID", "value": key},
        "type": "DynamicField",
        "objectType": field.object_type,
        "objectId": field.object_id,
        "version": field.version,
        "digest": field.digest,
    }))
    .unwrap()
}

#[tokio::test]
async fn test_list_listings_through_dynamic_fields() {
    let rpc = MockRpc::new();
    rpc.add_object(shop_object("0xa1", 3));
    let listing = listing_field("0xf1", "0xb1", "0xa1");
    rpc.add_dynamic_field("0xa1", field_info(&listing, "0xb1"));
    rpc.add_object(listing);

    // A dynamic field of another type must be skipped.
    let other_ty = format!(
        "0x2::dynamic_field::Field<0x2::object::ID, {}::shop::AcceptedCurrency>",
        PACKAGE
    );
    let other = object(json!({
        "objectId": "0xf2", "version": "2", "digest": "x", "type": other_ty,
        "content": {"dataType": "moveObject", "type": other_ty, "fields": {"id": {"id": "0xf2"}}}
    }));
    rpc.add_dynamic_field("0xa1", field_info(&other, "0xc0"));
    rpc.add_object(other);

    let shop = fetch_shop(&rpc, "0xa1").await.unwrap();
    assert_eq!(shop.initial_shared_version, Some(3));

    let listings = list_listings(&rpc, "0xa1").await.unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].listing_id, normalize_id("0xb1"));
    assert_eq!(listings[0].name, "Sword");
    assert_eq!(listings[0].display_price(), "$19.99");
    assert_eq!(listings[0].stock, 5);
}

#[tokio::test]
async fn test_owned_tickets_by_struct_type() {
    let rpc = MockRpc::new();
    let ty = format!("{}::shop::DiscountTicket", PACKAGE);
    rpc.add_object(object(json!({
        "objectId": "0xd1", "version": "2", "digest": "t", "type": ty,
        "owner": {"AddressOwner": SENDER},
        "content": {"dataType": "moveObject", "type": ty, "fields": {
            "id": {"id": "0xd1"},
            "discount_template_id": "0xe1",
            "shop_address": "0xa1",
            "listing_id": null,
            "claimer": SENDER
        }}
    })));

    let tickets = owned_tickets(&rpc, SENDER, PACKAGE).await.unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].template_id, normalize_id("0xe1"));
    assert!(owned_tickets(&rpc, "0x9", PACKAGE).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_object_arg_resolution() {
    let rpc = MockRpc::new();
    rpc.add_object(shop_object("0xa1", 3));
    rpc.add_object(object(json!({
        "objectId": "0xc0", "version": "8", "digest": "11111111111111111111111111111111",
        "type": format!("{}::shop::ShopOwnerCap", PACKAGE),
        "owner": {"AddressOwner": SENDER}
    })));

    match shared_object_arg(&rpc, "0xa1", true).await.unwrap() {
        ObjectArg::SharedObject {
            id,
            initial_shared_version,
            mutability,
        } => {
            assert_eq!(id, parse_object_id("0xa1").unwrap());
            assert_eq!(initial_shared_version, SequenceNumber::from_u64(3));
            assert!(matches!(mutability, SharedObjectMutability::Mutable));
        }
        other => panic!("expected a shared object, got {:?}", other),
    }

    match owned_object_arg(&rpc, "0xc0").await.unwrap() {
        ObjectArg::ImmOrOwnedObject((id, version, _)) => {
            assert_eq!(id, parse_object_id("0xc0").unwrap());
            assert_eq!(version, SequenceNumber::from_u64(8));
        }
        other => panic!("expected an owned object, got {:?}", other),
    }

    assert!(owned_object_arg(&rpc, "0xa1").await.is_err());
    assert!(shared_object_arg(&rpc, "0xc0", false).await.is_err());
    assert!(shared_object_arg(&rpc, "0xdead", false).await.is_err());
}
