//! Read-only shop queries.

use anyhow::{Context, Result};
use futures::future::try_join_all;
use sui_shop_transport::ShopRpc;
use sui_shop_types::type_parsing::{dynamic_field_value_type, type_has_name};
use sui_shop_types::{DynamicFieldInfo, ObjectData};

use super::models::{
    value_type, AcceptedCurrency, DiscountTemplate, DiscountTicket, ItemListing, PriceFeed,
    ShopInfo,
};

pub const SHOP_TYPE: &str = "shop::Shop";
pub const OWNER_CAP_TYPE: &str = "shop::ShopOwnerCap";
pub const LISTING_TYPE: &str = "shop::ItemListing";
pub const CURRENCY_TYPE: &str = "shop::AcceptedCurrency";
pub const TEMPLATE_TYPE: &str = "shop::DiscountTemplate";
pub const TICKET_TYPE: &str = "shop::DiscountTicket";

/// Every dynamic field of `parent_id`, across pages.
pub async fn collect_dynamic_fields(
    rpc: &dyn ShopRpc,
    parent_id: &str,
) -> Result<Vec<DynamicFieldInfo>> {
    let mut out = Vec::new();
    let mut cursor = None;
    loop {
        let page = rpc.get_dynamic_fields(parent_id, cursor).await?;
        out.extend(page.data);
        if !page.has_next_page || page.next_cursor.is_none() {
            break;
        }
        cursor = page.next_cursor;
    }
    tracing::debug!(parent_id, count = out.len(), "collected dynamic fields");
    Ok(out)
}

/// Objects of exactly `struct_type` owned by `owner`, across pages.
pub async fn collect_owned_objects(
    rpc: &dyn ShopRpc,
    owner: &str,
    struct_type: &str,
) -> Result<Vec<ObjectData>> {
    let mut out = Vec::new();
    let mut cursor = None;
    loop {
        let page = rpc.get_owned_objects(owner, struct_type, cursor).await?;
        out.extend(page.data);
        if !page.has_next_page || page.next_cursor.is_none() {
            break;
        }
        cursor = page.next_cursor;
    }
    Ok(out)
}

/// Dynamic fields of the shop whose value type is `module::name`, fetched
/// concurrently.
async fn shop_values(
    rpc: &dyn ShopRpc,
    shop_id: &str,
    module_and_name: &str,
) -> Result<Vec<ObjectData>> {
    let fields = collect_dynamic_fields(rpc, shop_id).await?;
    let wanted: Vec<&DynamicFieldInfo> = fields
        .iter()
        .filter(|f| {
            let value_type = dynamic_field_value_type(&f.object_type)
                .unwrap_or_else(|| f.object_type.clone());
            type_has_name(&value_type, module_and_name)
        })
        .collect();
    let objects = try_join_all(wanted.iter().map(|f| async move {
        rpc.get_object(&f.object_id)
            .await
            .with_context(|| format!("fetch {} {}", module_and_name, f.object_id))
    }))
    .await?;
    Ok(objects
        .into_iter()
        .filter(|o| {
            value_type(o)
                .map(|t| type_has_name(&t, module_and_name))
                .unwrap_or(false)
        })
        .collect())
}

pub async fn fetch_shop(rpc: &dyn ShopRpc, shop_id: &str) -> Result<ShopInfo> {
    let object = rpc.get_object(shop_id).await?;
    ShopInfo::from_object(&object)
}

pub async fn list_listings(rpc: &dyn ShopRpc, shop_id: &str) -> Result<Vec<ItemListing>> {
    shop_values(rpc, shop_id, LISTING_TYPE)
        .await?
        .iter()
        .map(ItemListing::from_object)
        .collect()
}

pub async fn list_currencies(rpc: &dyn ShopRpc, shop_id: &str) -> Result<Vec<AcceptedCurrency>> {
    shop_values(rpc, shop_id, CURRENCY_TYPE)
        .await?
        .iter()
        .map(AcceptedCurrency::from_object)
        .collect()
}

pub async fn list_discount_templates(
    rpc: &dyn ShopRpc,
    shop_id: &str,
) -> Result<Vec<DiscountTemplate>> {
    shop_values(rpc, shop_id, TEMPLATE_TYPE)
        .await?
        .iter()
        .map(DiscountTemplate::from_object)
        .collect()
}

/// Discount tickets of `package_id` held by `owner`.
pub async fn owned_tickets(
    rpc: &dyn ShopRpc,
    owner: &str,
    package_id: &str,
) -> Result<Vec<DiscountTicket>> {
    let struct_type = format!("{}::{}", package_id, TICKET_TYPE);
    collect_owned_objects(rpc, owner, &struct_type)
        .await?
        .iter()
        .map(DiscountTicket::from_object)
        .collect()
}

pub async fn price_feed(rpc: &dyn ShopRpc, price_info_object_id: &str) -> Result<PriceFeed> {
    let object = rpc.get_object(price_info_object_id).await?;
    PriceFeed::from_object(&object)
}
