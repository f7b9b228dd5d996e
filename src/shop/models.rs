//! Shop objects normalized from Move content.
//!
//! Listings, currencies and templates may be stored on the shop either as
//! dynamic fields (the value sits in the `Field` wrapper's `value`) or as
//! dynamic object fields (the object is the value), so every parser starts
//! from [`value_fields`].

use anyhow::{anyhow, Result};
use serde::Serialize;
use sui_shop_types::type_parsing::{dynamic_field_value_type, is_dynamic_field_type};
use sui_shop_types::{normalize_id, MoveValue, ObjectData};

use crate::utils::{format_bps, format_scaled, format_usd_cents};

/// Struct field map of the shop value held by `object`.
pub fn value_fields(object: &ObjectData) -> Option<&MoveValue> {
    let fields = object.fields()?;
    if object.type_name().is_some_and(is_dynamic_field_type) {
        fields.field("value")
    } else {
        Some(fields)
    }
}

/// Type of the shop value held by `object`, unwrapping `Field<K, V>`.
pub fn value_type(object: &ObjectData) -> Option<String> {
    let type_name = object.type_name()?;
    dynamic_field_value_type(type_name).or_else(|| Some(type_name.to_string()))
}

fn required<'a>(fields: &'a MoveValue, name: &str, object_id: &str) -> Result<&'a MoveValue> {
    fields
        .field(name)
        .ok_or_else(|| anyhow!("object {} missing field {}", object_id, name))
}

fn required_u64(fields: &MoveValue, name: &str, object_id: &str) -> Result<u64> {
    required(fields, name, object_id)?
        .as_u64()
        .ok_or_else(|| anyhow!("object {} field {} is not an integer", object_id, name))
}

fn required_id(fields: &MoveValue, name: &str, object_id: &str) -> Result<String> {
    required(fields, name, object_id)?
        .as_id()
        .ok_or_else(|| anyhow!("object {} field {} is not an id", object_id, name))
}

fn optional_id(fields: &MoveValue, name: &str) -> Option<String> {
    fields
        .field(name)
        .and_then(MoveValue::as_option)
        .and_then(MoveValue::as_id)
}

fn optional_u64(fields: &MoveValue, name: &str) -> Option<u64> {
    fields
        .field(name)
        .and_then(MoveValue::as_option)
        .and_then(MoveValue::as_u64)
}

fn text(fields: &MoveValue, name: &str) -> Option<String> {
    fields.field(name).and_then(MoveValue::as_text)
}

/// ID of the shop value: its own `id` UID, else the object's ID.
fn value_id(fields: &MoveValue, object: &ObjectData) -> String {
    fields
        .field("id")
        .and_then(MoveValue::as_id)
        .unwrap_or_else(|| normalize_id(&object.object_id))
}

fn fields_of<'a>(object: &'a ObjectData, what: &str) -> Result<&'a MoveValue> {
    value_fields(object).ok_or_else(|| anyhow!("object {} has no {} content", object.object_id, what))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopInfo {
    pub shop_id: String,
    pub owner: String,
    pub name: Option<String>,
    pub initial_shared_version: Option<u64>,
}

impl ShopInfo {
    pub fn from_object(object: &ObjectData) -> Result<Self> {
        let fields = fields_of(object, "shop")?;
        Ok(Self {
            shop_id: normalize_id(&object.object_id),
            owner: required_id(fields, "owner", &object.object_id)?,
            name: text(fields, "name"),
            initial_shared_version: object.initial_shared_version(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListing {
    pub listing_id: String,
    pub name: String,
    pub base_price_usd_cents: u64,
    pub stock: u64,
    pub spotlight_discount_id: Option<String>,
    /// Object holding the listing (the dynamic field wrapper, if any).
    pub object_id: String,
}

impl ItemListing {
    pub fn from_object(object: &ObjectData) -> Result<Self> {
        let fields = fields_of(object, "listing")?;
        let id = &object.object_id;
        Ok(Self {
            listing_id: value_id(fields, object),
            name: text(fields, "name").unwrap_or_default(),
            base_price_usd_cents: required_u64(fields, "base_price_usd_cents", id)?,
            stock: required_u64(fields, "stock", id)?,
            spotlight_discount_id: optional_id(fields, "spotlight_discount_template_id"),
            object_id: normalize_id(id),
        })
    }

    pub fn display_price(&self) -> String {
        format_usd_cents(self.base_price_usd_cents)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedCurrency {
    pub currency_id: String,
    /// Canonical coin type, e.g. `0x…02::sui::SUI`.
    pub coin_type: String,
    pub symbol: Option<String>,
    pub decimals: Option<u64>,
    /// Pyth feed ID, hex.
    pub feed_id: Option<String>,
    pub price_info_object_id: Option<String>,
    pub object_id: String,
}

impl AcceptedCurrency {
    pub fn from_object(object: &ObjectData) -> Result<Self> {
        let fields = fields_of(object, "currency")?;
        let id = &object.object_id;
        let coin_type = required(fields, "coin_type", id)?
            .as_type_name()
            .ok_or_else(|| anyhow!("object {} field coin_type is not a type name", id))?;
        let feed_id = fields.field("feed_id").and_then(|v| {
            let bytes = v
                .as_vec()?
                .iter()
                .map(|b| b.as_u64().and_then(|n| u8::try_from(n).ok()))
                .collect::<Option<Vec<u8>>>()?;
            Some(format!("0x{}", hex::encode(&bytes)))
        });
        Ok(Self {
            currency_id: value_id(fields, object),
            coin_type,
            symbol: text(fields, "symbol"),
            decimals: fields.field("decimals").and_then(MoveValue::as_u64),
            feed_id,
            price_info_object_id: fields
                .field("pyth_object_id")
                .and_then(MoveValue::as_id),
            object_id: normalize_id(id),
        })
    }
}

/// How a discount template reduces the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DiscountRule {
    /// Fixed reduction in USD cents.
    Fixed { amount_cents: u64 },
    /// Percentage in basis points (10_000 = 100%).
    Percent { bps: u64 },
}

impl DiscountRule {
    /// Move-side discriminant passed to `create_discount_template`.
    pub fn kind_code(&self) -> u8 {
        match self {
            DiscountRule::Fixed { .. } => 0,
            DiscountRule::Percent { .. } => 1,
        }
    }

    pub fn value(&self) -> u64 {
        match self {
            DiscountRule::Fixed { amount_cents } => *amount_cents,
            DiscountRule::Percent { bps } => *bps,
        }
    }

    /// Enum rendering (`{"variant": "Percent", "fields": {"bps": ..}}`) or
    /// the older struct with `kind` / `value` fields.
    fn from_move(rule: &MoveValue) -> Option<Self> {
        match rule.variant_name() {
            Some("Fixed") => Some(DiscountRule::Fixed {
                amount_cents: rule.field("amount_cents")?.as_u64()?,
            }),
            Some("Percent") => Some(DiscountRule::Percent {
                bps: rule.field("bps")?.as_u64()?,
            }),
            Some(_) => None,
            None => {
                let value = rule.field("value")?.as_u64()?;
                match rule.field("kind")?.as_u64()? {
                    0 => Some(DiscountRule::Fixed {
                        amount_cents: value,
                    }),
                    1 => Some(DiscountRule::Percent { bps: value }),
                    _ => None,
                }
            }
        }
    }
}

impl std::fmt::Display for DiscountRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountRule::Fixed { amount_cents } => {
                write!(f, "{} off", format_usd_cents(*amount_cents))
            }
            DiscountRule::Percent { bps } => write!(f, "{} off", format_bps(*bps)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTemplate {
    pub template_id: String,
    pub applies_to_listing: Option<String>,
    pub rule: DiscountRule,
    pub starts_at: u64,
    pub expires_at: Option<u64>,
    pub max_redemptions: Option<u64>,
    pub claims_issued: u64,
    pub redemptions: u64,
    pub active: bool,
    pub object_id: String,
}

impl DiscountTemplate {
    pub fn from_object(object: &ObjectData) -> Result<Self> {
        let fields = fields_of(object, "discount template")?;
        let id = &object.object_id;
        let rule = DiscountRule::from_move(required(fields, "rule", id)?)
            .ok_or_else(|| anyhow!("object {} has an unrecognized discount rule", id))?;
        Ok(Self {
            template_id: value_id(fields, object),
            applies_to_listing: optional_id(fields, "applies_to_listing"),
            rule,
            starts_at: fields
                .field("starts_at")
                .and_then(MoveValue::as_u64)
                .unwrap_or(0),
            expires_at: optional_u64(fields, "expires_at"),
            max_redemptions: optional_u64(fields, "max_redemptions"),
            claims_issued: fields
                .field("claims_issued")
                .and_then(MoveValue::as_u64)
                .unwrap_or(0),
            redemptions: fields
                .field("redemptions")
                .and_then(MoveValue::as_u64)
                .unwrap_or(0),
            active: fields
                .field("active")
                .and_then(MoveValue::as_bool)
                .unwrap_or(false),
            object_id: normalize_id(id),
        })
    }

    /// Whether another ticket may be redeemed against this template.
    pub fn has_remaining(&self) -> bool {
        self.max_redemptions
            .map(|max| self.redemptions < max)
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTicket {
    pub ticket_id: String,
    pub template_id: String,
    pub shop_id: Option<String>,
    pub listing_id: Option<String>,
    pub claimer: Option<String>,
}

impl DiscountTicket {
    pub fn from_object(object: &ObjectData) -> Result<Self> {
        let fields = fields_of(object, "ticket")?;
        let id = &object.object_id;
        Ok(Self {
            ticket_id: normalize_id(id),
            template_id: required_id(fields, "discount_template_id", id)?,
            shop_id: fields.field("shop_address").and_then(MoveValue::as_id),
            listing_id: optional_id(fields, "listing_id"),
            claimer: fields.field("claimer").and_then(MoveValue::as_id),
        })
    }
}

/// A Pyth `PriceInfoObject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFeed {
    pub object_id: String,
    /// Pyth price identifier, hex.
    pub feed_id: Option<String>,
    pub price: i128,
    pub conf: u64,
    pub expo: i32,
    /// Publish time, unix seconds.
    pub timestamp: u64,
}

/// Pyth `I64 { negative, magnitude }`.
fn pyth_i64(value: &MoveValue) -> Option<i128> {
    let magnitude = i128::from(value.field("magnitude")?.as_u64()?);
    let negative = value.field("negative")?.as_bool()?;
    Some(if negative { -magnitude } else { magnitude })
}

impl PriceFeed {
    pub fn from_object(object: &ObjectData) -> Result<Self> {
        let fields = fields_of(object, "price info")?;
        let id = &object.object_id;
        let feed = fields
            .path(&["price_info", "price_feed"])
            .ok_or_else(|| anyhow!("object {} is not a Pyth price info object", id))?;
        let price = feed
            .field("price")
            .ok_or_else(|| anyhow!("object {} missing price_feed.price", id))?;
        let feed_id = feed
            .path(&["price_identifier", "bytes"])
            .and_then(MoveValue::as_vec)
            .and_then(|bytes| {
                bytes
                    .iter()
                    .map(|b| b.as_u64().and_then(|n| u8::try_from(n).ok()))
                    .collect::<Option<Vec<u8>>>()
            })
            .map(|bytes| format!("0x{}", hex::encode(&bytes)));
        let expo = price
            .field("expo")
            .and_then(pyth_i64)
            .and_then(|e| i32::try_from(e).ok())
            .ok_or_else(|| anyhow!("object {} has a malformed price exponent", id))?;
        Ok(Self {
            object_id: normalize_id(id),
            feed_id,
            price: price
                .field("price")
                .and_then(pyth_i64)
                .ok_or_else(|| anyhow!("object {} has a malformed price", id))?,
            conf: required_u64(price, "conf", id)?,
            expo,
            timestamp: required_u64(price, "timestamp", id)?,
        })
    }

    pub fn display_price(&self) -> String {
        format_scaled(self.price, self.expo)
    }

    pub fn display_conf(&self) -> String {
        format_scaled(i128::from(self.conf), self.expo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: serde_json::Value) -> ObjectData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_listing_from_dynamic_field() {
        let field_type = "0x2::dynamic_field::Field<0x2::object::ID, 0xaa::shop::ItemListing>";
        let obj = object(json!({
            "objectId": "0xf1", "version": "3", "digest": "D", "type": field_type,
            "content": {"dataType": "moveObject", "type": field_type, "fields": {
                "id": {"id": "0xf1"},
                "name": "0xb1",
                "value": {"type": "0xaa::shop::ItemListing", "fields": {
                    "id": {"id": "0xb1"},
                    "name": "Sword",
                    "base_price_usd_cents": "1999",
                    "stock": "4",
                    "spotlight_discount_template_id": null
                }}
            }}
        }));
        let listing = ItemListing::from_object(&obj).unwrap();
        assert_eq!(listing.listing_id, normalize_id("0xb1"));
        assert_eq!(listing.object_id, normalize_id("0xf1"));
        assert_eq!(listing.name, "Sword");
        assert_eq!(listing.display_price(), "$19.99");
        assert_eq!(listing.spotlight_discount_id, None);
        assert_eq!(value_type(&obj).as_deref(), Some("0x00000000000000000000000000000000000000000000000000000000000000aa::shop::ItemListing"));
    }

    #[test]
    fn test_currency_type_name() {
        let obj = object(json!({
            "objectId": "0xc1", "version": 1, "digest": "D", "type": "0xaa::shop::AcceptedCurrency",
            "content": {"dataType": "moveObject", "type": "0xaa::shop::AcceptedCurrency", "fields": {
                "id": {"id": "0xc1"},
                "coin_type": {"type": "0x1::type_name::TypeName", "fields": {
                    "name": "0000000000000000000000000000000000000000000000000000000000000002::sui::SUI"
                }},
                "symbol": "SUI",
                "decimals": 9,
                "feed_id": [35, 209],
                "pyth_object_id": "0xe1"
            }}
        }));
        let c = AcceptedCurrency::from_object(&obj).unwrap();
        assert!(c.coin_type.ends_with("02::sui::SUI"));
        assert_eq!(c.feed_id.as_deref(), Some("0x23d1"));
        assert_eq!(c.decimals, Some(9));
        assert_eq!(c.price_info_object_id, Some(normalize_id("0xe1")));
    }

    #[test]
    fn test_discount_rule_shapes() {
        let variant: MoveValue = serde_json::from_value(json!({
            "type": "0xaa::shop::DiscountRule", "variant": "Percent", "fields": {"bps": "1500"}
        }))
        .unwrap();
        let rule = DiscountRule::from_move(&variant).unwrap();
        assert_eq!(rule, DiscountRule::Percent { bps: 1500 });
        assert_eq!(rule.to_string(), "15.00% off");

        let legacy: MoveValue = serde_json::from_value(json!({
            "type": "0xaa::shop::DiscountRule", "fields": {"kind": 0, "value": "250"}
        }))
        .unwrap();
        assert_eq!(
            DiscountRule::from_move(&legacy),
            Some(DiscountRule::Fixed { amount_cents: 250 })
        );
    }

    #[test]
    fn test_price_feed() {
        let obj = object(json!({
            "objectId": "0xe1", "version": 1, "digest": "D",
            "type": "0x8d::price_info::PriceInfoObject",
            "content": {"dataType": "moveObject", "type": "0x8d::price_info::PriceInfoObject", "fields": {
                "id": {"id": "0xe1"},
                "price_info": {"type": "0x8d::price_info::PriceInfo", "fields": {
                    "attestation_time": "1", "arrival_time": "2",
                    "price_feed": {"type": "0x8d::price_feed::PriceFeed", "fields": {
                        "price_identifier": {"type": "0x8d::price_identifier::PriceIdentifier", "fields": {"bytes": [1, 2]}},
                        "price": {"type": "0x8d::price::Price", "fields": {
                            "price": {"type": "0x8d::i64::I64", "fields": {"negative": false, "magnitude": "123456"}},
                            "conf": "50",
                            "expo": {"type": "0x8d::i64::I64", "fields": {"negative": true, "magnitude": "4"}},
                            "timestamp": "1700000000"
                        }}
                    }}
                }}
            }}
        }));
        let feed = PriceFeed::from_object(&obj).unwrap();
        assert_eq!(feed.expo, -4);
        assert_eq!(feed.display_price(), "12.3456");
        assert_eq!(feed.display_conf(), "0.0050");
        assert_eq!(feed.feed_id.as_deref(), Some("0x0102"));
    }
}
