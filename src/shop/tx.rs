//! Programmable transactions for the `shop` module's entry functions.
//!
//! Builders are pure: object arguments are resolved beforehand with
//! [`shared_object_arg`] / [`owned_object_arg`], so the transactions can be
//! inspected in tests without a node.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use move_core_types::identifier::Identifier;
use move_core_types::language_storage::TypeTag;
use sui_shop_transport::intent::to_sdk_object_ref;
use sui_shop_transport::ShopRpc;
use sui_shop_types::address::normalize_address_checked;
use sui_shop_types::Owner;
use sui_shop_types::type_parsing::parse_type_tag;
use sui_types::base_types::{ObjectID, SequenceNumber};
use sui_types::programmable_transaction_builder::ProgrammableTransactionBuilder;
use sui_types::transaction::{
    Argument, Command, ObjectArg, ProgrammableTransaction, SharedObjectMutability,
};
use sui_types::{SUI_CLOCK_OBJECT_ID, SUI_CLOCK_OBJECT_SHARED_VERSION};

use super::models::DiscountRule;

pub const SHOP_MODULE: &str = "shop";

pub fn parse_object_id(s: &str) -> Result<ObjectID> {
    let id = normalize_address_checked(s)
        .ok_or_else(|| anyhow!("invalid object id {:?}: expected up to 64 hex digits", s))?;
    ObjectID::from_str(&id).map_err(|e| anyhow!("invalid object id {}: {}", s, e))
}

pub fn parse_coin_type(s: &str) -> Result<TypeTag> {
    parse_type_tag(s).ok_or_else(|| anyhow!("invalid coin type: {}", s))
}

/// Shared-object argument, looking up the initial shared version.
pub async fn shared_object_arg(rpc: &dyn ShopRpc, id: &str, mutable: bool) -> Result<ObjectArg> {
    let object = rpc.get_object(id).await?;
    let initial_shared_version = object
        .initial_shared_version()
        .ok_or_else(|| anyhow!("object is not shared: {}", id))?;
    Ok(ObjectArg::SharedObject {
        id: parse_object_id(&object.object_id)?,
        initial_shared_version: SequenceNumber::from_u64(initial_shared_version),
        mutability: if mutable {
            SharedObjectMutability::Mutable
        } else {
            SharedObjectMutability::Immutable
        },
    })
}

/// Owned or immutable object argument at its current version.
pub async fn owned_object_arg(rpc: &dyn ShopRpc, id: &str) -> Result<ObjectArg> {
    let object = rpc.get_object(id).await?;
    if object.owner.as_ref().is_some_and(Owner::is_shared) {
        bail!("object {} is shared, expected an owned object", id);
    }
    Ok(ObjectArg::ImmOrOwnedObject(to_sdk_object_ref(
        &object.object_ref(),
    )?))
}

/// The `0x6` clock, read-only.
pub fn clock_arg() -> ObjectArg {
    ObjectArg::SharedObject {
        id: SUI_CLOCK_OBJECT_ID,
        initial_shared_version: SUI_CLOCK_OBJECT_SHARED_VERSION,
        mutability: SharedObjectMutability::Immutable,
    }
}

fn shop_call(
    ptb: &mut ProgrammableTransactionBuilder,
    package: ObjectID,
    function: &str,
    type_arguments: Vec<TypeTag>,
    arguments: Vec<Argument>,
) -> Result<Argument> {
    tracing::trace!(%package, function, ?arguments, "shop move call");
    Ok(ptb.programmable_move_call(
        package,
        Identifier::new(SHOP_MODULE)?,
        Identifier::new(function).with_context(|| format!("invalid function name {}", function))?,
        type_arguments,
        arguments,
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListing {
    pub name: String,
    pub base_price_usd_cents: u64,
    pub stock: u64,
    pub spotlight_discount_template_id: Option<ObjectID>,
}

pub fn add_item_listing(
    package: ObjectID,
    shop: ObjectArg,
    owner_cap: ObjectArg,
    listing: &NewListing,
) -> Result<ProgrammableTransaction> {
    if listing.name.trim().is_empty() {
        bail!("listing name must not be empty");
    }
    let mut ptb = ProgrammableTransactionBuilder::new();
    let args = vec![
        ptb.obj(shop)?,
        ptb.obj(owner_cap)?,
        ptb.pure(listing.name.clone())?,
        ptb.pure(listing.base_price_usd_cents)?,
        ptb.pure(listing.stock)?,
        ptb.pure(listing.spotlight_discount_template_id)?,
    ];
    shop_call(&mut ptb, package, "add_item_listing", vec![], args)?;
    Ok(ptb.finish())
}

/// How the buyer pays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payment {
    /// Split this many MIST off the gas coin. Only valid for SUI.
    SplitGas(u64),
    /// Spend an owned `Coin<TCoin>` in full; the shop refunds change.
    Coin(ObjectArg),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub listing_id: ObjectID,
    pub coin_type: TypeTag,
    pub payment: Payment,
    pub discount_ticket: Option<ObjectArg>,
}

pub fn buy_item(
    package: ObjectID,
    shop: ObjectArg,
    price_info: ObjectArg,
    purchase: &Purchase,
) -> Result<ProgrammableTransaction> {
    let mut ptb = ProgrammableTransactionBuilder::new();
    let payment = match &purchase.payment {
        Payment::SplitGas(amount) => {
            let amount = ptb.pure(*amount)?;
            ptb.command(Command::SplitCoins(Argument::GasCoin, vec![amount]))
        }
        Payment::Coin(coin) => ptb.obj(coin.clone())?,
    };
    let shop = ptb.obj(shop)?;
    let listing = ptb.pure(purchase.listing_id)?;
    let price_info = ptb.obj(price_info)?;
    let clock = ptb.obj(clock_arg())?;
    match &purchase.discount_ticket {
        Some(ticket) => {
            let ticket = ptb.obj(ticket.clone())?;
            shop_call(
                &mut ptb,
                package,
                "buy_item_with_discount",
                vec![purchase.coin_type.clone()],
                vec![shop, listing, ticket, price_info, payment, clock],
            )?;
        }
        None => {
            shop_call(
                &mut ptb,
                package,
                "buy_item",
                vec![purchase.coin_type.clone()],
                vec![shop, listing, price_info, payment, clock],
            )?;
        }
    }
    Ok(ptb.finish())
}

pub fn register_accepted_currency(
    package: ObjectID,
    shop: ObjectArg,
    owner_cap: ObjectArg,
    price_info: ObjectArg,
    coin_type: TypeTag,
    feed_id: Vec<u8>,
) -> Result<ProgrammableTransaction> {
    if feed_id.len() != 32 {
        bail!("price feed id must be 32 bytes, got {}", feed_id.len());
    }
    let mut ptb = ProgrammableTransactionBuilder::new();
    let args = vec![
        ptb.obj(shop)?,
        ptb.obj(owner_cap)?,
        ptb.obj(price_info)?,
        ptb.pure(feed_id)?,
    ];
    shop_call(
        &mut ptb,
        package,
        "register_accepted_currency",
        vec![coin_type],
        args,
    )?;
    Ok(ptb.finish())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiscountTemplate {
    pub applies_to_listing: Option<ObjectID>,
    pub rule: DiscountRule,
    /// Unix seconds.
    pub starts_at: u64,
    pub expires_at: Option<u64>,
    pub max_redemptions: Option<u64>,
}

pub fn create_discount_template(
    package: ObjectID,
    shop: ObjectArg,
    owner_cap: ObjectArg,
    template: &NewDiscountTemplate,
) -> Result<ProgrammableTransaction> {
    if let DiscountRule::Percent { bps } = template.rule {
        if bps == 0 || bps > 10_000 {
            bail!("percent discount must be between 1 and 10000 bps, got {}", bps);
        }
    }
    if let Some(expires_at) = template.expires_at {
        if expires_at <= template.starts_at {
            bail!("discount expires at {} before it starts at {}", expires_at, template.starts_at);
        }
    }
    let mut ptb = ProgrammableTransactionBuilder::new();
    let args = vec![
        ptb.obj(shop)?,
        ptb.obj(owner_cap)?,
        ptb.pure(template.applies_to_listing)?,
        ptb.pure(template.rule.kind_code())?,
        ptb.pure(template.rule.value())?,
        ptb.pure(template.starts_at)?,
        ptb.pure(template.expires_at)?,
        ptb.pure(template.max_redemptions)?,
    ];
    shop_call(&mut ptb, package, "create_discount_template", vec![], args)?;
    Ok(ptb.finish())
}

pub fn toggle_discount_template(
    package: ObjectID,
    shop: ObjectArg,
    owner_cap: ObjectArg,
    template_id: ObjectID,
    active: bool,
) -> Result<ProgrammableTransaction> {
    let mut ptb = ProgrammableTransactionBuilder::new();
    let args = vec![
        ptb.obj(shop)?,
        ptb.obj(owner_cap)?,
        ptb.pure(template_id)?,
        ptb.pure(active)?,
    ];
    shop_call(&mut ptb, package, "toggle_discount_template", vec![], args)?;
    Ok(ptb.finish())
}

pub fn claim_discount_ticket(
    package: ObjectID,
    shop: ObjectArg,
    template_id: ObjectID,
) -> Result<ProgrammableTransaction> {
    let mut ptb = ProgrammableTransactionBuilder::new();
    let args = vec![
        ptb.obj(shop)?,
        ptb.pure(template_id)?,
        ptb.obj(clock_arg())?,
    ];
    shop_call(&mut ptb, package, "claim_discount_ticket", vec![], args)?;
    Ok(ptb.finish())
}
