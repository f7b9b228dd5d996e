//! `listings`, `add-listing` and `buy`.

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use sui_shop::gas::SUI_COIN_TYPE;
use sui_shop::shop::queries::{list_currencies, list_listings};
use sui_shop::shop::tx::{
    self, owned_object_arg, parse_coin_type, parse_object_id, shared_object_arg, NewListing,
    Payment, Purchase,
};
use sui_shop_transport::ShopRpc;
use sui_shop_types::type_parsing::{coin_type_from_coin, normalize_type_name};

use super::context::ShopArgs;
use super::output::print_json;
use super::ShopContext;

#[derive(Parser, Debug)]
pub struct ListingsCmd {
    #[command(flatten)]
    pub shop: ShopArgs,
}

impl ListingsCmd {
    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let ids = ctx.shop_ids(&self.shop)?;
        let rpc = ctx.rpc().await?;
        let listings = list_listings(&rpc, &ids.shop_id).await?;
        if ctx.json {
            return print_json(&listings);
        }
        if listings.is_empty() {
            println!("Shop {} has no listings", ids.shop_id);
            return Ok(());
        }
        println!("\x1b[1mListings\x1b[0m ({}):", listings.len());
        for listing in &listings {
            println!(
                "  \x1b[36m{}\x1b[0m  {:<24} {:>10}  stock {}{}",
                listing.listing_id,
                listing.name,
                listing.display_price(),
                listing.stock,
                listing
                    .spotlight_discount_id
                    .as_ref()
                    .map(|id| format!("  spotlight {}", id))
                    .unwrap_or_default()
            );
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct AddListingCmd {
    #[command(flatten)]
    pub shop: ShopArgs,

    /// Owner capability (default: latest owner cap in the artifact file)
    #[arg(long)]
    pub owner_cap_id: Option<String>,

    /// Item name
    #[arg(long)]
    pub name: String,

    /// Base price in USD cents
    #[arg(long)]
    pub price_cents: u64,

    /// Units available
    #[arg(long)]
    pub stock: u64,

    /// Discount template to feature on the listing
    #[arg(long)]
    pub spotlight_template_id: Option<String>,
}

impl AddListingCmd {
    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let ids = ctx.shop_ids(&self.shop)?;
        let owner_cap = ctx.owner_cap(self.owner_cap_id.as_deref())?;
        let rpc = ctx.rpc().await?;

        let listing = NewListing {
            name: self.name.clone(),
            base_price_usd_cents: self.price_cents,
            stock: self.stock,
            spotlight_discount_template_id: self
                .spotlight_template_id
                .as_deref()
                .map(parse_object_id)
                .transpose()?,
        };
        let pt = tx::add_item_listing(
            parse_object_id(&ids.package_id)?,
            shared_object_arg(&rpc, &ids.shop_id, true).await?,
            owned_object_arg(&rpc, &owner_cap).await?,
            &listing,
        )?;
        ctx.submit(&rpc, pt).await?;
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct BuyCmd {
    #[command(flatten)]
    pub shop: ShopArgs,

    /// Listing to buy
    #[arg(long)]
    pub listing_id: String,

    /// Coin type to pay with; must be an accepted currency (default: the
    /// payment coin's type, else SUI)
    #[arg(long)]
    pub coin_type: Option<String>,

    /// Pyth price info object (default: the one registered for the coin type)
    #[arg(long)]
    pub price_info_object_id: Option<String>,

    /// Amount to split off the gas coin, in MIST (SUI payments only)
    #[arg(long, conflicts_with = "payment_coin", required_unless_present = "payment_coin")]
    pub amount: Option<u64>,

    /// Coin object to spend; change is refunded
    #[arg(long)]
    pub payment_coin: Option<String>,

    /// Discount ticket to redeem
    #[arg(long)]
    pub ticket_id: Option<String>,
}

impl BuyCmd {
    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let ids = ctx.shop_ids(&self.shop)?;
        let rpc = ctx.rpc().await?;
        let coin_type = match (&self.coin_type, &self.payment_coin) {
            (Some(coin_type), _) => coin_type.clone(),
            (None, Some(coin)) => payment_coin_type(&rpc, coin).await?,
            (None, None) => SUI_COIN_TYPE.to_string(),
        };
        let coin_type = normalize_type_name(&coin_type)
            .ok_or_else(|| anyhow!("invalid coin type: {}", coin_type))?;

        let price_info = match &self.price_info_object_id {
            Some(id) => id.clone(),
            None => registered_price_info(&rpc, &ids.shop_id, &coin_type).await?,
        };
        let payment = match (self.amount, &self.payment_coin) {
            (_, Some(coin)) => Payment::Coin(owned_object_arg(&rpc, coin).await?),
            (Some(amount), None) => {
                if normalize_type_name(SUI_COIN_TYPE).as_deref() != Some(coin_type.as_str()) {
                    bail!("--amount splits the gas coin and only pays in SUI; pass --payment-coin");
                }
                Payment::SplitGas(amount)
            }
            (None, None) => bail!("pass --amount or --payment-coin"),
        };
        let discount_ticket = match &self.ticket_id {
            Some(id) => Some(owned_object_arg(&rpc, id).await?),
            None => None,
        };

        let purchase = Purchase {
            listing_id: parse_object_id(&self.listing_id)?,
            coin_type: parse_coin_type(&coin_type)?,
            payment,
            discount_ticket,
        };
        let pt = tx::buy_item(
            parse_object_id(&ids.package_id)?,
            shared_object_arg(&rpc, &ids.shop_id, true).await?,
            shared_object_arg(&rpc, &price_info, false).await?,
            &purchase,
        )?;
        ctx.submit(&rpc, pt).await?;
        Ok(())
    }
}

/// `T` of the `Coin<T>` object `coin_id`.
async fn payment_coin_type(rpc: &dyn ShopRpc, coin_id: &str) -> Result<String> {
    let coin = rpc.get_object(coin_id).await?;
    coin.type_name()
        .and_then(coin_type_from_coin)
        .ok_or_else(|| anyhow!("{} is not a coin; pass --coin-type", coin_id))
}

async fn registered_price_info(rpc: &dyn ShopRpc, shop_id: &str, coin_type: &str) -> Result<String> {
    list_currencies(rpc, shop_id)
        .await?
        .into_iter()
        .find(|c| normalize_type_name(&c.coin_type).as_deref() == Some(coin_type))
        .and_then(|c| c.price_info_object_id)
        .ok_or_else(|| {
            anyhow!(
                "{} is not an accepted currency of shop {}; pass --price-info-object-id",
                coin_type,
                shop_id
            )
        })
}
