//! `currencies` and `register-currency`.

use anyhow::{Context, Result};
use clap::Parser;
use sui_shop::shop::queries::list_currencies;
use sui_shop::shop::tx::{
    self, owned_object_arg, parse_coin_type, parse_object_id, shared_object_arg,
};

use super::context::ShopArgs;
use super::output::{print_json, short_type};
use super::ShopContext;

#[derive(Parser, Debug)]
pub struct CurrenciesCmd {
    #[command(flatten)]
    pub shop: ShopArgs,
}

impl CurrenciesCmd {
    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let ids = ctx.shop_ids(&self.shop)?;
        let rpc = ctx.rpc().await?;
        let currencies = list_currencies(&rpc, &ids.shop_id).await?;
        if ctx.json {
            return print_json(&currencies);
        }
        if currencies.is_empty() {
            println!("Shop {} accepts no currencies yet", ids.shop_id);
            return Ok(());
        }
        println!("\x1b[1mAccepted currencies\x1b[0m ({}):", currencies.len());
        for c in &currencies {
            println!(
                "  {:<8} {}",
                c.symbol.as_deref().unwrap_or("?"),
                short_type(&c.coin_type)
            );
            if let Some(feed) = &c.feed_id {
                println!("           feed {}", feed);
            }
            if let Some(price_info) = &c.price_info_object_id {
                println!("           price info {}", price_info);
            }
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct RegisterCurrencyCmd {
    #[command(flatten)]
    pub shop: ShopArgs,

    /// Owner capability (default: latest owner cap in the artifact file)
    #[arg(long)]
    pub owner_cap_id: Option<String>,

    /// Coin type to accept, e.g. 0x2::sui::SUI
    #[arg(long)]
    pub coin_type: String,

    /// Pyth price feed ID (32 bytes, hex)
    #[arg(long)]
    pub feed_id: String,

    /// Pyth price info object for the feed
    #[arg(long)]
    pub price_info_object_id: String,
}

impl RegisterCurrencyCmd {
    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let ids = ctx.shop_ids(&self.shop)?;
        let owner_cap = ctx.owner_cap(self.owner_cap_id.as_deref())?;
        let feed_id = hex::decode(self.feed_id.trim().trim_start_matches("0x"))
            .with_context(|| format!("invalid feed id {}", self.feed_id))?;
        let rpc = ctx.rpc().await?;

        let pt = tx::register_accepted_currency(
            parse_object_id(&ids.package_id)?,
            shared_object_arg(&rpc, &ids.shop_id, true).await?,
            owned_object_arg(&rpc, &owner_cap).await?,
            shared_object_arg(&rpc, &self.price_info_object_id, false).await?,
            parse_coin_type(&self.coin_type)?,
            feed_id,
        )?;
        ctx.submit(&rpc, pt).await?;
        Ok(())
    }
}
