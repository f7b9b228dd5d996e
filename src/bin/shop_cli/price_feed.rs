//! `price-feed`: decode a Pyth price info object.

use anyhow::Result;
use clap::Parser;
use sui_shop::shop::queries::price_feed;
use sui_shop::utils::format_unix_secs;

use super::output::print_json;
use super::ShopContext;

#[derive(Parser, Debug)]
pub struct PriceFeedCmd {
    /// Price info object ID (0x...)
    pub price_info_object_id: String,
}

impl PriceFeedCmd {
    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let rpc = ctx.rpc().await?;
        let feed = price_feed(&rpc, &self.price_info_object_id).await?;
        if ctx.json {
            return print_json(&feed);
        }
        println!("\x1b[1mPrice feed\x1b[0m {}", feed.object_id);
        if let Some(id) = &feed.feed_id {
            println!("  feed       {}", id);
        }
        println!("  price      {} ± {}", feed.display_price(), feed.display_conf());
        println!("  published  {}", format_unix_secs(feed.timestamp));
        Ok(())
    }
}
