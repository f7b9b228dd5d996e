//! `tickets`: discount tickets held by an address.

use anyhow::Result;
use clap::Parser;
use sui_shop::shop::queries::owned_tickets;
use sui_shop_transport::TransactionSigner;

use super::context::ShopArgs;
use super::output::print_json;
use super::ShopContext;

#[derive(Parser, Debug)]
pub struct TicketsCmd {
    #[command(flatten)]
    pub shop: ShopArgs,

    /// Ticket holder (default: the signer's address)
    #[arg(long)]
    pub owner: Option<String>,
}

impl TicketsCmd {
    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let ids = ctx.shop_ids(&self.shop)?;
        let owner = match &self.owner {
            Some(owner) => owner.clone(),
            None => ctx.signer()?.address(),
        };
        let rpc = ctx.rpc().await?;
        let tickets: Vec<_> = owned_tickets(&rpc, &owner, &ids.package_id)
            .await?
            .into_iter()
            .filter(|t| match &t.shop_id {
                Some(shop) => sui_shop_types::ids_equal(shop, &ids.shop_id),
                None => true,
            })
            .collect();

        if ctx.json {
            return print_json(&tickets);
        }
        if tickets.is_empty() {
            println!("{} holds no discount tickets for shop {}", owner, ids.shop_id);
            return Ok(());
        }
        println!("\x1b[1mDiscount tickets\x1b[0m ({}):", tickets.len());
        for t in &tickets {
            println!(
                "  \x1b[36m{}\x1b[0m  template {}{}",
                t.ticket_id,
                t.template_id,
                t.listing_id
                    .as_ref()
                    .map(|l| format!("  listing {}", l))
                    .unwrap_or_default()
            );
        }
        Ok(())
    }
}
