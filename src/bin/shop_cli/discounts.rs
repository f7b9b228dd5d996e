//! Discount templates: `discounts`, `create-discount`, `toggle-discount`,
//! `claim-ticket`.

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{ArgAction, Parser};
use sui_shop::shop::queries::list_discount_templates;
use sui_shop::shop::tx::{
    self, owned_object_arg, parse_object_id, shared_object_arg, NewDiscountTemplate,
};
use sui_shop::shop::DiscountRule;
use sui_shop::utils::format_unix_secs;

use super::context::ShopArgs;
use super::output::print_json;
use super::ShopContext;

#[derive(Parser, Debug)]
pub struct DiscountsCmd {
    #[command(flatten)]
    pub shop: ShopArgs,

    /// Only active templates
    #[arg(long)]
    pub active: bool,
}

impl DiscountsCmd {
    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let ids = ctx.shop_ids(&self.shop)?;
        let rpc = ctx.rpc().await?;
        let templates: Vec<_> = list_discount_templates(&rpc, &ids.shop_id)
            .await?
            .into_iter()
            .filter(|t| !self.active || t.active)
            .collect();
        if ctx.json {
            return print_json(&templates);
        }
        if templates.is_empty() {
            println!("Shop {} has no discount templates", ids.shop_id);
            return Ok(());
        }
        println!("\x1b[1mDiscount templates\x1b[0m ({}):", templates.len());
        for t in &templates {
            let state = if !t.active {
                "\x1b[33minactive\x1b[0m"
            } else if !t.has_remaining() {
                "\x1b[33mexhausted\x1b[0m"
            } else {
                "\x1b[32mactive\x1b[0m"
            };
            println!("  \x1b[36m{}\x1b[0m  {}  [{}]", t.template_id, t.rule, state);
            println!(
                "      {} -> {}",
                format_unix_secs(t.starts_at),
                t.expires_at.map(format_unix_secs).unwrap_or_else(|| "no expiry".into())
            );
            println!(
                "      claims {}  redemptions {}{}",
                t.claims_issued,
                t.redemptions,
                t.max_redemptions
                    .map(|m| format!(" / {}", m))
                    .unwrap_or_default()
            );
            if let Some(listing) = &t.applies_to_listing {
                println!("      listing {}", listing);
            }
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct CreateDiscountCmd {
    #[command(flatten)]
    pub shop: ShopArgs,

    /// Owner capability (default: latest owner cap in the artifact file)
    #[arg(long)]
    pub owner_cap_id: Option<String>,

    /// Restrict the discount to one listing
    #[arg(long)]
    pub listing_id: Option<String>,

    /// Fixed reduction in USD cents
    #[arg(long, conflicts_with = "percent_bps", required_unless_present = "percent_bps")]
    pub fixed_cents: Option<u64>,

    /// Percentage reduction in basis points (100 = 1%)
    #[arg(long)]
    pub percent_bps: Option<u64>,

    /// Start time, Unix seconds (default: now)
    #[arg(long)]
    pub starts_at: Option<u64>,

    /// Expiry time, Unix seconds
    #[arg(long)]
    pub expires_at: Option<u64>,

    /// Maximum number of redemptions
    #[arg(long)]
    pub max_redemptions: Option<u64>,
}

impl CreateDiscountCmd {
    fn rule(&self) -> Result<DiscountRule> {
        match (self.fixed_cents, self.percent_bps) {
            (Some(amount_cents), None) => Ok(DiscountRule::Fixed { amount_cents }),
            (None, Some(bps)) => Ok(DiscountRule::Percent { bps }),
            _ => bail!("pass exactly one of --fixed-cents or --percent-bps"),
        }
    }

    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let ids = ctx.shop_ids(&self.shop)?;
        let owner_cap = ctx.owner_cap(self.owner_cap_id.as_deref())?;
        let template = NewDiscountTemplate {
            applies_to_listing: self
                .listing_id
                .as_deref()
                .map(parse_object_id)
                .transpose()?,
            rule: self.rule()?,
            starts_at: self
                .starts_at
                .unwrap_or_else(|| Utc::now().timestamp().max(0) as u64),
            expires_at: self.expires_at,
            max_redemptions: self.max_redemptions,
        };
        let rpc = ctx.rpc().await?;
        let pt = tx::create_discount_template(
            parse_object_id(&ids.package_id)?,
            shared_object_arg(&rpc, &ids.shop_id, true).await?,
            owned_object_arg(&rpc, &owner_cap).await?,
            &template,
        )?;
        ctx.submit(&rpc, pt).await?;
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct ToggleDiscountCmd {
    #[command(flatten)]
    pub shop: ShopArgs,

    /// Owner capability (default: latest owner cap in the artifact file)
    #[arg(long)]
    pub owner_cap_id: Option<String>,

    /// Discount template to toggle
    #[arg(long)]
    pub template_id: String,

    /// New state: true to activate, false to deactivate
    #[arg(long, action = ArgAction::Set)]
    pub active: bool,
}

impl ToggleDiscountCmd {
    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let ids = ctx.shop_ids(&self.shop)?;
        let owner_cap = ctx.owner_cap(self.owner_cap_id.as_deref())?;
        let rpc = ctx.rpc().await?;
        let pt = tx::toggle_discount_template(
            parse_object_id(&ids.package_id)?,
            shared_object_arg(&rpc, &ids.shop_id, true).await?,
            owned_object_arg(&rpc, &owner_cap).await?,
            parse_object_id(&self.template_id)?,
            self.active,
        )?;
        ctx.submit(&rpc, pt).await?;
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct ClaimTicketCmd {
    #[command(flatten)]
    pub shop: ShopArgs,

    /// Discount template to claim from
    #[arg(long)]
    pub template_id: String,
}

impl ClaimTicketCmd {
    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let ids = ctx.shop_ids(&self.shop)?;
        let rpc = ctx.rpc().await?;
        let pt = tx::claim_discount_ticket(
            parse_object_id(&ids.package_id)?,
            shared_object_arg(&rpc, &ids.shop_id, true).await?,
            parse_object_id(&self.template_id)?,
        )?;
        ctx.submit(&rpc, pt).await?;
        Ok(())
    }
}
