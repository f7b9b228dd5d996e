//! `objects` and `object`: the artifact file and raw on-chain objects.

use anyhow::Result;
use clap::Parser;
use sui_shop_transport::ShopRpc;

use super::output::{print_artifacts, print_json, short_type};
use super::ShopContext;

#[derive(Parser, Debug)]
pub struct ObjectsCmd {
    /// Only objects whose type is this `module::Name` (e.g. `shop::Shop`)
    #[arg(long = "type")]
    pub type_filter: Option<String>,

    /// Include deleted and wrapped objects
    #[arg(long)]
    pub all: bool,
}

impl ObjectsCmd {
    /// Reads only the artifact file; needs no fullnode.
    pub fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let artifacts: Vec<_> = ctx
            .artifacts
            .load(ctx.network)?
            .into_iter()
            .filter(|a| self.all || a.is_live())
            .filter(|a| match &self.type_filter {
                Some(t) => a.is_type(t),
                None => true,
            })
            .collect();

        if ctx.json {
            return print_json(&artifacts);
        }
        let path = ctx.artifacts.path(ctx.network);
        if artifacts.is_empty() {
            println!("No objects recorded in {}", path.display());
            return Ok(());
        }
        println!(
            "\x1b[1m{} object(s)\x1b[0m in {}:",
            artifacts.len(),
            path.display()
        );
        print_artifacts(&artifacts);
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct ObjectCmd {
    /// Object ID (0x...)
    pub object_id: String,
}

impl ObjectCmd {
    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let rpc = ctx.rpc().await?;
        let object = rpc.get_object(&self.object_id).await?;
        if ctx.json {
            return print_json(&object);
        }
        println!("\x1b[1mObject:\x1b[0m  {}", object.object_id);
        println!(
            "\x1b[1mType:\x1b[0m    {}",
            object.type_name().map(short_type).unwrap_or_default()
        );
        println!("\x1b[1mVersion:\x1b[0m {}", object.version);
        if let Some(owner) = &object.owner {
            println!("\x1b[1mOwner:\x1b[0m   {}", owner.describe());
        }
        if let Some(fields) = object.fields() {
            println!("\x1b[1mFields:\x1b[0m");
            println!("{}", serde_json::to_string_pretty(fields)?);
        }
        Ok(())
    }
}
