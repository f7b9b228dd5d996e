//! `reconcile`: replay a finished transaction's object changes into the
//! artifact file, for runs that stopped between execution and the write.

use anyhow::{bail, Result};
use clap::Parser;
use sui_shop::artifacts::reconcile;
use sui_shop_transport::ShopRpc;
use sui_shop_types::classify;

use super::output::{print_artifacts, print_json};
use super::ShopContext;

#[derive(Parser, Debug)]
pub struct ReconcileCmd {
    /// Transaction digest
    pub digest: String,

    /// Signer recorded on created artifacts (default: the transaction sender)
    #[arg(long)]
    pub signer: Option<String>,
}

impl ReconcileCmd {
    pub async fn execute(&self, ctx: &ShopContext) -> Result<()> {
        let rpc = ctx.rpc().await?;
        let result = rpc.get_transaction(&self.digest).await?;
        if let Some(message) = result.failure_message() {
            bail!("transaction {} failed on-chain: {}", result.digest, message);
        }
        let signer = match self.signer.clone().or_else(|| result.sender()) {
            Some(s) => s,
            None => bail!("transaction {} has no sender; pass --signer", result.digest),
        };

        let changes = classify(&result.object_changes);
        let diff = reconcile(&rpc, &ctx.artifacts, ctx.network, &changes, &signer).await?;

        if ctx.json {
            return print_json(&diff);
        }
        let path = ctx.artifacts.path(ctx.network);
        if diff.is_empty() {
            println!("{} already up to date", path.display());
            return Ok(());
        }
        println!("\x1b[1mReconciled\x1b[0m {} ({} change(s)):", path.display(), diff.len());
        for artifacts in [&diff.created, &diff.updated, &diff.deleted, &diff.wrapped] {
            print_artifacts(artifacts);
        }
        Ok(())
    }
}
