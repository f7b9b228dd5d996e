//! Settings shared by every subcommand, plus the submit path.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use sui_shop::shop::{resolve_owner_cap, resolve_shop_ids, ShopIds};
use sui_shop::{sign_and_execute, ArtifactStore, ExecuteConfig, ExecutionOutcome};
use sui_shop_transport::network::resolve_rpc_url;
use sui_shop_transport::{KeystoreSigner, Network, SuiRpcClient, TransactionIntent};
use sui_shop_types::RetryConfig;
use sui_types::transaction::ProgrammableTransaction;

use super::output::print_outcome;

pub struct ShopContext {
    pub network: Network,
    pub rpc_url: String,
    pub artifacts: ArtifactStore,
    pub keystore: Option<PathBuf>,
    pub sender: Option<String>,
    pub gas_budget: u64,
    pub json: bool,
}

impl ShopContext {
    pub fn new(
        network: Network,
        rpc_url: Option<&str>,
        artifact_dir: Option<&Path>,
        keystore: Option<PathBuf>,
        sender: Option<String>,
        gas_budget: u64,
        json: bool,
    ) -> Self {
        Self {
            network,
            rpc_url: resolve_rpc_url(network, rpc_url),
            artifacts: ArtifactStore::resolve(artifact_dir),
            keystore,
            sender,
            gas_budget,
            json,
        }
    }

    pub async fn rpc(&self) -> Result<SuiRpcClient> {
        SuiRpcClient::connect(&self.rpc_url, RetryConfig::default()).await
    }

    pub fn signer(&self) -> Result<KeystoreSigner> {
        KeystoreSigner::open(self.keystore.as_deref(), self.sender.as_deref())
    }

    pub fn shop_ids(&self, args: &ShopArgs) -> Result<ShopIds> {
        resolve_shop_ids(
            &self.artifacts,
            self.network,
            args.shop_id.as_deref(),
            args.package_id.as_deref(),
        )
    }

    pub fn owner_cap(&self, explicit: Option<&str>) -> Result<String> {
        resolve_owner_cap(&self.artifacts, self.network, explicit)
    }

    /// Sign, submit and report `programmable` with the configured budget.
    pub async fn submit(
        &self,
        rpc: &SuiRpcClient,
        programmable: ProgrammableTransaction,
    ) -> Result<ExecutionOutcome> {
        let signer = self.signer()?;
        let intent = TransactionIntent::new(programmable).with_gas_budget(self.gas_budget);
        let config = ExecuteConfig::new(self.network, self.artifacts.clone());
        let outcome = sign_and_execute(rpc, intent, &signer, &config).await?;
        print_outcome(&outcome, &self.artifacts.path(self.network), self.json)?;
        Ok(outcome)
    }
}

/// Which shop to act on. Omitted IDs come from the artifact file.
#[derive(Args, Debug, Clone)]
pub struct ShopArgs {
    /// Shop object ID (default: latest shop in the artifact file)
    #[arg(long)]
    pub shop_id: Option<String>,

    /// Shop package ID (default: the shop artifact's package)
    #[arg(long)]
    pub package_id: Option<String>,
}
