//! The RPC operations the shop tooling consumes, and their sui-sdk backed
//! implementation.
//!
//! SDK responses are converted into `sui_shop_types` shapes by round-tripping
//! through `serde_json::Value`, which keeps the rest of the workspace free of
//! SDK types and lets tests substitute an in-memory [`ShopRpc`].

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sui_json_rpc_types::{
    SuiObjectDataFilter, SuiObjectDataOptions, SuiObjectResponseQuery,
    SuiTransactionBlockResponseOptions,
};
use sui_sdk::{SuiClient, SuiClientBuilder};
use sui_shop_types::{
    detect_contention, CoinInfo, DynamicFieldInfo, ObjectData, Page, RequestType, RetryConfig,
    TransactionResult,
};
use sui_types::base_types::{ObjectID, SuiAddress};
use sui_types::digests::TransactionDigest;
use sui_types::transaction::{Transaction, TransactionData};
use sui_types::transaction_driver_types::ExecuteTransactionRequestType;

use crate::intent::{to_sdk_object_ref, TransactionIntent};
use crate::retry::with_retries;
use crate::signer::TransactionSigner;

/// Page size requested from paginated endpoints.
pub const PAGE_LIMIT: usize = 50;

/// RPC operations used by the submission helper, the reconciler and the
/// shop queries.
#[async_trait]
pub trait ShopRpc: Send + Sync {
    /// One page of `owner`'s coins of `coin_type`.
    async fn get_coins(
        &self,
        owner: &str,
        coin_type: &str,
        cursor: Option<String>,
    ) -> Result<Page<CoinInfo>>;

    /// Object with type, owner and content. Errors when it does not exist.
    async fn get_object(&self, object_id: &str) -> Result<ObjectData>;

    /// One page of the dynamic fields attached to `parent_id`.
    async fn get_dynamic_fields(
        &self,
        parent_id: &str,
        cursor: Option<String>,
    ) -> Result<Page<DynamicFieldInfo>>;

    /// One page of objects of exactly `struct_type` owned by `owner`.
    async fn get_owned_objects(
        &self,
        owner: &str,
        struct_type: &str,
        cursor: Option<String>,
    ) -> Result<Page<ObjectData>>;

    /// A past transaction with effects, object changes and events.
    async fn get_transaction(&self, digest: &str) -> Result<TransactionResult>;

    async fn reference_gas_price(&self) -> Result<u64>;

    /// Sign `intent` with `signer` and submit it. The intent must carry a
    /// gas payment.
    ///
    /// Stale or locked inputs are reported as
    /// [`sui_shop_types::ObjectContention`] so callers can downcast.
    async fn sign_and_execute(
        &self,
        intent: &TransactionIntent,
        signer: &dyn TransactionSigner,
        request_type: RequestType,
    ) -> Result<TransactionResult>;
}

/// [`ShopRpc`] over a JSON-RPC fullnode.
#[derive(Clone)]
pub struct SuiRpcClient {
    client: Arc<SuiClient>,
    rpc_url: String,
    retry: RetryConfig,
}

impl SuiRpcClient {
    pub async fn connect(rpc_url: &str, retry: RetryConfig) -> Result<Self> {
        let client = SuiClientBuilder::default()
            .build(rpc_url)
            .await
            .with_context(|| format!("connect rpc: {}", rpc_url))?;
        tracing::debug!(rpc_url, "connected");
        Ok(Self {
            client: Arc::new(client),
            rpc_url: rpc_url.to_string(),
            retry,
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    fn object_options() -> SuiObjectDataOptions {
        SuiObjectDataOptions::new()
            .with_type()
            .with_owner()
            .with_content()
            .with_previous_transaction()
    }

    fn transaction_options() -> SuiTransactionBlockResponseOptions {
        SuiTransactionBlockResponseOptions::new()
            .with_effects()
            .with_events()
            .with_object_changes()
    }
}

/// Convert an SDK response into one of our shapes through JSON.
fn convert<S: Serialize, T: DeserializeOwned>(value: &S, what: &str) -> Result<T> {
    let json = serde_json::to_value(value).with_context(|| format!("serialize {}", what))?;
    serde_json::from_value(json).with_context(|| format!("malformed {} response", what))
}

fn parse_address(s: &str) -> Result<SuiAddress> {
    SuiAddress::from_str(s).map_err(|e| anyhow!("invalid address {}: {}", s, e))
}

fn parse_object_id(s: &str) -> Result<ObjectID> {
    ObjectID::from_str(s).map_err(|e| anyhow!("invalid object id {}: {}", s, e))
}

#[async_trait]
impl ShopRpc for SuiRpcClient {
    async fn get_coins(
        &self,
        owner: &str,
        coin_type: &str,
        cursor: Option<String>,
    ) -> Result<Page<CoinInfo>> {
        let owner = parse_address(owner)?;
        let page = with_retries(self.retry, || {
            let client = Arc::clone(&self.client);
            let cursor = cursor.clone();
            async move {
                client
                    .coin_read_api()
                    .get_coins(owner, Some(coin_type.to_string()), cursor, Some(PAGE_LIMIT))
                    .await
                    .with_context(|| format!("get_coins {} for {}", coin_type, owner))
            }
        })
        .await?;
        convert(&page, "get_coins")
    }

    async fn get_object(&self, object_id: &str) -> Result<ObjectData> {
        let id = parse_object_id(object_id)?;
        let resp = with_retries(self.retry, || {
            let client = Arc::clone(&self.client);
            async move {
                client
                    .read_api()
                    .get_object_with_options(id, Self::object_options())
                    .await
                    .with_context(|| format!("fetch object {}", id))
            }
        })
        .await?;
        let Some(data) = resp.data.as_ref() else {
            match resp.error {
                Some(err) => bail!("object {} unavailable: {:?}", id, err),
                None => bail!("object not found: {}", id),
            }
        };
        convert(data, "get_object")
    }

    async fn get_dynamic_fields(
        &self,
        parent_id: &str,
        cursor: Option<String>,
    ) -> Result<Page<DynamicFieldInfo>> {
        let parent = parse_object_id(parent_id)?;
        let cursor = cursor.as_deref().map(parse_object_id).transpose()?;
        let page = with_retries(self.retry, || {
            let client = Arc::clone(&self.client);
            async move {
                client
                    .read_api()
                    .get_dynamic_fields(parent, cursor, Some(PAGE_LIMIT))
                    .await
                    .with_context(|| format!("get_dynamic_fields {}", parent))
            }
        })
        .await?;
        convert(&page, "get_dynamic_fields")
    }

    async fn get_owned_objects(
        &self,
        owner: &str,
        struct_type: &str,
        cursor: Option<String>,
    ) -> Result<Page<ObjectData>> {
        let owner = parse_address(owner)?;
        let tag = move_core_types::language_storage::StructTag::from_str(struct_type)
            .map_err(|e| anyhow!("invalid struct type {}: {}", struct_type, e))?;
        let cursor = cursor.as_deref().map(parse_object_id).transpose()?;
        let query = SuiObjectResponseQuery::new(
            Some(SuiObjectDataFilter::StructType(tag)),
            Some(Self::object_options()),
        );
        let page = with_retries(self.retry, || {
            let client = Arc::clone(&self.client);
            let query = query.clone();
            async move {
                client
                    .read_api()
                    .get_owned_objects(owner, Some(query), cursor, Some(PAGE_LIMIT))
                    .await
                    .with_context(|| format!("get_owned_objects {} for {}", struct_type, owner))
            }
        })
        .await?;

        let data = page
            .data
            .iter()
            .filter_map(|resp| resp.data.as_ref())
            .map(|d| convert(d, "get_owned_objects"))
            .collect::<Result<Vec<ObjectData>>>()?;
        Ok(Page {
            data,
            next_cursor: page.next_cursor.map(|c| c.to_string()),
            has_next_page: page.has_next_page,
        })
    }

    async fn get_transaction(&self, digest: &str) -> Result<TransactionResult> {
        let digest = TransactionDigest::from_str(digest)
            .map_err(|e| anyhow!("invalid transaction digest {}: {}", digest, e))?;
        let resp = with_retries(self.retry, || {
            let client = Arc::clone(&self.client);
            async move {
                client
                    .read_api()
                    .get_transaction_with_options(digest, Self::transaction_options())
                    .await
                    .with_context(|| format!("fetch transaction {}", digest))
            }
        })
        .await?;
        convert(&resp, "get_transaction")
    }

    async fn reference_gas_price(&self) -> Result<u64> {
        with_retries(self.retry, || {
            let client = Arc::clone(&self.client);
            async move {
                client
                    .read_api()
                    .get_reference_gas_price()
                    .await
                    .context("get_reference_gas_price")
            }
        })
        .await
    }

    async fn sign_and_execute(
        &self,
        intent: &TransactionIntent,
        signer: &dyn TransactionSigner,
        request_type: RequestType,
    ) -> Result<TransactionResult> {
        let sender = parse_address(&signer.address())?;
        let gas = intent
            .gas_payment
            .as_ref()
            .ok_or_else(|| anyhow!("transaction intent has no gas payment"))?;
        let gas_ref = to_sdk_object_ref(gas)?;
        let gas_price = self.reference_gas_price().await?;

        let tx_data = TransactionData::new_programmable(
            sender,
            vec![gas_ref],
            intent.programmable.clone(),
            intent.gas_budget,
            gas_price,
        );
        let signature = signer.sign(&tx_data).await?;
        let tx = Transaction::from_data(tx_data, vec![signature]);
        let request_type = match request_type {
            RequestType::WaitForEffectsCert => ExecuteTransactionRequestType::WaitForEffectsCert,
            RequestType::WaitForLocalExecution => {
                ExecuteTransactionRequestType::WaitForLocalExecution
            }
        };

        let resp = self
            .client
            .quorum_driver_api()
            .execute_transaction_block(tx, Self::transaction_options(), Some(request_type))
            .await
            .map_err(|e| {
                let message = format!("{:#}", e);
                match detect_contention(&message) {
                    Some(contention) => anyhow::Error::new(contention).context(message),
                    None => anyhow!("execute transaction: {}", message),
                }
            })?;
        convert(&resp, "execute_transaction_block")
    }
}
