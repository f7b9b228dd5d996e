//! In-memory stand-ins for the fullnode and the keystore.
//!
//! `MockRpc` serves coins and objects from maps and answers submissions from
//! a script, recording the gas coin used by each attempt.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use sui_shop_transport::{GasPayment, ShopRpc, TransactionIntent, TransactionSigner};
use sui_shop_types::type_parsing::normalize_type_name;
use sui_shop_types::{
    normalize_id, CoinInfo, DynamicFieldInfo, ObjectData, Page, RequestType, TransactionResult,
};
use sui_types::crypto::Signature;
use sui_types::transaction::TransactionData;

/// Coins are served this many per page, so selection has to paginate.
pub const COIN_PAGE_SIZE: usize = 2;

#[derive(Default)]
pub struct MockRpc {
    coins: Mutex<Vec<CoinInfo>>,
    objects: Mutex<HashMap<String, ObjectData>>,
    dynamic_fields: Mutex<HashMap<String, Vec<DynamicFieldInfo>>>,
    transactions: Mutex<HashMap<String, TransactionResult>>,
    responses: Mutex<VecDeque<Result<TransactionResult>>>,
    submissions: Mutex<Vec<Option<GasPayment>>>,
    coin_queries: Mutex<usize>,
}

impl MockRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coins(self, coins: Vec<CoinInfo>) -> Self {
        *self.coins.lock().unwrap() = coins;
        self
    }

    pub fn add_object(&self, object: ObjectData) {
        self.objects
            .lock()
            .unwrap()
            .insert(normalize_id(&object.object_id), object);
    }

    pub fn add_dynamic_field(&self, parent_id: &str, field: DynamicFieldInfo) {
        self.dynamic_fields
            .lock()
            .unwrap()
            .entry(normalize_id(parent_id))
            .or_default()
            .push(field);
    }

    pub fn add_transaction(&self, result: TransactionResult) {
        self.transactions
            .lock()
            .unwrap()
            .insert(result.digest.clone(), result);
    }

    /// Queue the outcome of the next `sign_and_execute` call.
    pub fn push_response(&self, response: Result<TransactionResult>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Gas coin carried by each submission, in order.
    pub fn submissions(&self) -> Vec<Option<GasPayment>> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn coin_queries(&self) -> usize {
        *self.coin_queries.lock().unwrap()
    }
}

#[async_trait]
impl ShopRpc for MockRpc {
    async fn get_coins(
        &self,
        _owner: &str,
        _coin_type: &str,
        cursor: Option<String>,
    ) -> Result<Page<CoinInfo>> {
        *self.coin_queries.lock().unwrap() += 1;
        let coins = self.coins.lock().unwrap();
        let start: usize = cursor.map(|c| c.parse()).transpose()?.unwrap_or(0);
        let end = (start + COIN_PAGE_SIZE).min(coins.len());
        let has_next_page = end < coins.len();
        Ok(Page {
            data: coins[start.min(end)..end].to_vec(),
            next_cursor: has_next_page.then(|| end.to_string()),
            has_next_page,
        })
    }

    async fn get_object(&self, object_id: &str) -> Result<ObjectData> {
        self.objects
            .lock()
            .unwrap()
            .get(&normalize_id(object_id))
            .cloned()
            .ok_or_else(|| anyhow!("object not found: {}", object_id))
    }

    async fn get_dynamic_fields(
        &self,
        parent_id: &str,
        _cursor: Option<String>,
    ) -> Result<Page<DynamicFieldInfo>> {
        Ok(Page {
            data: self
                .dynamic_fields
                .lock()
                .unwrap()
                .get(&normalize_id(parent_id))
                .cloned()
                .unwrap_or_default(),
            next_cursor: None,
            has_next_page: false,
        })
    }

    async fn get_owned_objects(
        &self,
        owner: &str,
        struct_type: &str,
        _cursor: Option<String>,
    ) -> Result<Page<ObjectData>> {
        let data = self
            .objects
            .lock()
            .unwrap()
            .values()
            .filter(|o| {
                o.owner.as_ref().and_then(|w| w.owner_address())
                    == Some(normalize_id(owner))
                    && o.type_name().and_then(normalize_type_name)
                        == normalize_type_name(struct_type)
            })
            .cloned()
            .collect();
        Ok(Page {
            data,
            next_cursor: None,
            has_next_page: false,
        })
    }

    async fn get_transaction(&self, digest: &str) -> Result<TransactionResult> {
        self.transactions
            .lock()
            .unwrap()
            .get(digest)
            .cloned()
            .ok_or_else(|| anyhow!("transaction not found: {}", digest))
    }

    async fn reference_gas_price(&self) -> Result<u64> {
        Ok(1000)
    }

    async fn sign_and_execute(
        &self,
        intent: &TransactionIntent,
        _signer: &dyn TransactionSigner,
        _request_type: RequestType,
    ) -> Result<TransactionResult> {
        self.submissions
            .lock()
            .unwrap()
            .push(intent.gas_payment.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted response left")))
    }
}

/// Signer that only knows its address; `MockRpc` never asks it to sign.
pub struct MockSigner {
    pub address: String,
}

impl MockSigner {
    pub fn new(address: &str) -> Self {
        Self {
            address: normalize_id(address),
        }
    }
}

#[async_trait]
impl TransactionSigner for MockSigner {
    fn address(&self) -> String {
        self.address.clone()
    }

    async fn sign(&self, _tx_data: &TransactionData) -> Result<Signature> {
        bail!("mock signer cannot sign")
    }
}
