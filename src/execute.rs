//! Signing and submitting transactions, with a single retry when the gas
//! coin turns out to be stale or locked, followed by artifact reconciliation.

use std::collections::BTreeSet;

use serde::Serialize;
use sui_shop_transport::{Network, ShopRpc, TransactionIntent, TransactionSigner};
use sui_shop_types::{
    classify, detect_contention, normalize_id, ObjectContention, RequestType, TransactionResult,
};

use crate::artifacts::{reconcile, ArtifactDiff, ArtifactStore};
use crate::error::SubmitError;
use crate::gas::select_gas_coin;

#[derive(Debug, Clone)]
pub struct ExecuteConfig {
    pub request_type: RequestType,
    /// Retry once with a fresh gas coin after a stale/locked failure.
    pub retry_on_stale_gas: bool,
    /// Turn a non-success execution status into [`SubmitError::ExecutionFailed`].
    pub assert_success: bool,
    pub network: Network,
    pub artifacts: ArtifactStore,
}

impl ExecuteConfig {
    pub fn new(network: Network, artifacts: ArtifactStore) -> Self {
        Self {
            request_type: RequestType::default(),
            retry_on_stale_gas: true,
            assert_success: true,
            network,
            artifacts,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOutcome {
    pub transaction_result: TransactionResult,
    pub object_artifacts: ArtifactDiff,
    /// Submission attempts made: 1, or 2 after a stale gas retry.
    pub attempts: u32,
}

/// Contention reported by a submission error: the typed
/// [`ObjectContention`] anywhere in the chain, else recognized from the
/// error text.
pub fn contention_from_error(err: &anyhow::Error) -> Option<ObjectContention> {
    err.chain()
        .find_map(|e| e.downcast_ref::<ObjectContention>().cloned())
        .or_else(|| detect_contention(&format!("{:#}", err)))
}

/// Sign and submit `intent`, then reconcile artifacts for `config.network`.
///
/// A gas coin is selected when the intent carries none. If the first
/// submission fails because objects are stale or locked, a new gas coin is
/// selected that excludes every object named in the failure, and the
/// submission is retried exactly once. Every other failure is returned as is.
pub async fn sign_and_execute(
    rpc: &dyn ShopRpc,
    mut intent: TransactionIntent,
    signer: &dyn TransactionSigner,
    config: &ExecuteConfig,
) -> Result<ExecutionOutcome, SubmitError> {
    let sender = normalize_id(&signer.address());
    if intent.gas_payment.is_none() {
        intent.gas_payment = Some(select_gas_coin(rpc, &sender, &BTreeSet::new()).await?);
    }

    let mut attempts = 1u32;
    let result = loop {
        tracing::info!(sender = %sender, attempt = attempts, "submitting transaction");
        match rpc
            .sign_and_execute(&intent, signer, config.request_type)
            .await
        {
            Ok(result) => break result,
            Err(err) => {
                let contention = if config.retry_on_stale_gas && attempts == 1 {
                    contention_from_error(&err)
                } else {
                    None
                };
                let Some(contention) = contention else {
                    return Err(SubmitError::Rpc(err));
                };
                tracing::warn!(
                    kind = %contention.kind,
                    objects = ?contention.object_ids,
                    "stale gas, retrying with a fresh coin"
                );
                let exclude: BTreeSet<String> = contention.object_ids.into_iter().collect();
                intent.gas_payment = Some(select_gas_coin(rpc, &sender, &exclude).await?);
                attempts += 1;
            }
        }
    };
    tracing::info!(digest = %result.digest, attempts, "transaction executed");

    if config.assert_success {
        if let Some(message) = result.failure_message() {
            return Err(SubmitError::ExecutionFailed {
                digest: result.digest.clone(),
                message,
            });
        }
    }

    let classified = classify(&result.object_changes);
    let object_artifacts = if classified.is_empty() {
        ArtifactDiff::default()
    } else {
        reconcile(rpc, &config.artifacts, config.network, &classified, &sender)
            .await
            .map_err(|e| SubmitError::Artifacts {
                digest: result.digest.clone(),
                source: e.into(),
            })?
    };

    Ok(ExecutionOutcome {
        transaction_result: result,
        object_artifacts,
        attempts,
    })
}
