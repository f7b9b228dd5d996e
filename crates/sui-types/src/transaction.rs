//! Transaction submission results.
//!
//! These mirror the subset of `SuiTransactionBlockResponse` that the shop
//! tooling reads: status, object changes and events. The transport layer
//! converts SDK responses into these through `serde_json::Value`, so field
//! names follow the JSON-RPC spelling.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::object_change::ObjectChange;
use crate::serde_helpers::u64_from_str_or_num;

/// Error string used when the network reports a failure without one.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Transaction failed";

/// How long the fullnode should wait before acknowledging a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestType {
    /// Return once effects are certified.
    WaitForEffectsCert,
    /// Return once the fullnode has executed the transaction locally, so
    /// follow-up reads observe its effects.
    #[default]
    WaitForLocalExecution,
}

/// Execution status inside `effects.status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ExecutionStatus {
    Success,
    Failure {
        #[serde(default)]
        error: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasUsed {
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub computation_cost: u64,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub storage_cost: u64,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub storage_rebate: u64,
}

impl GasUsed {
    /// Net gas charged, in MIST. Negative when the rebate exceeds the cost.
    pub fn net(&self) -> i128 {
        self.computation_cost as i128 + self.storage_cost as i128 - self.storage_rebate as i128
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEffects {
    pub status: ExecutionStatus,
    #[serde(default)]
    pub gas_used: Option<GasUsed>,
}

/// A Move event emitted by the transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub parsed_json: Value,
}

/// Response to a sign-and-execute request, or to a transaction lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    pub digest: String,
    #[serde(default)]
    pub effects: Option<TransactionEffects>,
    #[serde(default)]
    pub object_changes: Vec<ObjectChange>,
    #[serde(default)]
    pub events: Vec<TransactionEvent>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl TransactionResult {
    /// Status reported in effects. A response without effects is treated as
    /// a failure, with any top-level RPC errors as the message.
    pub fn status(&self) -> ExecutionStatus {
        match &self.effects {
            Some(effects) => effects.status.clone(),
            None => ExecutionStatus::Failure {
                error: (!self.errors.is_empty()).then(|| self.errors.join("; ")),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status(), ExecutionStatus::Success)
    }

    /// The network's error string, or [`DEFAULT_FAILURE_MESSAGE`].
    pub fn failure_message(&self) -> Option<String> {
        match self.status() {
            ExecutionStatus::Success => None,
            ExecutionStatus::Failure { error } => Some(
                error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            ),
        }
    }

    pub fn gas_used(&self) -> Option<&GasUsed> {
        self.effects.as_ref().and_then(|e| e.gas_used.as_ref())
    }

    /// Sender as reported by the object changes, normalized.
    pub fn sender(&self) -> Option<String> {
        self.object_changes
            .iter()
            .find_map(ObjectChange::sender)
            .map(crate::address::normalize_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_response() {
        let result: TransactionResult = serde_json::from_value(json!({
            "digest": "9V3x",
            "effects": {
                "status": {"status": "success"},
                "gasUsed": {"computationCost": "1000", "storageCost": "200", "storageRebate": "50"}
            },
            "objectChanges": [],
            "events": [{"type": "0xaa::shop::PurchaseCompleted", "parsedJson": {"amount": "5"}}]
        }))
        .unwrap();
        assert!(result.is_success());
        assert_eq!(result.failure_message(), None);
        assert_eq!(result.gas_used().map(GasUsed::net), Some(1150));
        assert_eq!(result.events[0].event_type, "0xaa::shop::PurchaseCompleted");
    }

    #[test]
    fn test_failure_message_defaults() {
        let result: TransactionResult = serde_json::from_value(json!({
            "digest": "d",
            "effects": {"status": {"status": "failure", "error": "MoveAbort(.., 3)"}}
        }))
        .unwrap();
        assert_eq!(result.failure_message().as_deref(), Some("MoveAbort(.., 3)"));

        let result: TransactionResult = serde_json::from_value(json!({
            "digest": "d",
            "effects": {"status": {"status": "failure"}}
        }))
        .unwrap();
        assert_eq!(
            result.failure_message().as_deref(),
            Some(DEFAULT_FAILURE_MESSAGE)
        );

        let no_effects: TransactionResult =
            serde_json::from_value(json!({"digest": "d"})).unwrap();
        assert!(!no_effects.is_success());
    }

    #[test]
    fn test_sender_from_object_changes() {
        let result: TransactionResult = serde_json::from_value(json!({
            "digest": "d",
            "objectChanges": [
                {"type": "published", "packageId": "0xaa", "version": "1", "digest": "P"},
                {"type": "deleted", "sender": "0x5", "objectType": "0xaa::shop::DiscountTicket",
                 "objectId": "0xd1", "version": "4"}
            ]
        }))
        .unwrap();
        assert_eq!(result.sender(), Some(crate::normalize_address("0x5")));
        assert_eq!(
            serde_json::from_value::<TransactionResult>(json!({"digest": "d"}))
                .unwrap()
                .sender(),
            None
        );
    }
}
