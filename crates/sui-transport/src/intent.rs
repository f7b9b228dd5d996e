//! Unsigned transaction descriptions handed to the submission helper.

use std::str::FromStr;

use anyhow::{Context, Result};
use sui_shop_types::ObjectRef;
use sui_types::base_types::{ObjectDigest, ObjectID, SequenceNumber};
use sui_types::transaction::ProgrammableTransaction;

/// The SUI coin that pays for a submission.
pub type GasPayment = ObjectRef;

/// Default gas budget in MIST (0.1 SUI).
pub const DEFAULT_GAS_BUDGET: u64 = 100_000_000;

/// One programmable transaction plus its gas settings.
///
/// The gas payment is optional; the submission helper fills it in from the
/// sender's coins when absent and replaces it when retrying after a stale
/// gas failure.
#[derive(Debug, Clone)]
pub struct TransactionIntent {
    pub programmable: ProgrammableTransaction,
    pub gas_budget: u64,
    pub gas_payment: Option<GasPayment>,
}

impl TransactionIntent {
    pub fn new(programmable: ProgrammableTransaction) -> Self {
        Self {
            programmable,
            gas_budget: DEFAULT_GAS_BUDGET,
            gas_payment: None,
        }
    }

    pub fn with_gas_budget(mut self, gas_budget: u64) -> Self {
        self.gas_budget = gas_budget;
        self
    }

    pub fn with_gas_payment(mut self, payment: GasPayment) -> Self {
        self.gas_payment = Some(payment);
        self
    }
}

/// Convert a gas payment into the SDK's `(id, version, digest)` tuple.
pub fn to_sdk_object_ref(payment: &GasPayment) -> Result<sui_types::base_types::ObjectRef> {
    let id = ObjectID::from_str(&payment.object_id)
        .with_context(|| format!("invalid gas coin id {}", payment.object_id))?;
    let digest = ObjectDigest::from_str(&payment.digest)
        .with_context(|| format!("invalid gas coin digest {}", payment.digest))?;
    Ok((id, SequenceNumber::from_u64(payment.version), digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sui_types::programmable_transaction_builder::ProgrammableTransactionBuilder;

    #[test]
    fn test_builder_defaults() {
        let intent = TransactionIntent::new(ProgrammableTransactionBuilder::new().finish());
        assert_eq!(intent.gas_budget, DEFAULT_GAS_BUDGET);
        assert!(intent.gas_payment.is_none());

        let intent = intent.with_gas_budget(5);
        assert_eq!(intent.gas_budget, 5);
    }

    #[test]
    fn test_to_sdk_object_ref_rejects_bad_digest() {
        let payment = GasPayment {
            object_id: "0x1".to_string(),
            version: 3,
            digest: "not base58 !!".to_string(),
        };
        assert!(to_sdk_object_ref(&payment).is_err());
    }
}
