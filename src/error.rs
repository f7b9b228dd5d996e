use thiserror::Error;

/// Failure of [`crate::execute::sign_and_execute`].
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The sender owns no SUI coin outside the excluded set.
    #[error("insufficient gas: no SUI coin available for {owner} ({excluded} excluded)")]
    InsufficientGas { owner: String, excluded: usize },

    /// The transaction executed but its status is not success. Displays the
    /// network's error string as-is.
    #[error("{message}")]
    ExecutionFailed { digest: String, message: String },

    /// Signing, submission or any other RPC failure, including a stale gas
    /// failure that persisted after the retry.
    #[error(transparent)]
    Rpc(#[from] anyhow::Error),

    /// The transaction succeeded on-chain but the artifact file could not be
    /// updated. Run `sui-shop reconcile <digest>` to repair.
    #[error("transaction {digest} succeeded but artifacts were not updated")]
    Artifacts {
        digest: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl SubmitError {
    /// Digest of the executed transaction, when it got that far.
    pub fn digest(&self) -> Option<&str> {
        match self {
            SubmitError::ExecutionFailed { digest, .. } | SubmitError::Artifacts { digest, .. } => {
                Some(digest)
            }
            SubmitError::InsufficientGas { .. } | SubmitError::Rpc(_) => None,
        }
    }
}
