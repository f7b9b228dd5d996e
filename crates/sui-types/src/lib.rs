//! Shared types for the sui-shop workspace.
//!
//! This crate holds the data shapes that cross crate boundaries: normalized
//! IDs, owners, object changes and transaction results as returned by the
//! JSON-RPC, and the persisted [`ObjectArtifact`] records. It has no network
//! or filesystem dependencies.
//!
//! ## Response shapes
//!
//! RPC responses are modeled as serde enums ([`Owner`], [`ObjectChange`],
//! [`MoveValue`]) so consumers match exhaustively instead of probing JSON
//! keys. Unknown object-change kinds parse as [`ObjectChange::Unknown`].

pub mod address;
pub mod artifact;
pub mod contention;
pub mod env_utils;
pub mod move_value;
pub mod object;
pub mod object_change;
pub mod owner;
mod serde_helpers;
pub mod transaction;
pub mod type_parsing;

pub use address::{ids_equal, normalize_address, normalize_id};
pub use artifact::ObjectArtifact;
pub use contention::{detect_contention, ContentionKind, ObjectContention};
pub use move_value::MoveValue;
pub use object::{CoinInfo, DynamicFieldInfo, ObjectContent, ObjectData, ObjectRef, Page};
pub use object_change::{classify, ClassifiedChanges, ObjectChange};
pub use owner::{Owner, OwnerDescription};
pub use transaction::{ExecutionStatus, RequestType, TransactionResult, DEFAULT_FAILURE_MESSAGE};

use std::time::Duration;

/// Configuration for retry behavior on read-only network operations.
#[derive(Debug, Copy, Clone)]
pub struct RetryConfig {
    /// Number of retry attempts.
    pub retries: usize,
    /// Initial backoff duration between retries.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
}

impl RetryConfig {
    /// Create a new RetryConfig with the specified parameters.
    pub fn new(retries: usize, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            retries,
            initial_backoff: Duration::from_millis(initial_backoff_ms),
            max_backoff: Duration::from_millis(max_backoff_ms),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 4,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_millis(5000),
        }
    }
}
