//! Sui Shop tooling
//!
//! Helpers for driving the on-chain shop package from scripts and the
//! `sui-shop` CLI:
//!
//! - **Submission**: sign and execute a transaction, retrying once with a
//!   fresh gas coin when the first coin is stale or locked
//! - **Artifacts**: keep `<dir>/objects.<network>.json` in step with every
//!   transaction's object changes
//! - **Shop**: decode shop objects, query listings and discounts, and build
//!   the shop's entry-function transactions
//!
//! See [`execute::sign_and_execute`] for the submission flow.

#![allow(clippy::result_large_err)]
#![allow(clippy::too_many_arguments)]

pub mod artifacts;
pub mod error;
pub mod execute;
pub mod gas;
pub mod shop;
pub mod utils;

pub use artifacts::{ArtifactDiff, ArtifactStore};
pub use error::SubmitError;
pub use execute::{sign_and_execute, ExecuteConfig, ExecutionOutcome};
pub use gas::select_gas_coin;
