#![allow(dead_code)]
//! Shared test utilities for integration tests.
//!
//! - `fixtures`: JSON-shaped coins, objects and transaction responses
//! - `mocks`: in-memory `ShopRpc` and signer

pub mod fixtures;
pub mod mocks;

pub use mocks::{MockRpc, MockSigner};
