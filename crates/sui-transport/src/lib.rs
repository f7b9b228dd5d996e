//! Sui transport layer for the shop tooling.
//!
//! This crate provides:
//! - [`client`]: the [`ShopRpc`] trait and its JSON-RPC implementation
//! - [`intent`]: unsigned transaction intents and gas payments
//! - [`signer`]: keystore-backed transaction signing
//! - [`network`]: network names and fullnode endpoints
//!
//! # Example
//!
//! ```ignore
//! use sui_shop_transport::{KeystoreSigner, Network, SuiRpcClient};
//!
//! let url = sui_shop_transport::network::resolve_rpc_url(Network::Testnet, None);
//! let rpc = SuiRpcClient::connect(&url, Default::default()).await?;
//! let signer = KeystoreSigner::open(None, None)?;
//! ```

pub mod client;
pub mod intent;
pub mod network;
pub mod retry;
pub mod signer;

pub use client::{ShopRpc, SuiRpcClient};
pub use intent::{GasPayment, TransactionIntent};
pub use network::Network;
pub use signer::{KeystoreSigner, TransactionSigner};
