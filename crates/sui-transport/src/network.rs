use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use sui_shop_types::env_utils::{env_string, RPC_URL_ENV};

const LOCALNET_RPC: &str = "http://127.0.0.1:9000";
const DEVNET_RPC: &str = "https://fullnode.devnet.sui.io:443";
const TESTNET_RPC: &str = "https://fullnode.testnet.sui.io:443";
const MAINNET_RPC: &str = "https://fullnode.mainnet.sui.io:443";

/// A Sui network. Also the suffix of the artifact file (`objects.<network>.json`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    #[default]
    Localnet,
    Devnet,
    Testnet,
    Mainnet,
}

impl Network {
    pub const ALL: [Network; 4] = [
        Network::Localnet,
        Network::Devnet,
        Network::Testnet,
        Network::Mainnet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Localnet => "localnet",
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Localnet => LOCALNET_RPC,
            Network::Devnet => DEVNET_RPC,
            Network::Testnet => TESTNET_RPC,
            Network::Mainnet => MAINNET_RPC,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        if name == "local" {
            return Ok(Network::Localnet);
        }
        Network::ALL
            .into_iter()
            .find(|n| n.as_str() == name)
            .ok_or_else(|| {
                anyhow!(
                    "unknown network '{}' (expected one of {})",
                    name,
                    Network::ALL.map(|n| n.as_str()).join(", ")
                )
            })
    }
}

pub fn infer_network_from_url(url: &str) -> Option<Network> {
    let lower = url.to_lowercase();
    if lower.contains("testnet") {
        Some(Network::Testnet)
    } else if lower.contains("devnet") {
        Some(Network::Devnet)
    } else if lower.contains("mainnet") {
        Some(Network::Mainnet)
    } else if lower.contains("127.0.0.1") || lower.contains("localhost") {
        Some(Network::Localnet)
    } else {
        None
    }
}

/// RPC URL for `network`: an explicit URL wins, then `SUI_SHOP_RPC_URL`,
/// then the network's public fullnode.
pub fn resolve_rpc_url(network: Network, explicit: Option<&str>) -> String {
    if let Some(url) = explicit.map(str::trim).filter(|u| !u.is_empty()) {
        return url.to_string();
    }
    env_string(RPC_URL_ENV).unwrap_or_else(|| network.default_rpc_url().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for network in Network::ALL {
            assert_eq!(network.as_str().parse::<Network>().unwrap(), network);
        }
        assert_eq!("TESTNET".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("local".parse::<Network>().unwrap(), Network::Localnet);
        let err = "betanet".parse::<Network>().unwrap_err();
        assert!(err.to_string().contains("localnet, devnet, testnet, mainnet"));
    }

    #[test]
    fn test_infer_network_from_url() {
        assert_eq!(
            infer_network_from_url("https://fullnode.testnet.sui.io:443"),
            Some(Network::Testnet)
        );
        assert_eq!(
            infer_network_from_url("http://localhost:9000"),
            Some(Network::Localnet)
        );
        assert_eq!(infer_network_from_url("https://rpc.example.com"), None);
    }

    #[test]
    fn test_explicit_url_wins() {
        assert_eq!(
            resolve_rpc_url(Network::Mainnet, Some(" http://10.0.0.1:9000 ")),
            "http://10.0.0.1:9000"
        );
    }
}
