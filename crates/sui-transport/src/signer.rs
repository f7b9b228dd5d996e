//! Transaction signing.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use shared_crypto::intent::Intent;
use sui_config::{sui_config_dir, SUI_KEYSTORE_FILENAME};
use sui_keys::keystore::{AccountKeystore, FileBasedKeystore};
use sui_shop_types::env_utils::{env_path, KEYSTORE_ENV};
use sui_types::base_types::SuiAddress;
use sui_types::crypto::Signature;
use sui_types::transaction::TransactionData;

/// Signs transactions on behalf of one address.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Sender address, `0x`-prefixed.
    fn address(&self) -> String;

    async fn sign(&self, tx_data: &TransactionData) -> Result<Signature>;
}

/// Signer backed by a Sui CLI keystore file.
pub struct KeystoreSigner {
    keystore: FileBasedKeystore,
    address: SuiAddress,
}

impl KeystoreSigner {
    /// Open `path` (or the default keystore) and sign as `sender`, or as the
    /// keystore's first address when `sender` is `None`.
    pub fn open(path: Option<&Path>, sender: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_keystore_path()?,
        };
        let keystore = FileBasedKeystore::new(&path)
            .with_context(|| format!("open keystore {}", path.display()))?;

        let address = match sender {
            Some(s) => {
                let address = SuiAddress::from_str(s)
                    .map_err(|e| anyhow!("invalid sender address {}: {}", s, e))?;
                if !keystore.addresses().contains(&address) {
                    return Err(anyhow!(
                        "sender {} has no key in {}",
                        address,
                        path.display()
                    ));
                }
                address
            }
            None => *keystore
                .addresses()
                .first()
                .ok_or_else(|| anyhow!("keystore {} holds no keys", path.display()))?,
        };
        tracing::debug!(%address, keystore = %path.display(), "loaded signer");
        Ok(Self { keystore, address })
    }
}

/// `SUI_SHOP_KEYSTORE`, else the Sui CLI's `~/.sui/sui_config/sui.keystore`.
pub fn default_keystore_path() -> Result<PathBuf> {
    if let Some(path) = env_path(KEYSTORE_ENV) {
        return Ok(path);
    }
    Ok(sui_config_dir()?.join(SUI_KEYSTORE_FILENAME))
}

#[async_trait]
impl TransactionSigner for KeystoreSigner {
    fn address(&self) -> String {
        self.address.to_string()
    }

    async fn sign(&self, tx_data: &TransactionData) -> Result<Signature> {
        self.keystore
            .sign_secure(&self.address, tx_data, Intent::sui_transaction())
            .await
            .map_err(|e| anyhow!("sign transaction as {}: {}", self.address, e))
    }
}
