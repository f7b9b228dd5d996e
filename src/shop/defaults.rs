//! Resolve shop IDs from the artifact file when they are not given
//! explicitly.

use anyhow::{anyhow, Result};
use sui_shop_transport::Network;
use sui_shop_types::address::normalize_address_checked;

use super::queries::{OWNER_CAP_TYPE, SHOP_TYPE};
use crate::artifacts::ArtifactStore;

/// IDs a shop command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopIds {
    pub shop_id: String,
    pub package_id: String,
}

/// Canonical form of an ID given on the command line, rejecting anything
/// that is not 1 to 64 hex digits.
pub fn checked_id(flag: &str, value: &str) -> Result<String> {
    normalize_address_checked(value)
        .ok_or_else(|| anyhow!("invalid {} {:?}: expected up to 64 hex digits", flag, value))
}

/// Explicit IDs win; otherwise the latest live `shop::Shop` artifact
/// supplies both. An explicit shop ID without a package takes the package
/// from the matching artifact if there is one.
pub fn resolve_shop_ids(
    store: &ArtifactStore,
    network: Network,
    shop_id: Option<&str>,
    package_id: Option<&str>,
) -> Result<ShopIds> {
    let shop_id = shop_id.map(|id| checked_id("--shop-id", id)).transpose()?;
    let package_id = package_id
        .map(|id| checked_id("--package-id", id))
        .transpose()?;
    if let (Some(shop_id), Some(package_id)) = (&shop_id, &package_id) {
        return Ok(ShopIds {
            shop_id: shop_id.clone(),
            package_id: package_id.clone(),
        });
    }

    let artifacts = store.load(network)?;
    let shop = match &shop_id {
        Some(id) => artifacts
            .iter()
            .rev()
            .find(|a| a.is_type(SHOP_TYPE) && &a.identity_key() == id),
        None => artifacts
            .iter()
            .rev()
            .find(|a| a.is_live() && a.is_type(SHOP_TYPE)),
    };

    let shop_id = shop_id
        .or_else(|| shop.map(|a| a.object_id.clone()))
        .ok_or_else(|| {
            anyhow!(
                "no shop recorded in {}; pass --shop-id",
                store.path(network).display()
            )
        })?;
    let package_id = package_id
        .or_else(|| shop.map(|a| a.package_id.clone()))
        .ok_or_else(|| anyhow!("cannot infer package for shop {}; pass --package-id", shop_id))?;

    tracing::debug!(shop_id, package_id, "resolved shop ids");
    Ok(ShopIds {
        shop_id,
        package_id,
    })
}

/// Explicit owner cap, else the latest live `shop::ShopOwnerCap` artifact.
pub fn resolve_owner_cap(
    store: &ArtifactStore,
    network: Network,
    explicit: Option<&str>,
) -> Result<String> {
    if let Some(id) = explicit {
        return checked_id("--owner-cap-id", id);
    }
    store
        .latest_of_type(network, OWNER_CAP_TYPE)?
        .map(|a| a.object_id)
        .ok_or_else(|| {
            anyhow!(
                "no owner cap recorded in {}; pass --owner-cap-id",
                store.path(network).display()
            )
        })
}
