//! Per-network artifact files and their reconciliation against object changes.
//!
//! Each network has one JSON array at `<dir>/objects.<network>.json`. Every
//! write replaces the whole array through a temporary file and a rename, so
//! readers never observe a half-written file. There is no cross-process
//! locking: two concurrent invocations against the same network can lose
//! each other's updates.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use futures::future::try_join_all;
use serde::Serialize;
use sui_shop_transport::{Network, ShopRpc};
use sui_shop_types::env_utils::{env_path, ARTIFACT_DIR_ENV};
use sui_shop_types::object_change::{CreatedChange, RemovedChange, UpdatedChange};
use sui_shop_types::{normalize_id, ClassifiedChanges, ObjectArtifact};

use crate::utils::now_iso8601;

/// Artifact directory used when neither a flag nor `SUI_SHOP_ARTIFACT_DIR` is set.
pub const DEFAULT_ARTIFACT_DIR: &str = "deployments";

/// Artifacts touched by one reconciliation, by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDiff {
    pub created: Vec<ObjectArtifact>,
    pub updated: Vec<ObjectArtifact>,
    pub deleted: Vec<ObjectArtifact>,
    pub wrapped: Vec<ObjectArtifact>,
}

impl ArtifactDiff {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.updated.is_empty()
            && self.deleted.is_empty()
            && self.wrapped.is_empty()
    }

    pub fn len(&self) -> usize {
        self.created.len() + self.updated.len() + self.deleted.len() + self.wrapped.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `explicit`, else `SUI_SHOP_ARTIFACT_DIR`, else `./deployments`.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        let dir = explicit
            .map(Path::to_path_buf)
            .or_else(|| env_path(ARTIFACT_DIR_ENV))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_DIR));
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, network: Network) -> PathBuf {
        self.dir.join(format!("objects.{}.json", network))
    }

    /// All artifacts for `network`; empty when the file does not exist yet.
    pub fn load(&self, network: Network) -> Result<Vec<ObjectArtifact>> {
        let path = self.path(network);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
    }

    /// Replace the whole artifact list for `network`.
    pub fn write(&self, network: Network, artifacts: &[ObjectArtifact]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create artifact dir {}", self.dir.display()))?;
        let path = self.path(network);
        let tmp = path.with_extension("json.tmp");
        let mut json = serde_json::to_string_pretty(artifacts).context("serialize artifacts")?;
        json.push('\n');
        fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
        tracing::debug!(path = %path.display(), count = artifacts.len(), "wrote artifacts");
        Ok(())
    }

    /// Most recently recorded live artifact whose type is `module::name`.
    pub fn latest_of_type(
        &self,
        network: Network,
        module_and_name: &str,
    ) -> Result<Option<ObjectArtifact>> {
        Ok(self
            .load(network)?
            .into_iter()
            .rev()
            .find(|a| a.is_live() && a.is_type(module_and_name)))
    }
}

/// Append `new` artifacts whose identity is not already present. Returns
/// the artifacts actually appended.
pub fn merge_created(
    artifacts: &mut Vec<ObjectArtifact>,
    new: Vec<ObjectArtifact>,
) -> Vec<ObjectArtifact> {
    let mut known: BTreeSet<String> = artifacts.iter().map(ObjectArtifact::identity_key).collect();
    let mut appended = Vec::new();
    for artifact in new {
        if known.insert(artifact.identity_key()) {
            artifacts.push(artifact.clone());
            appended.push(artifact);
        } else {
            tracing::debug!(object_id = %artifact.object_id, "artifact already recorded");
        }
    }
    appended
}

fn index_by_identity(artifacts: &[ObjectArtifact]) -> HashMap<String, usize> {
    artifacts
        .iter()
        .enumerate()
        .map(|(i, a)| (a.identity_key(), i))
        .collect()
}

/// Replace owner, version and digest of artifacts matching `updates`.
/// Returns the artifacts that changed.
pub fn apply_updates<'a>(
    artifacts: &mut [ObjectArtifact],
    updates: impl IntoIterator<Item = &'a UpdatedChange>,
) -> Vec<ObjectArtifact> {
    let index = index_by_identity(artifacts);
    let mut changed: Vec<usize> = Vec::new();
    for update in updates {
        let Some(&i) = index.get(&normalize_id(&update.object_id)) else {
            continue;
        };
        let artifact = &mut artifacts[i];
        let owner = update.owner.describe();
        let version = Some(update.version);
        let digest = Some(update.digest.clone());
        if artifact.owner != owner || artifact.version != version || artifact.digest != digest {
            artifact.owner = owner;
            artifact.version = version;
            artifact.digest = digest;
            if !changed.contains(&i) {
                changed.push(i);
            }
        }
    }
    changed.into_iter().map(|i| artifacts[i].clone()).collect()
}

/// Stamp `deletedAt = now` on matching artifacts, overwriting any earlier stamp.
pub fn stamp_deleted(
    artifacts: &mut [ObjectArtifact],
    deleted: &[RemovedChange],
    now: &str,
) -> Vec<ObjectArtifact> {
    let index = index_by_identity(artifacts);
    let mut matched: Vec<usize> = Vec::new();
    for change in deleted {
        if let Some(&i) = index.get(&normalize_id(&change.object_id)) {
            artifacts[i].deleted_at = Some(now.to_string());
            if !matched.contains(&i) {
                matched.push(i);
            }
        }
    }
    matched.into_iter().map(|i| artifacts[i].clone()).collect()
}

/// Stamp `wrappedAt = now` on matching artifacts that have no stamp yet.
pub fn stamp_wrapped(
    artifacts: &mut [ObjectArtifact],
    wrapped: &[RemovedChange],
    now: &str,
) -> Vec<ObjectArtifact> {
    let index = index_by_identity(artifacts);
    let mut stamped: Vec<usize> = Vec::new();
    for change in wrapped {
        if let Some(&i) = index.get(&normalize_id(&change.object_id)) {
            if artifacts[i].wrapped_at.is_none() {
                artifacts[i].wrapped_at = Some(now.to_string());
                stamped.push(i);
            }
        }
    }
    stamped.into_iter().map(|i| artifacts[i].clone()).collect()
}

/// Fetch every created object concurrently and build its artifact.
pub async fn build_created_artifacts(
    rpc: &dyn ShopRpc,
    created: &[CreatedChange],
    signer: &str,
) -> Result<Vec<ObjectArtifact>> {
    let objects = try_join_all(created.iter().map(|change| async move {
        rpc.get_object(&change.object_id)
            .await
            .with_context(|| format!("fetch created object {}", change.object_id))
    }))
    .await?;

    created
        .iter()
        .zip(objects.iter())
        .map(|(change, object)| {
            ObjectArtifact::from_created(change, object, signer).ok_or_else(|| {
                anyhow!(
                    "cannot derive package id from type {} of {}",
                    change.object_type,
                    change.object_id
                )
            })
        })
        .collect()
}

/// Reconcile the artifact file for `network` with `changes`, stamping with
/// the current time.
pub async fn reconcile(
    rpc: &dyn ShopRpc,
    store: &ArtifactStore,
    network: Network,
    changes: &ClassifiedChanges,
    signer: &str,
) -> Result<ArtifactDiff> {
    reconcile_at(rpc, store, network, changes, signer, &now_iso8601()).await
}

/// As [`reconcile`], with an explicit timestamp for `deletedAt` / `wrappedAt`.
///
/// Categories are processed in order created, updated, deleted, wrapped.
/// Each loads the current file and rewrites it only when something changed.
pub async fn reconcile_at(
    rpc: &dyn ShopRpc,
    store: &ArtifactStore,
    network: Network,
    changes: &ClassifiedChanges,
    signer: &str,
    now: &str,
) -> Result<ArtifactDiff> {
    let mut diff = ArtifactDiff::default();

    if !changes.created.is_empty() {
        let built = build_created_artifacts(rpc, &changes.created, signer).await?;
        let mut artifacts = store.load(network)?;
        diff.created = merge_created(&mut artifacts, built);
        if !diff.created.is_empty() {
            store.write(network, &artifacts)?;
        }
    }

    let updates: Vec<&UpdatedChange> = changes.updated().collect();
    if !updates.is_empty() {
        let mut artifacts = store.load(network)?;
        diff.updated = apply_updates(&mut artifacts, updates);
        if !diff.updated.is_empty() {
            store.write(network, &artifacts)?;
        }
    }

    if !changes.deleted.is_empty() {
        let mut artifacts = store.load(network)?;
        diff.deleted = stamp_deleted(&mut artifacts, &changes.deleted, now);
        if !diff.deleted.is_empty() {
            store.write(network, &artifacts)?;
        }
    }

    if !changes.wrapped.is_empty() {
        let mut artifacts = store.load(network)?;
        diff.wrapped = stamp_wrapped(&mut artifacts, &changes.wrapped, now);
        if !diff.wrapped.is_empty() {
            store.write(network, &artifacts)?;
        }
    }

    tracing::info!(
        network = %network,
        created = diff.created.len(),
        updated = diff.updated.len(),
        deleted = diff.deleted.len(),
        wrapped = diff.wrapped.len(),
        "reconciled artifacts"
    );
    Ok(diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use sui_shop_types::{Owner, OwnerDescription};

    fn artifact(id: &str) -> ObjectArtifact {
        ObjectArtifact {
            object_id: normalize_id(id),
            object_type: "0xaa::shop::ItemListing".to_string(),
            owner: OwnerDescription::Address {
                address: normalize_id("0x5"),
            },
            package_id: normalize_id("0xaa"),
            signer: normalize_id("0x5"),
            initial_shared_version: None,
            version: Some(1),
            digest: Some("d1".to_string()),
            dynamic_field_id: None,
            deleted_at: None,
            wrapped_at: None,
            extra: BTreeMap::new(),
        }
    }

    fn removed(id: &str) -> RemovedChange {
        RemovedChange {
            object_id: id.to_string(),
            object_type: "0xaa::shop::ItemListing".to_string(),
            version: 2,
        }
    }

    #[test]
    fn test_store_load_missing_and_write_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("nested"));
        assert!(store.load(Network::Testnet).unwrap().is_empty());

        let list = vec![artifact("0xb1"), artifact("0xb2")];
        store.write(Network::Testnet, &list).unwrap();
        assert_eq!(
            store.path(Network::Testnet).file_name().unwrap(),
            "objects.testnet.json"
        );
        assert_eq!(store.load(Network::Testnet).unwrap(), list);
        assert!(store.load(Network::Mainnet).unwrap().is_empty());
        assert!(!dir.path().join("nested/objects.testnet.json.tmp").exists());
    }

    #[test]
    fn test_store_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        fs::write(store.path(Network::Devnet), "{not json").unwrap();
        let err = store.load(Network::Devnet).unwrap_err();
        assert!(format!("{:#}", err).contains("objects.devnet.json"));
    }

    #[test]
    fn test_latest_of_type_skips_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let mut old = artifact("0xa1");
        old.object_type = "0xaa::shop::Shop".into();
        let mut gone = artifact("0xa2");
        gone.object_type = "0xaa::shop::Shop".into();
        gone.deleted_at = Some("2026-01-01T00:00:00.000Z".into());
        store
            .write(Network::Localnet, &[old.clone(), artifact("0xb1"), gone])
            .unwrap();
        let found = store
            .latest_of_type(Network::Localnet, "shop::Shop")
            .unwrap()
            .unwrap();
        assert_eq!(found.object_id, old.object_id);
    }

    #[test]
    fn test_merge_created_dedupes_by_identity() {
        let mut list = vec![artifact("0xb1")];
        let appended = merge_created(
            &mut list,
            vec![artifact("0xB1"), artifact("0xb2"), artifact("0xb2")],
        );
        assert_eq!(appended.len(), 1);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_apply_updates_only_reports_real_changes() {
        let mut list = vec![artifact("0xb1"), artifact("0xb2")];
        let same = UpdatedChange {
            object_id: "0xb1".into(),
            object_type: "0xaa::shop::ItemListing".into(),
            owner: Owner::AddressOwner("0x5".into()),
            version: 1,
            digest: "d1".into(),
        };
        assert!(apply_updates(&mut list, [&same]).is_empty());

        let moved = UpdatedChange {
            owner: Owner::AddressOwner("0x9".into()),
            version: 7,
            digest: "d7".into(),
            ..same
        };
        let changed = apply_updates(&mut list, [&moved]);
        assert_eq!(changed.len(), 1);
        assert_eq!(list[0].version, Some(7));
        assert_eq!(
            list[0].owner,
            OwnerDescription::Address {
                address: normalize_id("0x9")
            }
        );
        assert_eq!(list[1], artifact("0xb2"));
    }

    #[test]
    fn test_delete_overwrites_and_wrap_is_idempotent() {
        let mut list = vec![artifact("0xb1")];
        stamp_deleted(&mut list, &[removed("0xb1")], "T1");
        stamp_deleted(&mut list, &[removed("0xb1")], "T2");
        assert_eq!(list[0].deleted_at.as_deref(), Some("T2"));

        let first = stamp_wrapped(&mut list, &[removed("0xB1")], "W1");
        let second = stamp_wrapped(&mut list, &[removed("0xb1")], "W2");
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(list[0].wrapped_at.as_deref(), Some("W1"));
    }

    #[test]
    fn test_dynamic_field_artifacts_match_on_field_id() {
        let mut wrapped = artifact("0xb1");
        wrapped.dynamic_field_id = Some(normalize_id("0xf1"));
        let mut list = vec![wrapped];
        assert!(stamp_deleted(&mut list, &[removed("0xb1")], "T").is_empty());
        assert_eq!(stamp_deleted(&mut list, &[removed("0xf1")], "T").len(), 1);
    }
}
