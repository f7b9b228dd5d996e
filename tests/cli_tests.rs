//! CLI smoke tests. None of these reach a fullnode.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn sui_shop() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("sui-shop").unwrap();
    cmd.env_remove("SUI_SHOP_ARTIFACT_DIR")
        .env_remove("SUI_SHOP_RPC_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn seed_artifacts(dir: &TempDir, network: &str) {
    let records = json!([
        {
            "objectId": "0x00000000000000000000000000000000000000000000000000000000000000a1",
            "objectType": "0xaa::shop::Shop",
            "owner": {"ownerType": "shared", "initialSharedVersion": 3},
            "packageId": "0x00000000000000000000000000000000000000000000000000000000000000aa",
            "signer": "0x0000000000000000000000000000000000000000000000000000000000000005",
            "initialSharedVersion": 3,
            "version": 3
        },
        {
            "objectId": "0x00000000000000000000000000000000000000000000000000000000000000d1",
            "objectType": "0xaa::shop::DiscountTicket",
            "owner": {"ownerType": "address", "address": "0x0000000000000000000000000000000000000000000000000000000000000005"},
            "packageId": "0x00000000000000000000000000000000000000000000000000000000000000aa",
            "signer": "0x0000000000000000000000000000000000000000000000000000000000000005",
            "deletedAt": "2026-01-31T09:15:00.000Z"
        }
    ]);
    std::fs::write(
        dir.path().join(format!("objects.{}.json", network)),
        serde_json::to_string_pretty(&records).unwrap(),
    )
    .unwrap();
}

#[test]
fn test_help_lists_subcommands() {
    sui_shop()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add-listing"))
        .stdout(predicate::str::contains("register-currency"))
        .stdout(predicate::str::contains("reconcile"));
}

#[test]
fn test_objects_with_empty_artifact_dir() {
    let dir = TempDir::new().unwrap();
    sui_shop()
        .arg("--artifact-dir")
        .arg(dir.path())
        .arg("objects")
        .assert()
        .success()
        .stdout(predicate::str::contains("No objects recorded"));
}

#[test]
fn test_objects_json_hides_deleted_by_default() {
    let dir = TempDir::new().unwrap();
    seed_artifacts(&dir, "testnet");

    let output = sui_shop()
        .args(["--network", "testnet", "--json", "--artifact-dir"])
        .arg(dir.path())
        .arg("objects")
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["objectType"], "0xaa::shop::Shop");

    let output = sui_shop()
        .args(["--network", "testnet", "--json", "--artifact-dir"])
        .arg(dir.path())
        .args(["objects", "--all", "--type", "shop::DiscountTicket"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[test]
fn test_network_inferred_from_rpc_url() {
    let dir = TempDir::new().unwrap();
    seed_artifacts(&dir, "testnet");

    sui_shop()
        .args(["--rpc-url", "https://fullnode.testnet.sui.io:443", "--artifact-dir"])
        .arg(dir.path())
        .arg("objects")
        .assert()
        .success()
        .stdout(predicate::str::contains("objects.testnet.json"));
}

#[test]
fn test_malformed_artifact_file_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("objects.localnet.json"), "{not json").unwrap();

    sui_shop()
        .arg("--artifact-dir")
        .arg(dir.path())
        .arg("objects")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("objects.localnet.json"));
}

#[test]
fn test_listings_without_shop_asks_for_id() {
    let dir = TempDir::new().unwrap();
    sui_shop()
        .arg("--artifact-dir")
        .arg(dir.path())
        .arg("listings")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--shop-id"));
}

#[test]
fn test_buy_requires_a_payment() {
    sui_shop()
        .args(["buy", "--listing-id", "0xb1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--amount"));
}

#[test]
fn test_gas_budget_read_from_environment() {
    let dir = TempDir::new().unwrap();
    sui_shop()
        .env("SUI_SHOP_GAS_BUDGET", "lots")
        .arg("--artifact-dir")
        .arg(dir.path())
        .arg("objects")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--gas-budget"));
}
