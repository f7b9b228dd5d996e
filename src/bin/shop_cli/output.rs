//! Output formatting for sui-shop
//!
//! Human-readable tables on stdout, or pretty JSON with `--json`.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use sui_shop::ExecutionOutcome;
use sui_shop_types::address::normalize_id_short;
use sui_shop_types::type_parsing::parse_struct_type;
use sui_shop_types::ObjectArtifact;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `0x2::sui::SUI` style rendering of a type, falling back to the raw string.
pub fn short_type(type_str: &str) -> String {
    match parse_struct_type(type_str) {
        Some(t) => format!("{}::{}", normalize_id_short(&t.address), t.module_and_name()),
        None => type_str.to_string(),
    }
}

pub fn artifact_status(artifact: &ObjectArtifact) -> String {
    if let Some(at) = &artifact.deleted_at {
        format!("deleted {}", at)
    } else if let Some(at) = &artifact.wrapped_at {
        format!("wrapped {}", at)
    } else {
        "live".to_string()
    }
}

pub fn print_artifacts(artifacts: &[ObjectArtifact]) {
    for artifact in artifacts {
        println!(
            "  \x1b[36m{}\x1b[0m  {}  [{}]",
            artifact.object_id,
            short_type(&artifact.object_type),
            artifact_status(artifact)
        );
    }
}

pub fn print_outcome(outcome: &ExecutionOutcome, artifact_path: &Path, json: bool) -> Result<()> {
    if json {
        return print_json(outcome);
    }
    let result = &outcome.transaction_result;
    println!("\x1b[32m✓ Transaction executed\x1b[0m {}", result.digest);
    if outcome.attempts > 1 {
        println!("  (retried with a fresh gas coin)");
    }
    if let Some(gas) = result.gas_used() {
        println!(
            "Gas: {} MIST net ({} computation, {} storage, {} rebate)",
            gas.net(),
            gas.computation_cost,
            gas.storage_cost,
            gas.storage_rebate
        );
    }

    let diff = &outcome.object_artifacts;
    if diff.is_empty() {
        return Ok(());
    }
    println!(
        "\n\x1b[1mArtifacts\x1b[0m ({}, {} change(s)):",
        artifact_path.display(),
        diff.len()
    );
    for (label, artifacts) in [
        ("created", &diff.created),
        ("updated", &diff.updated),
        ("deleted", &diff.deleted),
        ("wrapped", &diff.wrapped),
    ] {
        if !artifacts.is_empty() {
            println!(" {}:", label);
            print_artifacts(artifacts);
        }
    }
    Ok(())
}
