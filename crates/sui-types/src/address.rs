//! Address and object ID normalization.
//!
//! Every ID that ends up in an artifact file or is compared against one goes
//! through [`normalize_id`]. Sui reports the same 32-byte value in several
//! spellings:
//! - Short form: "0x2"
//! - Full form: "0x0000000000000000000000000000000000000000000000000000000000000002"
//! - Without prefix (e.g. inside `std::type_name` strings): "2"
//! - Mixed case in error messages: "0xABC"
//!
//! Artifacts must hold byte-identical IDs across runs, so everything is
//! folded to the lowercase, zero-padded, `0x`-prefixed form.

use move_core_types::account_address::AccountAddress;

/// The Sui framework package (`0x2`).
pub const SUI_FRAMEWORK_ADDRESS: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000002";

/// Normalize an address to lowercase with 0x prefix and full 64 hex characters.
///
/// # Examples
///
/// ```
/// use sui_shop_types::address::normalize_address;
///
/// assert_eq!(
///     normalize_address("0x2"),
///     "0x0000000000000000000000000000000000000000000000000000000000000002"
/// );
/// assert_eq!(
///     normalize_address("ABC"),
///     "0x0000000000000000000000000000000000000000000000000000000000000abc"
/// );
/// ```
pub fn normalize_address(addr: &str) -> String {
    let addr = addr.trim();
    let hex = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr)
        .to_lowercase();
    if hex.len() < 64 {
        format!("0x{:0>64}", hex)
    } else {
        // Over-long input is kept whole and never matches a valid ID.
        format!("0x{}", hex)
    }
}

/// Normalize an address, returning None if it's not a valid hex address.
///
/// ```
/// use sui_shop_types::address::normalize_address_checked;
///
/// assert!(normalize_address_checked("0x2").is_some());
/// assert_eq!(normalize_address_checked("not-hex"), None);
/// ```
pub fn normalize_address_checked(addr: &str) -> Option<String> {
    let trimmed = addr.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if hex.is_empty() || hex.len() > 64 {
        return None;
    }
    let normalized = normalize_address(trimmed);
    AccountAddress::from_hex_literal(&normalized).ok()?;
    Some(normalized)
}

/// Normalize an address to short form (minimal hex digits), for display.
///
/// ```
/// use sui_shop_types::address::normalize_address_short;
///
/// assert_eq!(normalize_address_short("0x0000000000000000000000000000000000000000000000000000000000000002"), "0x2");
/// assert_eq!(normalize_address_short("0x00abc"), "0xabc");
/// ```
pub fn normalize_address_short(addr: &str) -> String {
    let normalized = normalize_address(addr);
    let hex = normalized.strip_prefix("0x").unwrap_or(&normalized);
    let trimmed = hex.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", trimmed)
    }
}

/// Check if an address is the Sui framework package (0x2).
pub fn is_sui_framework(addr: &str) -> bool {
    normalize_address(addr) == SUI_FRAMEWORK_ADDRESS
}

/// Normalize an object/package ID to canonical format (64 hex chars with 0x prefix).
///
/// IDs and addresses are the same 32-byte hex values; this alias exists so
/// call sites dealing with objects read naturally.
#[inline]
pub fn normalize_id(id: &str) -> String {
    normalize_address(id)
}

/// Normalize an object/package ID to short form (minimal hex digits).
#[inline]
pub fn normalize_id_short(id: &str) -> String {
    normalize_address_short(id)
}

/// Compare two IDs irrespective of case, padding, or prefix.
pub fn ids_equal(a: &str, b: &str) -> bool {
    normalize_id(a) == normalize_id(b)
}
