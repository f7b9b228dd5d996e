//! Environment variable lookups for `SUI_SHOP_*` settings.
//!
//! Blank values count as unset so that `SUI_SHOP_RPC_URL= sui-shop ...`
//! falls back to the network default instead of an empty URL.

use std::path::PathBuf;

/// Overrides the fullnode URL derived from `--network`.
pub const RPC_URL_ENV: &str = "SUI_SHOP_RPC_URL";
/// Directory holding `objects.<network>.json` artifact files.
pub const ARTIFACT_DIR_ENV: &str = "SUI_SHOP_ARTIFACT_DIR";
/// Path to a Sui keystore file.
pub const KEYSTORE_ENV: &str = "SUI_SHOP_KEYSTORE";
/// Default gas budget in MIST.
pub const GAS_BUDGET_ENV: &str = "SUI_SHOP_GAS_BUDGET";

/// Non-empty, trimmed value of an environment variable.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Environment variable interpreted as a filesystem path.
pub fn env_path(key: &str) -> Option<PathBuf> {
    env_string(key).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_string_trims() {
        std::env::set_var("SUI_SHOP_TEST_URL", " http://127.0.0.1:9000 ");
        assert_eq!(
            env_string("SUI_SHOP_TEST_URL").as_deref(),
            Some("http://127.0.0.1:9000")
        );
        assert_eq!(env_string("SUI_SHOP_TEST_MISSING_1"), None);
        std::env::remove_var("SUI_SHOP_TEST_URL");
    }

    #[test]
    fn test_blank_is_unset() {
        std::env::set_var("SUI_SHOP_TEST_BLANK", "   ");
        assert_eq!(env_string("SUI_SHOP_TEST_BLANK"), None);
        assert_eq!(env_path("SUI_SHOP_TEST_BLANK"), None);
        std::env::remove_var("SUI_SHOP_TEST_BLANK");
    }

    #[test]
    fn test_env_path() {
        std::env::set_var("SUI_SHOP_TEST_PATH", " /tmp/artifacts ");
        assert_eq!(
            env_path("SUI_SHOP_TEST_PATH"),
            Some(PathBuf::from("/tmp/artifacts"))
        );
        std::env::remove_var("SUI_SHOP_TEST_PATH");
    }
}
