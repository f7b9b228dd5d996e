//! Stale-version and locked-object failures.
//!
//! A submission can fail because one of its owned inputs (usually the gas
//! coin) was consumed or locked by another transaction between selection and
//! execution. Clients that can tell return [`ObjectContention`] directly;
//! otherwise [`detect_contention`] recognizes the validator error text, which
//! always names the offending object IDs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::address::normalize_id;

static OBJECT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0[xX][0-9a-fA-F]+").expect("static regex"));

static STALE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(not available for consumption|ObjectVersionUnavailableForConsumption|stale object|stale version|current version|object version mismatch)\b",
    )
    .expect("static regex")
});

static LOCKED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(locked|equivocat\w*|ObjectLockConflict|reserved for another transaction)\b",
    )
    .expect("static regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentionKind {
    /// The referenced version has already been consumed.
    StaleVersion,
    /// Another transaction holds a lock on the object.
    Locked,
}

impl fmt::Display for ContentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentionKind::StaleVersion => write!(f, "stale object version"),
            ContentionKind::Locked => write!(f, "locked object"),
        }
    }
}

/// Submission rejected because input objects were stale or locked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {}", .object_ids.join(", "))]
pub struct ObjectContention {
    pub kind: ContentionKind,
    /// Normalized IDs of the contended objects.
    pub object_ids: Vec<String>,
}

impl ObjectContention {
    pub fn new(kind: ContentionKind, object_ids: impl IntoIterator<Item = String>) -> Self {
        let mut ids = Vec::new();
        for id in object_ids {
            let id = normalize_id(&id);
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self {
            kind,
            object_ids: ids,
        }
    }
}

/// Every `0x…` token in `message`, normalized, first occurrence first.
///
/// ```
/// use sui_shop_types::contention::extract_object_ids;
///
/// let ids = extract_object_ids("Object 0xABC is locked (0xabc)");
/// assert_eq!(ids, vec!["0x0000000000000000000000000000000000000000000000000000000000000abc"]);
/// ```
pub fn extract_object_ids(message: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for m in OBJECT_ID_RE.find_iter(message) {
        let id = normalize_id(m.as_str());
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Recognize a stale/locked failure from its error text.
///
/// Both a contention keyword and at least one object ID must be present;
/// a message without IDs gives the caller nothing to exclude, so it is not
/// treated as contention.
pub fn detect_contention(message: &str) -> Option<ObjectContention> {
    let kind = if LOCKED_RE.is_match(message) {
        ContentionKind::Locked
    } else if STALE_RE.is_match(message) {
        ContentionKind::StaleVersion
    } else {
        return None;
    };
    let object_ids = extract_object_ids(message);
    if object_ids.is_empty() {
        return None;
    }
    Some(ObjectContention { kind, object_ids })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_unavailable_for_consumption() {
        let msg = "Transaction validator signing failed due to issues with transaction inputs:\n\
                   - Object ID 0xC0FFEE Version 0x5 Digest abc is not available for consumption, current version: 0x6";
        let c = detect_contention(msg).unwrap();
        assert_eq!(c.kind, ContentionKind::StaleVersion);
        assert_eq!(
            c.object_ids[0],
            "0x0000000000000000000000000000000000000000000000000000000000c0ffee"
        );
    }

    #[test]
    fn test_detects_locked_objects() {
        let msg = "Failed to sign transaction by a quorum of validators because one or more of its objects is equivocated until the next epoch. Locked objects: [(0xAbC, SequenceNumber(3), o#x)]";
        let c = detect_contention(msg).unwrap();
        assert_eq!(c.kind, ContentionKind::Locked);
        assert!(c
            .object_ids
            .contains(&"0x0000000000000000000000000000000000000000000000000000000000000abc".to_string()));
    }

    #[test]
    fn test_requires_object_id() {
        assert!(detect_contention("object is locked").is_none());
        assert!(detect_contention("MoveAbort in 0x2::coin with code 0x1").is_none());
        assert!(detect_contention("InsufficientGas").is_none());
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        assert!(detect_contention("Coin 0x5 is unlocked").is_none());
        assert!(detect_contention("Request for 0x5 blocked by rate limiter").is_none());
        assert!(detect_contention("Coin 0x5 has a stale versioning scheme").is_none());
        assert_eq!(
            detect_contention("ObjectLockConflict { obj_ref: (0x5, 2) }").unwrap().kind,
            ContentionKind::Locked
        );
        assert_eq!(
            detect_contention("Object 0x5 is locked by another transaction").unwrap().kind,
            ContentionKind::Locked
        );
    }

    #[test]
    fn test_new_dedupes_case_insensitively() {
        let c = ObjectContention::new(
            ContentionKind::Locked,
            vec!["0xABC".to_string(), "0xabc".to_string(), "0x1".to_string()],
        );
        assert_eq!(c.object_ids.len(), 2);
        assert!(c.to_string().starts_with("locked object: 0x"));
    }
}
