//! Access-code hashing and membership checks.
//!
//! Administrators configure plaintext codes through the `CODE` environment
//! variable. Only their SHA-256 digests are kept; inbound `access-code`
//! headers are hashed the same way and compared against the set.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Header carrying the plaintext access code from the browser.
pub const ACCESS_CODE_HEADER: &str = "access-code";

/// Hashes an access code after trimming surrounding ASCII whitespace.
///
/// Works on raw bytes so header values outside visible ASCII (e.g. UTF-8
/// codes) hash the same as the configured text. Returns 64 lowercase hex
/// characters.
pub fn hash_code(code: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(code.as_ref().trim_ascii()))
}

/// Set of accepted access-code hashes.
///
/// An empty set means no code is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessCodeSet {
    hashes: HashSet<String>,
}

impl AccessCodeSet {
    /// Builds the set from a comma separated list of plaintext codes.
    ///
    /// Entries that are blank after trimming are skipped, so `"a,,b, "`
    /// yields two codes rather than admitting the empty code.
    pub fn from_list(list: &str) -> Self {
        Self::from_codes(list.split(','))
    }

    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hashes = codes
            .into_iter()
            .filter(|code| !code.as_ref().as_bytes().trim_ascii().is_empty())
            .map(|code| hash_code(code.as_ref()))
            .collect();

        Self { hashes }
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn contains_hash(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    /// Checks a presented code. A missing header is treated as the empty code.
    pub fn verify(&self, presented: Option<&[u8]>) -> bool {
        self.contains_hash(&hash_code(presented.unwrap_or_default()))
    }
}
