//! SHA-256 content digest for migration script pairs.

use sha2::{Digest, Sha256};

/// Compute the digest recorded in the ledger for an (up, down) script pair.
///
/// Each part is length-prefixed so two pairs that concatenate to the same
/// text still produce different digests.
pub fn script_checksum(up: &str, down: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update((up.len() as u64).to_be_bytes());
    hasher.update(up.as_bytes());
    hasher.update((down.len() as u64).to_be_bytes());
    hasher.update(down.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
#[path = "checksum_test.rs"]
mod tests;
