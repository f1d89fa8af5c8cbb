//! Cache key generation using SHA-256 hashes

use sha2::{Digest, Sha256};

/// Generate a deterministic cache key for a search.
///
/// The key is a SHA-256 hash of the keyword, location and API key, so cached
/// results are scoped to the credential that paid for them. Each field is
/// length-prefixed; `("ab", "c")` and `("a", "bc")` never share a key.
pub fn cache_key(keyword: &str, location: &str, api_key: &str) -> String {
    let mut hasher = Sha256::new();

    for field in [keyword, location, api_key] {
        hasher.update((field.len() as u64).to_be_bytes());
        hasher.update(field.as_bytes());
    }

    format!("{:x}", hasher.finalize())
}
