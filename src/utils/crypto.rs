//! Cryptographic utilities

use sha2::{Digest, Sha256};

/// Hash bytes using SHA-256, used to log a fingerprint of submitted source
/// code without logging the code itself.
pub fn hash_bytes(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    let result = hasher.finalize();
    hex::encode(result)
}
