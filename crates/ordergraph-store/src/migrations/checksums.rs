use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a migration script
pub fn compute_checksum(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_stable_sha256_hex() {
        let a = compute_checksum("SELECT 1");
        assert_eq!(a.len(), 64);
        assert_eq!(a, compute_checksum("SELECT 1"));
        assert_ne!(a, compute_checksum("SELECT 2"));
    }
}
