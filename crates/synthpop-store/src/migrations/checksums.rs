//! Migration checksum computation

use sha2::{Digest, Sha256};

/// Compute the SHA-256 checksum of migration SQL, hex-encoded
pub fn compute_checksum(sql: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sql.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksums_are_stable() {
        let a = compute_checksum("CREATE TABLE t (x INTEGER)");
        let b = compute_checksum("CREATE TABLE t (x INTEGER)");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn different_sql_yields_different_checksums() {
        let a = compute_checksum("CREATE TABLE a (x INTEGER)");
        let b = compute_checksum("CREATE TABLE b (x INTEGER)");
        assert_ne!(a, b);
    }
}
