use sha2::{Digest, Sha256};

/// Stable recipe identifier derived from the recipe name.
///
/// The name is trimmed and lowercased first, so "Apple Pie" and "apple pie "
/// map to the same id. The id is the first 8 bytes of the SHA-256 digest,
/// hex encoded.
pub fn recipe_id(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.trim().to_lowercase().as_bytes());
    let hash = hasher.finalize();

    hex::encode(&hash[..8])
}
