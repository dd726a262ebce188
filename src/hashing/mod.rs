//! BLAKE3 digests for cache keys and match-set fingerprints.

use std::collections::BTreeSet;

use blake3::Hasher;

use crate::constants::CACHE_DIGEST_HEX_LEN;

/// Separator placed between normalized key parts before hashing.
pub const KEY_PART_SEPARATOR: &str = ":";

/// Trims and lower-cases a textual key part.
#[inline]
pub fn normalize_key_part(part: &str) -> String {
    part.trim().to_lowercase()
}

/// Returns the first [`CACHE_DIGEST_HEX_LEN`] hex characters of the BLAKE3 hash of `data`.
///
/// # Truncation
///
/// Eight hex characters keep 32 bits of the digest. With `n` live keys per namespace the
/// collision probability is roughly `n² / 2^33`, which stays below 0.1% up to ~3,000 keys.
/// A collision serves another query's cached payload until its TTL lapses; nothing is
/// corrupted and nothing downstream trusts the key for integrity.
#[inline]
pub fn short_digest(data: &[u8]) -> String {
    let hash = blake3::hash(data);
    let mut hex = hash.to_hex().to_string();
    hex.truncate(CACHE_DIGEST_HEX_LEN);
    hex
}

/// Builds `"<namespace>:<digest>"` over the normalized, `:`-joined parts.
pub fn cache_key<S: AsRef<str>>(namespace: &str, parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(|p| normalize_key_part(p.as_ref()))
        .collect::<Vec<_>>()
        .join(KEY_PART_SEPARATOR);

    format!("{}{}{}", namespace, KEY_PART_SEPARATOR, short_digest(joined.as_bytes()))
}

/// Order-independent digest over a set of match names.
///
/// Names are normalized, de-duplicated and sorted before hashing, so `[A, B]`, `[B, A]`
/// and `[a, B, A]` all produce the same value.
pub fn hash_match_names<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set: BTreeSet<String> = names
        .into_iter()
        .map(|n| normalize_key_part(n.as_ref()))
        .collect();

    let mut hasher = Hasher::new();
    for (i, name) in set.iter().enumerate() {
        if i > 0 {
            hasher.update(b"|");
        }
        hasher.update(name.as_bytes());
    }

    let mut hex = hasher.finalize().to_hex().to_string();
    hex.truncate(CACHE_DIGEST_HEX_LEN);
    hex
}

/// Fills `out` with deterministic pseudo-random bytes derived from `data` (BLAKE3 XOF).
#[inline]
pub fn expand_digest(data: &[u8], out: &mut [u8]) {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize_xof().fill(out);
}
