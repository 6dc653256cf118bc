//! DJB2 string hashing.
//!
//! The table's bucket placement must be reproducible: an entry hashed
//! during insertion has to land in the same bucket when a lookup or a
//! rehash recomputes its index. DJB2 is a pure function of the key's
//! characters, so it satisfies this trivially. The standard library's
//! `RandomState`-seeded hashing is deliberately randomized per process
//! and is therefore not used here.

/// Initial accumulator value for DJB2, per Bernstein's original.
const SEED: u64 = 5381;

/// Multiplier applied per character (the classic `(h << 5) + h`).
const MULTIPLIER: u64 = 33;

/// Hashes a string key with DJB2.
///
/// Walks the key's characters in order and folds each Unicode code point
/// into the accumulator with wrapping 64-bit arithmetic:
/// `acc = acc * 33 + code_point`. Deterministic and pure; equal keys
/// always produce equal hashes.
///
/// # Examples
///
/// ```rust
/// assert_eq!(chain_hash::djb2::hash(""), 5381);
/// assert_eq!(chain_hash::djb2::hash("a"), 5381 * 33 + 'a' as u64);
/// ```
#[inline]
pub fn hash(key: &str) -> u64 {
    let mut acc = SEED;
    for c in key.chars() {
        acc = acc.wrapping_mul(MULTIPLIER).wrapping_add(c as u64);
    }
    acc
}

/// Maps a key to a bucket index in a table with `capacity` slots.
///
/// `capacity` must be positive; the table guarantees this from
/// construction onward, so the division here cannot trap.
#[inline]
pub(crate) fn bucket_index(key: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "bucket_index called with zero capacity");
    (hash(key) % capacity as u64) as usize
}
