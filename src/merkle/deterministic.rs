use super::traits::TreeHasher;
use super::types::NodeHash;

/// Domain tag prefixed to leaf payloads.
const LEAF_DOMAIN_TAG: u8 = 0x00;

/// Domain tag prefixed to node pairs.
const NODE_DOMAIN_TAG: u8 = 0x01;

/// Deterministic BLAKE3-backed hasher used by tests and benches.
///
/// Leaf and node hashes live in separate domains via a one-byte tag, and the
/// pair operands are ordered byte-lexicographically before hashing, which
/// makes the combination commutative.
pub struct DeterministicTreeHasher;

impl TreeHasher for DeterministicTreeHasher {
    fn leaf(payload: &[u8]) -> NodeHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[LEAF_DOMAIN_TAG]);
        hasher.update(payload);
        NodeHash::new(*hasher.finalize().as_bytes())
    }

    fn pair(a: &NodeHash, b: &NodeHash) -> NodeHash {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[NODE_DOMAIN_TAG]);
        hasher.update(lo.as_bytes());
        hasher.update(hi.as_bytes());
        NodeHash::new(*hasher.finalize().as_bytes())
    }
}
