use sha3::{Digest, Keccak256};

use crate::merkle::{NodeHash, TreeHasher};
use crate::value::{encode_values, Value, ValueError, ValueKind};

/// Keccak-256 scheme used by `standard-v1` trees.
///
/// Leaves are hashed twice so that a leaf hash can never collide with an
/// internal node over attacker-chosen children; node pairs are ordered
/// byte-lexicographically before hashing, making the combination commutative.
pub struct StandardHasher;

impl TreeHasher for StandardHasher {
    fn leaf(payload: &[u8]) -> NodeHash {
        let inner = Keccak256::digest(payload);
        let outer = Keccak256::digest(inner);
        NodeHash::new(outer.into())
    }

    fn pair(a: &NodeHash, b: &NodeHash) -> NodeHash {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let mut hasher = Keccak256::new();
        hasher.update(lo.as_bytes());
        hasher.update(hi.as_bytes());
        NodeHash::new(hasher.finalize().into())
    }
}

/// Hashes a typed leaf row under the `standard-v1` scheme.
pub fn standard_leaf_hash(
    kinds: &[ValueKind],
    values: &[Value],
) -> Result<NodeHash, ValueError> {
    let payload = encode_values(kinds, values)?;
    Ok(StandardHasher::leaf(&payload))
}

/// Combines two node hashes under the `standard-v1` scheme.
pub fn standard_node_hash(a: &NodeHash, b: &NodeHash) -> NodeHash {
    StandardHasher::pair(a, b)
}
