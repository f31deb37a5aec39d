use super::types::NodeHash;

/// Hash abstraction consumed by the tree engine.
///
/// The engine is agnostic about the concrete hash family; everything it needs
/// is a way to reduce an encoded leaf payload to a node hash and a way to
/// combine two node hashes into their parent.
pub trait TreeHasher {
    /// Maps an encoded leaf payload to its leaf hash.
    fn leaf(payload: &[u8]) -> NodeHash;

    /// Combines two node hashes into their parent hash.
    ///
    /// Implementations must be deterministic and order-insensitive: the
    /// engine never tracks left/right sidedness, so `pair(a, b)` and
    /// `pair(b, a)` must produce the same hash. The canonical way to satisfy
    /// this is to order the operands byte-lexicographically before hashing.
    fn pair(a: &NodeHash, b: &NodeHash) -> NodeHash;
}
