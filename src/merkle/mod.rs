//! Core Merkle tree engine.
//!
//! The module fixes the tree shape and the proof formats:
//!
//! * **Layout:** a tree over `n` leaves is a flat array of `2n - 1` node
//!   hashes. The root sits at index 0, the children of internal index `i` at
//!   `2i + 1` and `2i + 2`, and the leaves occupy the last `n` slots in
//!   reversed input order. The array length is always odd.
//! * **Pairing:** parents are derived through the [`TreeHasher`] contract,
//!   whose pairwise combination is commutative. No left/right bookkeeping
//!   exists anywhere in the engine.
//! * **Proofs:** a single-leaf proof is the sibling path up to the root; a
//!   [`MultiProof`] compacts several paths into a minimal sibling set plus a
//!   flag sequence that replays the reduction order.
//!
//! All operations are pure functions over the array; nothing here mutates a
//! tree after construction.

mod deterministic;
mod proof;
pub mod traits;
mod tree;
mod types;

pub use deterministic::DeterministicTreeHasher;
pub use proof::{get_multi_proof, get_proof, process_multi_proof, process_proof};
pub use traits::TreeHasher;
pub use tree::{is_valid_merkle_tree, make_merkle_tree, render_merkle_tree};
pub use types::{MerkleError, MultiProof, NodeHash, NODE_HASH_SIZE};
