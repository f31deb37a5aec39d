//! Flat binary Merkle trees with single- and multi-leaf membership proofs.
//!
//! The crate splits into a hash-agnostic core and thin collaborators around
//! it:
//!
//! * [`merkle`] — the tree engine: flat-array construction, single-leaf
//!   proofs, flag-encoded multiproofs, tree validation and a debug renderer,
//!   all generic over the [`merkle::TreeHasher`] contract.
//! * [`hash`] — the Keccak-256 scheme backing `standard-v1` trees.
//! * [`value`] — typed leaf rows and their canonical word encoding.
//! * [`standard`] — the [`standard::StandardMerkleTree`] front-end bundling
//!   the three above, plus dump/load persistence.
//! * [`utils`] — the `parallel`-feature plumbing for leaf hashing.
//!
//! A verifier needs nothing but a trusted root and a proof; see
//! [`merkle::process_proof`] and [`merkle::process_multi_proof`].

pub mod hash;
pub mod merkle;
pub mod standard;
pub mod utils;
pub mod value;

pub use merkle::{
    get_multi_proof, get_proof, is_valid_merkle_tree, make_merkle_tree, process_multi_proof,
    process_proof, render_merkle_tree, DeterministicTreeHasher, MerkleError, MultiProof,
    NodeHash, TreeHasher, NODE_HASH_SIZE,
};
pub use standard::{
    IndexedValue, StandardMerkleTree, StandardMerkleTreeData, TreeError, STANDARD_FORMAT,
};
pub use value::{Value, ValueError, ValueKind};
