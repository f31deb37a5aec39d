//! Concrete hashing schemes layered on top of the engine's hasher contract.
//!
//! The engine itself is hash-agnostic; this module supplies the production
//! scheme used by `standard-v1` trees. The deterministic test hasher lives
//! next to the contract in [`crate::merkle`].

mod standard;

pub use standard::{standard_leaf_hash, standard_node_hash, StandardHasher};
