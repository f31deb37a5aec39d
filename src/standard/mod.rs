//! `standard-v1` trees: typed leaf rows, Keccak-256 hashing, persistence.
//!
//! [`StandardMerkleTree`] bundles the value encoding, the standard hashing
//! scheme and the core engine behind one front-end. A tree can be dumped to a
//! [`StandardMerkleTreeData`] record (format tag, flat tree array, leaf
//! encoding, original values keyed by tree index) and reloaded later;
//! reloading re-derives every leaf hash and re-validates the whole array
//! before the tree is usable again.

use core::fmt;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hash::{standard_leaf_hash, StandardHasher};
use crate::merkle::{
    get_multi_proof, get_proof, is_valid_merkle_tree, make_merkle_tree, process_multi_proof,
    process_proof, render_merkle_tree, MerkleError, MultiProof, NodeHash,
};
use crate::value::{Value, ValueError, ValueKind};

/// Format tag carried by every dump this module writes.
pub const STANDARD_FORMAT: &str = "standard-v1";

/// Errors surfaced by the standard tree front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The core engine rejected the operation.
    Merkle(MerkleError),
    /// A leaf row failed to encode.
    Value(ValueError),
    /// A dump carries a format tag this version does not understand.
    UnknownFormat(String),
    /// A value-order index does not refer to a stored leaf row.
    UnknownValue { index: usize },
    /// A dump failed re-validation: a stored value does not hash to its tree
    /// slot, or the tree array itself is inconsistent.
    InvalidTree,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Merkle(err) => write!(f, "{}", err),
            TreeError::Value(err) => write!(f, "{}", err),
            TreeError::UnknownFormat(tag) => write!(f, "unknown format '{}'", tag),
            TreeError::UnknownValue { index } => {
                write!(f, "no value at index {}", index)
            }
            TreeError::InvalidTree => write!(f, "merkle tree is invalid"),
        }
    }
}

impl std::error::Error for TreeError {}

impl From<MerkleError> for TreeError {
    fn from(err: MerkleError) -> Self {
        TreeError::Merkle(err)
    }
}

impl From<ValueError> for TreeError {
    fn from(err: ValueError) -> Self {
        TreeError::Value(err)
    }
}

/// A stored leaf row together with its slot in the tree array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedValue {
    pub value: Vec<Value>,
    pub tree_index: usize,
}

/// Persisted shape of a standard tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardMerkleTreeData {
    pub format: String,
    pub leaf_encoding: Vec<ValueKind>,
    pub tree: Vec<NodeHash>,
    pub values: Vec<IndexedValue>,
}

/// Merkle tree over typed leaf rows under the `standard-v1` scheme.
#[derive(Debug)]
pub struct StandardMerkleTree {
    tree: Vec<NodeHash>,
    values: Vec<IndexedValue>,
    leaf_encoding: Vec<ValueKind>,
    leaf_lookup: HashMap<NodeHash, usize>,
}

impl StandardMerkleTree {
    /// Builds a tree over `values`, each row matching `leaf_encoding`.
    ///
    /// Rows keep their input order; row `k` can be proven later through the
    /// value-order index `k`.
    pub fn of(
        values: Vec<Vec<Value>>,
        leaf_encoding: Vec<ValueKind>,
    ) -> Result<Self, TreeError> {
        let hashes = hash_rows(&leaf_encoding, &values)?;
        let (tree, index_map) = make_merkle_tree::<StandardHasher>(&hashes)?;

        let mut leaf_lookup = HashMap::with_capacity(hashes.len());
        for (position, leaf) in hashes.iter().enumerate() {
            leaf_lookup.insert(*leaf, position);
        }

        let values = values
            .into_iter()
            .zip(index_map)
            .map(|(value, tree_index)| IndexedValue { value, tree_index })
            .collect();

        Ok(Self {
            tree,
            values,
            leaf_encoding,
            leaf_lookup,
        })
    }

    /// Reconstructs a tree from a dump, re-validating everything.
    pub fn load(data: StandardMerkleTreeData) -> Result<Self, TreeError> {
        if data.format != STANDARD_FORMAT {
            return Err(TreeError::UnknownFormat(data.format));
        }

        let StandardMerkleTreeData {
            leaf_encoding,
            tree,
            values,
            ..
        } = data;

        let mut leaf_lookup = HashMap::with_capacity(values.len());
        for (position, entry) in values.iter().enumerate() {
            let leaf = standard_leaf_hash(&leaf_encoding, &entry.value)?;
            leaf_lookup.insert(leaf, position);
        }

        let loaded = Self {
            tree,
            values,
            leaf_encoding,
            leaf_lookup,
        };
        loaded.validate()?;
        Ok(loaded)
    }

    /// Serializes the tree alongside its original values.
    pub fn dump(&self) -> StandardMerkleTreeData {
        StandardMerkleTreeData {
            format: STANDARD_FORMAT.to_string(),
            leaf_encoding: self.leaf_encoding.clone(),
            tree: self.tree.clone(),
            values: self.values.clone(),
        }
    }

    /// The root hash committing to the whole leaf set.
    pub fn root(&self) -> NodeHash {
        self.tree[0]
    }

    /// The declared shape of every leaf row.
    pub fn leaf_encoding(&self) -> &[ValueKind] {
        &self.leaf_encoding
    }

    /// Iterates the stored rows in value order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &[Value])> {
        self.values
            .iter()
            .enumerate()
            .map(|(position, entry)| (position, entry.value.as_slice()))
    }

    /// Hashes a row the way this tree hashes its leaves.
    pub fn leaf_hash(&self, value: &[Value]) -> Result<NodeHash, TreeError> {
        Ok(standard_leaf_hash(&self.leaf_encoding, value)?)
    }

    /// Looks up the value-order index of a row, if it is part of the tree.
    pub fn index_of(&self, value: &[Value]) -> Option<usize> {
        let leaf = standard_leaf_hash(&self.leaf_encoding, value).ok()?;
        self.leaf_lookup.get(&leaf).copied()
    }

    /// Re-checks every stored value against its tree slot and the whole
    /// array against the pairwise-hash rule.
    pub fn validate(&self) -> Result<(), TreeError> {
        for entry in &self.values {
            let leaf = standard_leaf_hash(&self.leaf_encoding, &entry.value)?;
            match self.tree.get(entry.tree_index) {
                Some(stored) if *stored == leaf => {}
                _ => return Err(TreeError::InvalidTree),
            }
        }
        if is_valid_merkle_tree::<StandardHasher>(&self.tree) {
            Ok(())
        } else {
            Err(TreeError::InvalidTree)
        }
    }

    /// Derives the proof for the row at value-order index `index`.
    pub fn get_proof(&self, index: usize) -> Result<Vec<NodeHash>, TreeError> {
        let entry = self
            .values
            .get(index)
            .ok_or(TreeError::UnknownValue { index })?;
        Ok(get_proof(&self.tree, entry.tree_index)?)
    }

    /// Derives a multiproof for the rows at the given value-order indices.
    ///
    /// The returned proof carries the original rows in place of leaf hashes,
    /// ready to hand to [`StandardMerkleTree::verify_multi_proof`].
    pub fn get_multi_proof(
        &self,
        indices: &[usize],
    ) -> Result<MultiProof<Vec<Value>>, TreeError> {
        let tree_indices = indices
            .iter()
            .map(|&index| {
                self.values
                    .get(index)
                    .map(|entry| entry.tree_index)
                    .ok_or(TreeError::UnknownValue { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let multiproof = get_multi_proof(&self.tree, &tree_indices)?;
        let leaves = multiproof
            .leaves
            .iter()
            .map(|leaf| {
                self.leaf_lookup
                    .get(leaf)
                    .map(|&position| self.values[position].value.clone())
                    .ok_or(TreeError::InvalidTree)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MultiProof {
            leaves,
            proof: multiproof.proof,
            proof_flags: multiproof.proof_flags,
        })
    }

    /// Verifies a proof for `value` against this tree's root.
    pub fn verify(&self, value: &[Value], proof: &[NodeHash]) -> Result<bool, TreeError> {
        Self::verify_proof(&self.root(), &self.leaf_encoding, value, proof)
    }

    /// Verifies a proof against an externally trusted root.
    pub fn verify_proof(
        root: &NodeHash,
        leaf_encoding: &[ValueKind],
        value: &[Value],
        proof: &[NodeHash],
    ) -> Result<bool, TreeError> {
        let leaf = standard_leaf_hash(leaf_encoding, value)?;
        Ok(process_proof::<StandardHasher>(&leaf, proof) == *root)
    }

    /// Verifies a value-carrying multiproof against an externally trusted
    /// root.
    pub fn verify_multi_proof(
        root: &NodeHash,
        leaf_encoding: &[ValueKind],
        multiproof: &MultiProof<Vec<Value>>,
    ) -> Result<bool, TreeError> {
        let leaves = multiproof
            .leaves
            .iter()
            .map(|row| standard_leaf_hash(leaf_encoding, row))
            .collect::<Result<Vec<_>, _>>()?;
        let replayed = MultiProof {
            leaves,
            proof: multiproof.proof.clone(),
            proof_flags: multiproof.proof_flags.clone(),
        };
        Ok(process_multi_proof::<StandardHasher>(&replayed)? == *root)
    }

    /// Renders the tree array for debugging.
    pub fn render(&self) -> Result<String, TreeError> {
        Ok(render_merkle_tree(&self.tree)?)
    }
}

fn hash_rows(kinds: &[ValueKind], rows: &[Vec<Value>]) -> Result<Vec<NodeHash>, ValueError> {
    #[cfg(feature = "parallel")]
    if crate::utils::parallelism_enabled() {
        use rayon::prelude::*;
        let chunk = crate::utils::preferred_chunk_size(rows.len());
        return rows
            .par_iter()
            .with_min_len(chunk)
            .with_max_len(chunk)
            .map(|row| standard_leaf_hash(kinds, row))
            .collect();
    }

    rows.iter().map(|row| standard_leaf_hash(kinds, row)).collect()
}
