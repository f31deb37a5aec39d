use std::collections::VecDeque;

use super::traits::TreeHasher;
use super::tree::{is_leaf_node, parent_index, sibling_index};
use super::types::{MerkleError, MultiProof, NodeHash};

/// Derives the sibling-hash path for the leaf at tree index `index`.
///
/// The walk collects the sibling at every level from the leaf up to, but
/// excluding, the root. Any index that is not a leaf slot (including indices
/// past the end of the array) is rejected.
pub fn get_proof(tree: &[NodeHash], index: usize) -> Result<Vec<NodeHash>, MerkleError> {
    if !is_leaf_node(tree, index) {
        return Err(MerkleError::NotALeaf { index });
    }

    let mut proof = Vec::new();
    let mut current = index;
    while current > 0 {
        proof.push(tree[sibling_index(current)]);
        current = parent_index(current);
    }
    Ok(proof)
}

/// Derives a compact proof for several leaves at once.
///
/// Indices are processed in descending order as a frontier queue. At each
/// step the deepest unprocessed node is popped; when its sibling is next on
/// the frontier both are consumed and a `true` flag is recorded, otherwise
/// the sibling hash goes into `proof` under a `false` flag. Every parent is
/// pushed back onto the frontier until only the root remains. Siblings that
/// the verifier can recompute are never emitted, so `proof` is minimal.
pub fn get_multi_proof(tree: &[NodeHash], indices: &[usize]) -> Result<MultiProof, MerkleError> {
    for &index in indices {
        if !is_leaf_node(tree, index) {
            return Err(MerkleError::NotALeaf { index });
        }
    }

    let mut sorted = indices.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            return Err(MerkleError::DuplicateIndex { index: pair[0] });
        }
    }

    let mut frontier: VecDeque<usize> = sorted.iter().copied().collect();
    let mut proof = Vec::new();
    let mut proof_flags = Vec::new();

    while let Some(index) = frontier.pop_front() {
        if index == 0 {
            break;
        }
        let sibling = sibling_index(index);
        if frontier.front() == Some(&sibling) {
            proof_flags.push(true);
            frontier.pop_front();
        } else {
            proof_flags.push(false);
            proof.push(tree[sibling]);
        }
        frontier.push_back(parent_index(index));
    }

    if sorted.is_empty() {
        // Degenerate multiproof over no leaves: the root itself is the proof.
        proof.push(tree[0]);
    }

    Ok(MultiProof {
        leaves: sorted.iter().map(|&index| tree[index]).collect(),
        proof,
        proof_flags,
    })
}

/// Recomputes the candidate root from a single leaf hash and its proof.
///
/// A plain left fold over the pairwise hash; the caller compares the result
/// against a trusted root.
pub fn process_proof<H: TreeHasher>(leaf: &NodeHash, proof: &[NodeHash]) -> NodeHash {
    proof.iter().fold(*leaf, |node, sibling| H::pair(&node, sibling))
}

/// Replays a multiproof and returns the candidate root.
///
/// The leaves buffer and the buffer of intermediate results form one logical
/// queue, consumed through explicit cursors: the first operand of every step
/// is the next unconsumed entry of leaves-then-results, the second comes from
/// the same queue when the step's flag is `true` and from `proof` when it is
/// `false`. A flag count that cannot match the leaf and proof counts, or a
/// queue that runs dry mid-replay, is reported as an invariant violation
/// rather than silently producing a wrong root.
pub fn process_multi_proof<H: TreeHasher>(
    multiproof: &MultiProof,
) -> Result<NodeHash, MerkleError> {
    let MultiProof {
        leaves,
        proof,
        proof_flags,
    } = multiproof;

    let from_proof = proof_flags.iter().filter(|flag| !**flag).count();
    if proof.len() < from_proof {
        return Err(MerkleError::MalformedMultiProof {
            reason: "fewer proof hashes than false flags",
        });
    }
    if leaves.len() + proof.len() != proof_flags.len() + 1 {
        return Err(MerkleError::Invariant {
            reason: "leaf, proof and flag counts are inconsistent",
        });
    }

    let mut results: Vec<NodeHash> = Vec::with_capacity(proof_flags.len());
    let mut leaf_pos = 0usize;
    let mut result_pos = 0usize;
    let mut proof_pos = 0usize;

    for &flag in proof_flags {
        let first = next_known(leaves, &mut leaf_pos, &results, &mut result_pos)?;
        let second = if flag {
            next_known(leaves, &mut leaf_pos, &results, &mut result_pos)?
        } else {
            let hash = proof[proof_pos];
            proof_pos += 1;
            hash
        };
        results.push(H::pair(&first, &second));
    }

    if let Some(root) = results.last() {
        return Ok(*root);
    }
    if let Some(leaf) = leaves.first() {
        return Ok(*leaf);
    }
    // No steps and no leaves: the count identity forces exactly one proof
    // entry, which is the root itself.
    Ok(proof[0])
}

/// Pops the next operand from the leaves-then-results queue.
fn next_known(
    leaves: &[NodeHash],
    leaf_pos: &mut usize,
    results: &[NodeHash],
    result_pos: &mut usize,
) -> Result<NodeHash, MerkleError> {
    if *leaf_pos < leaves.len() {
        let hash = leaves[*leaf_pos];
        *leaf_pos += 1;
        Ok(hash)
    } else if *result_pos < results.len() {
        let hash = results[*result_pos];
        *result_pos += 1;
        Ok(hash)
    } else {
        Err(MerkleError::Invariant {
            reason: "replay queue exhausted before all flags were consumed",
        })
    }
}
