use std::collections::BTreeSet;

use proptest::prelude::*;
use rpp_merkle::merkle::{
    get_multi_proof, get_proof, is_valid_merkle_tree, make_merkle_tree, process_multi_proof,
    process_proof, render_merkle_tree, DeterministicTreeHasher, MerkleError, MultiProof,
    NodeHash, TreeHasher,
};

fn make_leaves(count: usize) -> Vec<NodeHash> {
    (0..count)
        .map(|i| DeterministicTreeHasher::leaf(&(i as u64).to_le_bytes()))
        .collect()
}

fn build(count: usize) -> (Vec<NodeHash>, Vec<usize>) {
    make_merkle_tree::<DeterministicTreeHasher>(&make_leaves(count)).expect("non-zero leaves")
}

/// Transparent hasher for tests that need predictable node values: leaves
/// pass through, parents are the byte-wise XOR of their children.
struct XorTreeHasher;

impl TreeHasher for XorTreeHasher {
    fn leaf(payload: &[u8]) -> NodeHash {
        let mut bytes = [0u8; 32];
        for (slot, byte) in bytes.iter_mut().zip(payload) {
            *slot = *byte;
        }
        NodeHash::new(bytes)
    }

    fn pair(a: &NodeHash, b: &NodeHash) -> NodeHash {
        let mut bytes = [0u8; 32];
        for (slot, (x, y)) in bytes.iter_mut().zip(a.as_bytes().iter().zip(b.as_bytes())) {
            *slot = x ^ y;
        }
        NodeHash::new(bytes)
    }
}

#[test]
fn zero_leaves_is_rejected() {
    let err = make_merkle_tree::<DeterministicTreeHasher>(&[]).unwrap_err();
    assert_eq!(err, MerkleError::EmptyLeaves);
    assert_eq!(err.to_string(), "expected non-zero number of leaves");
}

#[test]
fn every_leaf_of_a_small_tree_is_provable() {
    for count in 1..=9 {
        let leaves = make_leaves(count);
        let (tree, map) = build(count);
        for (position, leaf) in leaves.iter().enumerate() {
            let proof = get_proof(&tree, map[position]).expect("leaf slot");
            assert_eq!(process_proof::<DeterministicTreeHasher>(leaf, &proof), tree[0]);
        }
    }
}

#[test]
fn proof_for_internal_node_is_rejected() {
    let (tree, _) = build(2);
    let err = get_proof(&tree, 0).unwrap_err();
    assert_eq!(err, MerkleError::NotALeaf { index: 0 });
    assert_eq!(err.to_string(), "index 0 is not a leaf");
}

#[test]
fn multiproof_duplicate_index_is_rejected() {
    let (tree, _) = build(2);
    let err = get_multi_proof(&tree, &[1, 1]).unwrap_err();
    assert_eq!(err, MerkleError::DuplicateIndex { index: 1 });
}

#[test]
fn multiproof_non_leaf_index_is_rejected() {
    let (tree, _) = build(4);
    assert!(matches!(
        get_multi_proof(&tree, &[3, 0]),
        Err(MerkleError::NotALeaf { index: 0 })
    ));
}

#[test]
fn tree_validity() {
    let zero = NodeHash::zero();
    assert!(!is_valid_merkle_tree::<DeterministicTreeHasher>(&[]));
    assert!(!is_valid_merkle_tree::<DeterministicTreeHasher>(&[zero, zero]));
    assert!(!is_valid_merkle_tree::<DeterministicTreeHasher>(&[
        zero, zero, zero
    ]));

    let (tree, _) = build(5);
    assert!(is_valid_merkle_tree::<DeterministicTreeHasher>(&tree));

    let mut tampered = tree;
    tampered[1] = NodeHash::zero();
    assert!(!is_valid_merkle_tree::<DeterministicTreeHasher>(&tampered));
}

#[test]
fn multiproof_flag_count_invariant() {
    let zero = NodeHash::zero();
    let bad = MultiProof {
        leaves: vec![zero, zero],
        proof: vec![zero, zero],
        proof_flags: vec![true, true, false],
    };
    let err = process_multi_proof::<DeterministicTreeHasher>(&bad).unwrap_err();
    assert!(matches!(err, MerkleError::Invariant { .. }));
}

#[test]
fn multiproof_with_too_few_flags_is_an_invariant_violation() {
    let zero = NodeHash::zero();
    let bad = MultiProof {
        leaves: vec![zero, zero],
        proof: vec![],
        proof_flags: vec![],
    };
    assert!(matches!(
        process_multi_proof::<DeterministicTreeHasher>(&bad),
        Err(MerkleError::Invariant { .. })
    ));
}

#[test]
fn single_leaf_multiproof_degenerates_to_the_leaf() {
    let leaf = DeterministicTreeHasher::leaf(b"only");
    let multiproof = MultiProof {
        leaves: vec![leaf],
        proof: vec![],
        proof_flags: vec![],
    };
    assert_eq!(
        process_multi_proof::<DeterministicTreeHasher>(&multiproof).unwrap(),
        leaf
    );
}

#[test]
fn render_rejects_an_empty_array() {
    let err = render_merkle_tree(&[]).unwrap_err();
    assert_eq!(err, MerkleError::EmptyTree);
    assert_eq!(err.to_string(), "expected non-zero number of nodes");
}

#[test]
fn render_layout_snapshot() {
    let leaves = [
        NodeHash::new([0x01; 32]),
        NodeHash::new([0x02; 32]),
        NodeHash::new([0x03; 32]),
    ];
    let (tree, _) = make_merkle_tree::<XorTreeHasher>(&leaves).unwrap();
    let rendered = render_merkle_tree(&tree).unwrap();
    insta::assert_snapshot!(rendered, @r###"
    0) 0x0000000000000000000000000000000000000000000000000000000000000000
    ├─ 1) 0x0303030303030303030303030303030303030303030303030303030303030303
    │  ├─ 3) 0x0202020202020202020202020202020202020202020202020202020202020202
    │  └─ 4) 0x0101010101010101010101010101010101010101010101010101010101010101
    └─ 2) 0x0303030303030303030303030303030303030303030303030303030303030303
    "###);
}

proptest! {
    #[test]
    fn random_leaf_roundtrip(count in 1usize..64, pick in any::<prop::sample::Index>()) {
        let leaves = make_leaves(count);
        let (tree, map) = build(count);
        let position = pick.index(count);
        let proof = get_proof(&tree, map[position]).unwrap();
        prop_assert_eq!(
            process_proof::<DeterministicTreeHasher>(&leaves[position], &proof),
            tree[0]
        );
    }

    #[test]
    fn random_subset_roundtrip(
        count in 1usize..48,
        raw in proptest::collection::btree_set(0usize..256, 1..8)
    ) {
        let leaves = make_leaves(count);
        let (tree, map) = build(count);
        let picked: BTreeSet<usize> = raw.into_iter().map(|i| i % count).collect();
        let tree_indices: Vec<usize> = picked.iter().map(|&i| map[i]).collect();

        let multiproof = get_multi_proof(&tree, &tree_indices).unwrap();

        let requested: BTreeSet<NodeHash> = picked.iter().map(|&i| leaves[i]).collect();
        let carried: BTreeSet<NodeHash> = multiproof.leaves.iter().copied().collect();
        prop_assert_eq!(requested, carried);
        prop_assert_eq!(multiproof.leaves.len(), picked.len());

        prop_assert_eq!(
            multiproof.proof.len(),
            multiproof.proof_flags.iter().filter(|flag| !**flag).count()
        );
        prop_assert_eq!(
            multiproof.proof_flags.len() + 1,
            multiproof.leaves.len() + multiproof.proof.len()
        );

        prop_assert_eq!(
            process_multi_proof::<DeterministicTreeHasher>(&multiproof).unwrap(),
            tree[0]
        );
    }

    #[test]
    fn construction_is_deterministic(count in 1usize..64) {
        let (first, first_map) = build(count);
        let (second, second_map) = build(count);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first_map, second_map);
    }
}
