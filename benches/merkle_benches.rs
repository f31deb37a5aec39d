use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rpp_merkle::merkle::{
    get_multi_proof, get_proof, make_merkle_tree, process_multi_proof, process_proof,
    DeterministicTreeHasher, NodeHash, TreeHasher, NODE_HASH_SIZE,
};

fn make_leaves(count: usize) -> Vec<NodeHash> {
    (0..count)
        .map(|i| DeterministicTreeHasher::leaf(&(i as u64).to_le_bytes()))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_tree");
    for &size in &[1024usize, 16_384, 65_536] {
        let leaves = make_leaves(size);
        group.throughput(Throughput::Bytes((size * NODE_HASH_SIZE) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &leaves, |b, leaves| {
            b.iter(|| make_merkle_tree::<DeterministicTreeHasher>(leaves).unwrap());
        });
    }
    group.finish();
}

fn bench_single_proof(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_proof");
    for &size in &[1024usize, 16_384, 65_536] {
        let leaves = make_leaves(size);
        let (tree, map) = make_merkle_tree::<DeterministicTreeHasher>(&leaves).unwrap();
        let index = map[size / 2];
        group.bench_with_input(
            BenchmarkId::new("derive", size),
            &(&tree, index),
            |b, (tree, index)| {
                b.iter(|| get_proof(tree, *index).unwrap());
            },
        );
        let proof = get_proof(&tree, index).unwrap();
        let leaf = leaves[size / 2];
        group.bench_with_input(
            BenchmarkId::new("replay", size),
            &(leaf, &proof),
            |b, (leaf, proof)| {
                b.iter(|| process_proof::<DeterministicTreeHasher>(leaf, proof));
            },
        );
    }
    group.finish();
}

fn bench_multi_proof(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_proof");
    for &size in &[1024usize, 16_384, 65_536] {
        let leaves = make_leaves(size);
        let (tree, map) = make_merkle_tree::<DeterministicTreeHasher>(&leaves).unwrap();
        let indices: Vec<usize> = (0..32).map(|i| map[i * (size / 32)]).collect();
        group.bench_with_input(
            BenchmarkId::new("derive", size),
            &(&tree, &indices),
            |b, (tree, indices)| {
                b.iter(|| get_multi_proof(tree, indices).unwrap());
            },
        );
        let multiproof = get_multi_proof(&tree, &indices).unwrap();
        group.bench_with_input(
            BenchmarkId::new("replay", size),
            &multiproof,
            |b, multiproof| {
                b.iter(|| process_multi_proof::<DeterministicTreeHasher>(multiproof).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_single_proof, bench_multi_proof);
criterion_main!(benches);
