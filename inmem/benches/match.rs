//! This benchmark compares the cost of matching a few quads
//! with the cost of walking the whole store.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use solid_inmem::DatasetCore;
use solid_term::{Literal, NamedNode, Quad, Term};

fn ex(suffix: String) -> Term {
    NamedNode::new(format!("https://example.org/{suffix}")).into()
}

fn make_store(n: usize) -> DatasetCore {
    let mut d = DatasetCore::new();
    for i in 0..n {
        for j in 0..10 {
            let quad = Quad::new_triple(
                ex(format!("s{i}")),
                ex(format!("p{j}")),
                Literal::new_simple(format!("{i}-{j}")),
            )
            .unwrap();
            d.add(quad);
        }
    }
    d
}

fn match_subject(c: &mut Criterion) {
    for n in [100, 1_000, 10_000] {
        let d = make_store(n);
        let s = ex("s42".into());
        c.bench_with_input(BenchmarkId::new("match subject", n), &d, |b, d| {
            b.iter(|| black_box(d.match_quads(Some(&s), None, None, None).size()));
        });
    }
}

fn full_scan(c: &mut Criterion) {
    for n in [100, 1_000, 10_000] {
        let d = make_store(n);
        c.bench_with_input(BenchmarkId::new("full scan", n), &d, |b, d| {
            b.iter(|| black_box(d.iter().count()));
        });
    }
}

criterion_group!(benches, match_subject, full_scan);
criterion_main!(benches);
