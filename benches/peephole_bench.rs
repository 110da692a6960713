// benches/peephole_bench.rs
//! Peephole throughput on generated expression trees, grounded on
//! `examples/Giuseppe-Bianc-jsavrs/benches/jsavrs_benchmark.rs` (its
//! benchmark-group setup and `Throughput::Bytes` convention), scaled down
//! to this crate's single pipeline: source text -> tokens -> AST -> graph.
use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use simplec::ir::Generator;
use simplec::parser::parse;
use simplec::types::Type;
use std::hint::black_box;
use std::time::Duration;

fn configure_benchmark_group(group: &mut BenchmarkGroup<WallTime>, warm_up: u64, measurement: u64) {
    group
        .significance_level(0.005)
        .sample_size(200)
        .confidence_level(0.99)
        .warm_up_time(Duration::from_secs(warm_up))
        .measurement_time(Duration::from_secs(measurement));
}

/// A left-deep chain of `depth` additions ending in a literal, e.g.
/// `return arg+1+1+...+1;` - each one triggers the `Add` idealize rules
/// (left-heavy normalization, constant folding of the trailing `+1`s) on
/// construction.
fn addition_chain(depth: usize) -> String {
    let mut src = String::from("return arg");
    for _ in 0..depth {
        src.push_str("+1");
    }
    src.push(';');
    src
}

/// An `if/else` ladder of `depth` levels, each assigning a distinct constant
/// to the same variable - exercises `Scope::merge`'s phi-node insertion at
/// every join.
fn if_else_ladder(depth: usize) -> String {
    let mut src = String::from("int a=0;");
    for i in 0..depth {
        src.push_str(&format!("if (arg) {{ a={i}; }} else {{ a={}; }}", i + 1));
    }
    src.push_str("return a;");
    src
}

pub fn benchmark_peephole_addition_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplec-peephole-addition");
    configure_benchmark_group(&mut group, 3, 8);

    for depth in [8usize, 64, 256] {
        let source = addition_chain(depth);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("depth_{depth}")), &source, |b, source| {
            b.iter(|| {
                let program = parse(black_box(source)).expect("bench source must parse");
                let mut generator = Generator::new(Type::int_bottom()).expect("fresh generator");
                let ret = generator.generate(&program).expect("bench source must compile");
                black_box(ret);
            });
        });
    }
    group.finish();
}

pub fn benchmark_peephole_if_else_merges(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplec-peephole-if-else");
    configure_benchmark_group(&mut group, 3, 8);

    for depth in [4usize, 16, 64] {
        let source = if_else_ladder(depth);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("depth_{depth}")), &source, |b, source| {
            b.iter(|| {
                let program = parse(black_box(source)).expect("bench source must parse");
                let mut generator = Generator::new(Type::int_bottom()).expect("fresh generator");
                let ret = generator.generate(&program).expect("bench source must compile");
                black_box(ret);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_peephole_addition_chains, benchmark_peephole_if_else_merges);
criterion_main!(benches);
