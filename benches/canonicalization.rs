//! Performance benchmarks for unit canonicalization.
//!
//! Measures expansion through alias chains of increasing depth and the
//! cost of writing a whole module to an output document.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use unitdef::{Registry, UnitDef};

/// `u0 = meter / second`, and each `uN` is an alias of `uN-1`.
fn alias_chain(depth: usize) -> anyhow::Result<Registry> {
    let mut registry = Registry::new();
    let module = registry.main_module_mut();
    module.define_unit("u0", "meter / second")?;
    for i in 1..depth {
        module.define_alias(&format!("u{}", i), &format!("u{}", i - 1));
    }
    Ok(registry)
}

fn bench_alias_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("alias_chain");
    for depth in [1usize, 8, 64] {
        let Ok(registry) = alias_chain(depth) else {
            continue;
        };
        let top = UnitDef::new(format!("u{}", depth - 1), "__main");
        group.bench_with_input(BenchmarkId::from_parameter(depth), &top, |b, top| {
            b.iter(|| black_box(top).get_canonical(&registry))
        });
    }
    group.finish();
}

fn bench_formula(c: &mut Criterion) {
    c.bench_function("set_from_formula", |b| {
        b.iter(|| UnitDef::from_formula(black_box("kilogram * meter^2 / (second^2 * ampere)"), "__main"))
    });
}

fn bench_build_document(c: &mut Criterion) {
    let Ok(mut registry) = alias_chain(32) else {
        return;
    };
    c.bench_function("build_document", |b| {
        b.iter(|| registry.build_document(black_box("__main")))
    });
}

criterion_group!(benches, bench_alias_chain, bench_formula, bench_build_document);
criterion_main!(benches);
