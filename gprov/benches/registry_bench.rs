use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use gprov::credentials::JsonCredentialLoader;
use gprov::env::MapEnv;
use gprov::{
    merge_registries, CancellationToken, CatalogBuilder, ConfigAssembler, EndpointTable,
    MergeMode, OperationDescriptor, OperationRegistry, RawSettings,
};

const REGISTRY_SIZES: &[usize] = &[100, 1_000, 5_000];

/// Three registries of `size` entries each, overlapping by a tenth.
fn registries(size: usize) -> Vec<OperationRegistry<OperationDescriptor>> {
    (0..3)
        .map(|r| {
            (0..size)
                .map(|i| {
                    let index = r * size * 9 / 10 + i;
                    (
                        format!("google_resource_{index}"),
                        OperationDescriptor::resource("compute"),
                    )
                })
                .collect()
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_registries");
    for &size in REGISTRY_SIZES {
        let input = registries(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter_batched(
                || input.clone(),
                |regs| black_box(merge_registries(regs)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_build");
    for &size in REGISTRY_SIZES {
        let input = registries(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter_batched(
                || input.clone(),
                |regs| {
                    let mut builder = CatalogBuilder::new(MergeMode::Lenient);
                    for (i, resources) in regs.into_iter().enumerate() {
                        builder.add(format!("registry-{i}"), resources, OperationRegistry::new());
                    }
                    black_box(builder.build().expect("lenient build never fails"))
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let env = MapEnv::new().with("GOOGLE_PROJECT", "bench");
    let assembler = ConfigAssembler::new(JsonCredentialLoader::with_env(env.clone()))
        .with_env(env)
        .with_base_endpoints(Arc::new(EndpointTable::defaults()));
    let settings = RawSettings {
        credentials: Some(r#"{"type": "service_account", "universe_domain": "example.com"}"#.into()),
        universe_domain: Some("example.com".into()),
        ..RawSettings::default()
    };
    let cancel = CancellationToken::new();

    c.bench_function("assemble_configuration", |b| {
        b.iter(|| black_box(assembler.assemble(&settings, &cancel).expect("assembly failed")));
    });
}

criterion_group!(benches, bench_merge, bench_catalog, bench_assemble);
criterion_main!(benches);
