use criterion::{Criterion, black_box, criterion_group, criterion_main};

use fakturo_model::{GeneratorConfig, InvoiceBuilder};

fn bench_builder(c: &mut Criterion) {
    let cfg = GeneratorConfig {
        min_line_items: 100,
        max_line_items: 100,
        ..GeneratorConfig::default()
    };

    c.bench_function("build_invoice_100_items", |b| {
        let mut builder = InvoiceBuilder::new(&cfg, 42);
        b.iter(|| black_box(builder.build()));
    });
}

criterion_group!(benches, bench_builder);
criterion_main!(benches);
