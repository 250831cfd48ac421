use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use paper_processor_engine::{Document, ProseMode, Segmenter, render, render_block_html};
mod common;

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    group.sample_size(10);

    for size in [10, 100, 1000] {
        let document = Document::from(common::generate_paper_content(size).as_str());
        for mode in [ProseMode::Join, ProseMode::LinePerBlock] {
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), size),
                &document,
                |b, document| {
                    let segmenter = Segmenter::new(mode);
                    b.iter(|| std::hint::black_box(segmenter.segment(document)));
                },
            );
        }
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(10);

    let table = common::generate_wide_table(12, 200);
    group.bench_function("wide_table", |b| {
        b.iter(|| std::hint::black_box(render(std::hint::black_box(&table))));
    });
    group.bench_function("wide_table_html", |b| {
        b.iter(|| std::hint::black_box(render_block_html(std::hint::black_box(&table))));
    });

    group.finish();
}

criterion_group!(benches, bench_segment, bench_render);
criterion_main!(benches);
