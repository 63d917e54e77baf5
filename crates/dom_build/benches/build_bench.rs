use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use dom::Document;
use dom_build::{BuildResult, Content, attrs, content, tag};

const SMALL_ROWS: usize = 64;
const LARGE_ROWS: usize = 20_000;

fn build_table(doc: &mut Document, rows: usize) -> BuildResult {
    let body: Vec<Content> = (0..rows)
        .map(|i| {
            let name = tag(doc, "td", Some(attrs! { "link" => format!("name{i}") }), content!["row", i])
                .expect("bench row");
            let value = tag(doc, "td", Some(attrs! { "className" => "num" }), content![i * 3])
                .expect("bench row");
            Content::from(tag(doc, "tr", None, content![name, value]).expect("bench row"))
        })
        .collect();
    tag(doc, "table", Some(attrs! { "link" => "table" }), content![body]).expect("bench table")
}

fn bench_build_small(c: &mut Criterion) {
    c.bench_function("bench_build_small", |b| {
        b.iter(|| {
            let mut doc = Document::new();
            let result = build_table(&mut doc, black_box(SMALL_ROWS));
            black_box(result.links.len());
        });
    });
}

fn bench_build_large(c: &mut Criterion) {
    c.bench_function("bench_build_large", |b| {
        b.iter(|| {
            let mut doc = Document::new();
            let result = build_table(&mut doc, black_box(LARGE_ROWS));
            black_box(result.links.len());
        });
    });
}

fn bench_nested_link_merge(c: &mut Criterion) {
    c.bench_function("bench_nested_link_merge", |b| {
        b.iter_batched(
            Document::new,
            |mut doc| {
                let mut current = tag(&mut doc, "span", Some(attrs! { "link" => "leaf" }), content![])
                    .expect("bench leaf");
                for depth in 0..512 {
                    let name = format!("level{depth}");
                    current = tag(&mut doc, "div", Some(attrs! { "link" => name }), content![current])
                        .expect("bench level");
                }
                black_box(current.links.len());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_build_small,
    bench_build_large,
    bench_nested_link_merge
);
criterion_main!(benches);
