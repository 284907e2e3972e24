use criterion::{Criterion, criterion_group, criterion_main};
use marginalia_engine::editing::{Cmd, Document};
use marginalia_engine::parsing::parse_highlights;
use marginalia_engine::render::HighlightField;

fn generate_annotated_notes(paragraphs: usize) -> String {
    let base = "# Notes\n\nSome ==important idea==<!--follow up on this--> sits next to a ==bare mark== and plain prose.\n\nA line with no markup at all, just words and an equals sign = here.\n\n";
    base.repeat(paragraphs)
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(20);

    let content = generate_annotated_notes(200);
    group.bench_function("parse_highlights", |b| {
        b.iter(|| {
            let matches = parse_highlights(std::hint::black_box(&content));
            std::hint::black_box(matches);
        });
    });

    group.finish();
}

fn bench_revalidation(c: &mut Criterion) {
    let mut group = c.benchmark_group("revalidation");
    group.sample_size(20);

    let content = generate_annotated_notes(200);
    group.bench_function("insert_and_recompute", |b| {
        b.iter_batched(
            || {
                let doc = Document::from_text(&content);
                let field = HighlightField::new(doc.rope());
                (doc, field)
            },
            |(mut doc, mut field)| {
                let patch = doc.apply(Cmd::InsertText {
                    at: 0,
                    text: "x".to_string(),
                });
                field.update(&patch, doc.rope());
                std::hint::black_box(field);
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_revalidation);
criterion_main!(benches);
