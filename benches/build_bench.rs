use criterion::{criterion_group, criterion_main, Criterion, black_box};
use puzzle_eval::{build_examples, PuzzleRecord};

fn bench_build(c: &mut Criterion) {
    let rec = PuzzleRecord::new(
        "scholars",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"],
    );
    c.bench_function("build_examples_7_plies", |ben| {
        ben.iter(|| {
            let v = build_examples(black_box(&rec), None);
            black_box(v)
        })
    });
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
