use criterion::{Criterion, black_box, criterion_group, criterion_main};
use saju_core::{BirthInput, analyze, analyze_elements, convert, score_local};

fn bench_convert(c: &mut Criterion) {
    c.bench_function("convert", |b| {
        b.iter(|| convert(black_box(1990), black_box(5), black_box(15), black_box(12)))
    });
}

fn bench_relations(c: &mut Criterion) {
    let a = convert(1990, 5, 15, 12).unwrap();
    let other = convert(1992, 8, 20, 9).unwrap();

    c.bench_function("analyze_afflictions", |b| {
        b.iter(|| analyze(black_box(&a), black_box(&other)))
    });
    c.bench_function("analyze_elements", |b| {
        b.iter(|| analyze_elements(black_box(&a), black_box(&other)))
    });
}

fn bench_score_local(c: &mut Criterion) {
    let a = BirthInput::new("1990-05-15")
        .with_time("14:30")
        .with_name("김철수")
        .with_gender("남");
    let b = BirthInput::new("1992-08-20")
        .with_time("09:00")
        .with_name("이영희")
        .with_gender("여");

    c.bench_function("score_local", |bench| {
        bench.iter(|| score_local(black_box(&a), black_box(&b)))
    });
}

criterion_group!(benches, bench_convert, bench_relations, bench_score_local);
criterion_main!(benches);
