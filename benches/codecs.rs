use criterion::{black_box, criterion_group, criterion_main, Criterion};
use textcodec::compression::{rle, Bwt, Huffman, Lz77, ShannonFano};

fn sample() -> Vec<char> {
    "it was the best of times, it was the worst of times, "
        .repeat(4)
        .chars()
        .collect()
}

fn bench_bwt(c: &mut Criterion) {
    let input = sample();
    let bwt = Bwt::new();
    let last = bwt.transform(&input).unwrap().last_column;

    c.bench_function("bwt_transform", |b| b.iter(|| bwt.transform(black_box(&input))));
    c.bench_function("bwt_transform_indexed", |b| {
        b.iter(|| bwt.transform_indexed(black_box(&input)))
    });
    c.bench_function("bwt_inverse", |b| b.iter(|| bwt.inverse(black_box(&last))));
    c.bench_function("bwt_inverse_lf", |b| b.iter(|| bwt.inverse_lf(black_box(&last))));
}

fn bench_entropy(c: &mut Criterion) {
    let input = sample();
    let text: String = input.iter().collect();

    c.bench_function("rle_encode", |b| b.iter(|| rle::encode(black_box(&text))));
    c.bench_function("huffman_encode", |b| b.iter(|| Huffman.encode(black_box(&input))));
    c.bench_function("shannon_fano_encode", |b| {
        b.iter(|| ShannonFano::new().encode(black_box(&input)))
    });

    let encoded = Huffman.encode(&input).unwrap();
    c.bench_function("huffman_decode", |b| {
        b.iter(|| encoded.table.decode(black_box(&encoded.bits)))
    });
}

fn bench_lz77(c: &mut Criterion) {
    let input = sample();
    let lz = Lz77::new();
    let tokens = lz.encode(&input);

    c.bench_function("lz77_encode", |b| b.iter(|| lz.encode(black_box(&input))));
    c.bench_function("lz77_decode", |b| b.iter(|| lz.decode(black_box(&tokens))));
}

criterion_group!(benches, bench_bwt, bench_entropy, bench_lz77);
criterion_main!(benches);
