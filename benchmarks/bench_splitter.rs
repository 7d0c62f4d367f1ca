use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use linetally::splitter::split;

fn chunk_with_line_len(total: usize, line_len: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(total);
    while buf.len() + line_len < total {
        buf.extend(std::iter::repeat(b'x').take(line_len - 1));
        buf.push(b'\n');
    }
    buf.extend(std::iter::repeat(b'x').take(total - buf.len()));
    buf
}

fn bench_split_short_lines(c: &mut Criterion) {
    let buf = chunk_with_line_len(1024 * 1024, 80);
    c.bench_function("split_1mib_80b_lines", |b| {
        b.iter(|| {
            black_box(split(black_box(&buf)));
        });
    });
}

fn bench_split_long_lines(c: &mut Criterion) {
    // Lines longer than the first search window force the doubling path.
    let buf = chunk_with_line_len(1024 * 1024, 4096);
    c.bench_function("split_1mib_4kib_lines", |b| {
        b.iter(|| {
            black_box(split(black_box(&buf)));
        });
    });
}

fn bench_split_no_terminator(c: &mut Criterion) {
    let buf = vec![b'x'; 1024 * 1024];
    c.bench_function("split_1mib_no_terminator", |b| {
        b.iter(|| {
            black_box(split(black_box(&buf)));
        });
    });
}

criterion_group!(
    benches,
    bench_split_short_lines,
    bench_split_long_lines,
    bench_split_no_terminator
);
criterion_main!(benches);
