extern crate criterion;
extern crate lzw12;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lzw12::decode::Decoder;
use lzw12::encode::Encoder;

fn xorshift_bytes(len: usize) -> Vec<u8> {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 32) as u8
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion, name: &str, data: Vec<u8>) {
    let mut group = c.benchmark_group("encode-12");
    let id = BenchmarkId::new(name, data.len());
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_with_input(id, &data, |b, data| {
        b.iter(|| {
            let mut packed = Vec::with_capacity(data.len() * 3 / 2 + 3);
            let result = Encoder::new().encode(data.as_slice(), &mut packed);
            result.status.expect("Error");
            black_box(&packed);
        })
    });
    group.finish();

    let mut packed = vec![];
    Encoder::new()
        .encode(data.as_slice(), &mut packed)
        .status
        .expect("Error");

    let mut group = c.benchmark_group("decode-12");
    let id = BenchmarkId::new(name, packed.len());
    group.throughput(Throughput::Bytes(packed.len() as u64));
    group.bench_with_input(id, &packed, |b, packed| {
        b.iter(|| {
            let mut out = Vec::with_capacity(1 << 17);
            let result = Decoder::new().decode(packed.as_slice(), &mut out);
            result.status.expect("Error");
            black_box(&out);
        })
    });
    group.finish();
}

pub fn bench_repetitive(c: &mut Criterion) {
    let data = b"abcd".iter().copied().cycle().take(1 << 16).collect();
    criterion_benchmark(c, "repetitive", data);
}

pub fn bench_random(c: &mut Criterion) {
    criterion_benchmark(c, "random", xorshift_bytes(1 << 16));
}

pub fn bench_text(c: &mut Criterion) {
    let data = include_bytes!("../src/encode.rs")
        .iter()
        .copied()
        .cycle()
        .take(1 << 16)
        .collect();
    criterion_benchmark(c, "text", data);
}

criterion_group!(benches, bench_repetitive, bench_random, bench_text);
criterion_main!(benches);
