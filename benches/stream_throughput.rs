use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::io::Cursor;

use minibuf::Stream;

#[inline]
fn xorshift64(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

#[inline]
fn incompressible_ascii(len: usize, seed: u64) -> String {
    const ALPH: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut s = String::with_capacity(len);
    let mut x = seed;
    for _ in 0..len {
        x = xorshift64(x);
        s.push(ALPH[(x as usize) & 63] as char);
    }
    s
}

/// One record is ~250 wire bytes: three scalars plus a ~232-byte string.
fn encode_records(n: u64, text: &str) -> Vec<u8> {
    let mut chan = Cursor::new(Vec::new());
    let mut s = Stream::new(&mut chan);
    for i in 0..n {
        s.write(i).unwrap();
        s.write(i as u32).unwrap();
        s.write(i as f64).unwrap();
        s.write_str(text).unwrap();
    }
    drop(s);
    chan.into_inner()
}

fn bench_stream(c: &mut Criterion) {
    let n: u64 = 100_000;
    let text = incompressible_ascii(232, 0x5EED);

    let mut group = c.benchmark_group("stream_250B_records");
    group.sample_size(20);
    group.throughput(Throughput::Elements(n));

    group.bench_with_input(BenchmarkId::from_parameter("encode"), &n, |b, &n| {
        b.iter(|| encode_records(n, &text));
    });

    let raw = encode_records(n, &text);
    group.throughput(Throughput::Bytes(raw.len() as u64));
    group.bench_with_input(BenchmarkId::from_parameter("decode"), &raw, |b, raw| {
        b.iter(|| {
            let mut chan = Cursor::new(raw.as_slice());
            let mut s = Stream::new(&mut chan);
            let mut sink = 0u64;
            for _ in 0..n {
                sink = sink.wrapping_add(s.read::<u64>().unwrap());
                let _ = s.read::<u32>().unwrap();
                let _ = s.read::<f64>().unwrap();
                sink = sink.wrapping_add(s.read_string().unwrap().len() as u64);
            }
            sink
        });
    });

    group.finish();
}

criterion_group!(benches, bench_stream);
criterion_main!(benches);
