//! Throughput of the anonymiser and the Frame Streams decoder.
//!
//! Run with: `cargo bench --bench anonymise`

use std::convert::Infallible;
use std::io::Cursor;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use capture_core::prelude::*;

fn anonymiser() -> PseudoAnonymiser {
    PseudoAnonymiser::new(AnonymisationKey::new(*b"bench-key-000001"))
}

/// OPT RDATA with a cookie and one /24 client-subnet option.
fn opt_rdata() -> Vec<u8> {
    let mut rdata = vec![0, 10, 0, 8, 1, 2, 3, 4, 5, 6, 7, 8];
    rdata.extend_from_slice(&[0, 8, 0, 7, 0, 1, 24, 0, 198, 51, 100]);
    rdata
}

fn session(frames: usize, payload_len: usize) -> Vec<u8> {
    let mut w = FrameStreamWriter::new(Vec::new());
    let payload = vec![0x5Au8; payload_len];
    w.start().expect("write START");
    for _ in 0..frames {
        w.write_data(&payload).expect("write data frame");
    }
    w.stop().expect("write STOP")
}

fn bench_addresses(c: &mut Criterion) {
    let anon = anonymiser();
    let v4 = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));
    let v6 = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0x53));
    let rdata = opt_rdata();

    let mut group = c.benchmark_group("anonymise");
    group.throughput(Throughput::Elements(1));
    group.bench_function("ipv4", |b| b.iter(|| anon.address(black_box(v4))));
    group.bench_function("ipv6", |b| b.iter(|| anon.address(black_box(v6))));
    group.bench_function("opt_rdata", |b| b.iter(|| anon.opt_rdata(black_box(&rdata))));
    group.finish();
}

fn bench_key_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdf");
    group.sample_size(10);
    group.bench_function("pbkdf2_sha1_50k", |b| {
        b.iter(|| derive_key(black_box(b"passphrase"), black_box(b"cdnscdnscdnscdns")))
    });
    group.finish();
}

fn bench_decoder(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for payload_len in [64usize, 512, 4096] {
        let input = session(1000, payload_len);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(payload_len), &input, |b, input| {
            b.iter(|| {
                let mut stream = DuplexStream::read_only(Cursor::new(input.as_slice()));
                let mut decoder = FrameStreamDecoder::new(|p: Bytes| -> Result<usize, Infallible> {
                    Ok(p.len())
                });
                let mut total = 0usize;
                let mut sink = |n: usize| -> Result<(), Infallible> {
                    total += n;
                    Ok(())
                };
                let _ = decoder.process(&mut stream, &mut sink);
                black_box(total)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_addresses, bench_key_derivation, bench_decoder);
criterion_main!(benches);
