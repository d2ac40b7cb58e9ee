//! Encode/decode throughput for bit-packed packets.
//!
//! Buffers are stack arrays reused across iterations, so the numbers reflect
//! cursor arithmetic only.

use bitwire::{BitReader, BitWriter, Bounded, Decode, Encode, WireEnum, from_bytes, to_bytes};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

#[derive(WireEnum, Debug, Clone, Copy, PartialEq)]
enum Kind {
    Telemetry,
    Command,
    Error,
}

#[derive(Encode, Decode, Debug, PartialEq)]
#[wire(tag = Kind::Telemetry)]
struct Telemetry {
    packet_id: u16,
    armed: bool,
    throttle: Bounded<u16, 0, 1000>,
    heading: Bounded<i16, -180, 180>,
    altitude: f32,
    sequence: u32,
}

fn telemetry() -> Telemetry {
    Telemetry {
        packet_id: 42,
        armed: true,
        throttle: Bounded::new(750).unwrap_or_default(),
        heading: Bounded::new(-45).unwrap_or_default(),
        altitude: 120.5,
        sequence: 0x0102_0304,
    }
}

/// Raw bit writes at every width, starting from an unaligned offset.
fn bit_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_widths");

    for nbits in [1u32, 3, 8, 13, 32, 64] {
        let writes = 64u64;
        group.throughput(Throughput::Elements(writes));
        group.bench_with_input(BenchmarkId::new("write", nbits), &nbits, |b, &n| {
            let mut buf = [0u8; 520];
            b.iter(|| {
                let mut writer = BitWriter::new(&mut buf);
                writer.write_bits(0, 3).unwrap();
                for i in 0..writes {
                    writer.write_bits(black_box(i), n).unwrap();
                }
                writer.bit_position()
            });
        });
        group.bench_with_input(BenchmarkId::new("read", nbits), &nbits, |b, &n| {
            let buf = [0xA5u8; 520];
            b.iter(|| {
                let mut reader = BitReader::new(&buf);
                reader.read_bits(3).unwrap();
                let mut acc = 0u64;
                for _ in 0..writes {
                    acc ^= reader.read_bits(n).unwrap();
                }
                black_box(acc)
            });
        });
    }
    group.finish();
}

/// Whole packets through the derived impls.
fn packets(c: &mut Criterion) {
    let mut group = c.benchmark_group("packets");
    let packet = telemetry();
    group.throughput(Throughput::Bytes(
        <Telemetry as Encode>::MIN_BITS.div_ceil(8) as u64,
    ));

    group.bench_function("encode_telemetry", |b| {
        let mut buf = [0u8; 32];
        b.iter(|| to_bytes(black_box(&packet), &mut buf).unwrap());
    });

    let mut encoded = [0u8; 32];
    let used = to_bytes(&packet, &mut encoded).unwrap_or(0);
    group.bench_function("decode_telemetry", |b| {
        b.iter(|| from_bytes::<Telemetry>(black_box(&encoded[..used])).unwrap());
    });

    group.bench_function("peek_kind", |b| {
        b.iter(|| {
            let mut reader = BitReader::new(black_box(&encoded[..used]));
            reader.peek::<Kind>().unwrap()
        });
    });
    group.finish();
}

/// Length-prefixed blobs of growing size.
fn blobs(c: &mut Criterion) {
    let mut group = c.benchmark_group("blobs");

    for len in [16usize, 256, 4096] {
        let payload = vec![0x5Au8; len];
        let mut buf = vec![0u8; len + 4];
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("write_read", len), &len, |b, _| {
            b.iter(|| {
                let mut writer = BitWriter::new(buf.as_mut_slice());
                writer.write_bool(true).unwrap();
                writer.write_blob(black_box(&payload)).unwrap();

                let mut reader = BitReader::new(buf.as_slice());
                reader.read_bool().unwrap();
                reader.read_blob_slice().unwrap().len()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bit_widths, packets, blobs);
criterion_main!(benches);
