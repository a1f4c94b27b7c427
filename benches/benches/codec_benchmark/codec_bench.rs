use std::{hint::black_box, io::Cursor};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fil_core::{DecodeOptions, FilHeader, FilHeaderExt, Filterbank};

fn bench_header() -> FilHeader {
    FilHeader {
        rawfile: "/data/raw/obs_0001.dada".to_string(),
        sourcename: "B0531+21".to_string(),
        telescopeid: 4,
        machineid: 10,
        nchans: 1024,
        nbits: 8,
        nifs: 1,
        nbeams: 1,
        tsamp: 0.000064,
        topfreq: 1550.0,
        chanband: -0.390625,
        tstart: 58000.0,
        datatype: 1,
        ..Default::default()
    }
}

fn header_codec(c: &mut Criterion) {
    let header = bench_header();
    let bytes = header.serialize().unwrap();

    let mut group = c.benchmark_group("header");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("encode", |b| {
        b.iter(|| black_box(&header).serialize().unwrap())
    });
    group.bench_function("decode", |b| {
        b.iter(|| FilHeader::deserialize(black_box(&bytes)).unwrap())
    });

    group.finish();
}

fn file_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("filterbank");

    for nsamps in [1_000usize, 10_000] {
        let header = bench_header();
        let mut raw = header.serialize().unwrap();
        raw.extend(std::iter::repeat(0x5Au8).take(nsamps * header.nchans as usize));

        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::new("load", nsamps), &raw, |b, raw| {
            b.iter(|| {
                Filterbank::from_reader(Cursor::new(raw.as_slice()), &DecodeOptions::default())
                    .unwrap()
            })
        });

        let fil =
            Filterbank::from_reader(Cursor::new(raw.as_slice()), &DecodeOptions::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bench.fil");

        group.bench_with_input(BenchmarkId::new("save", nsamps), &fil, |b, fil| {
            b.iter(|| fil.save(&out).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, header_codec, file_round_trip);
criterion_main!(benches);
