//! Benchmarks for GFF3 tokenizing and parsing
//!
//! Run with: cargo bench --bench gff_parsing

use biogff::formats::gff::{GffReader, TokenKind, Tokenizer};
use biogff::GffWriter;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Generate a synthetic GFF3 document with `features` feature lines
fn generate_document(features: usize) -> String {
    let mut doc = String::from("##gff-version 3\n##sequence-region chr1 1 250000000\n");
    for i in 0..features {
        let start = 1 + i * 1_000;
        let (kind, phase) = match i % 3 {
            0 => ("gene", "."),
            1 => ("mRNA", "."),
            _ => ("CDS", "0"),
        };
        doc.push_str(&format!(
            "chr1\tbench\t{}\t{}\t{}\t.\t{}\t{}\tID=f{};Name=feature{}\n",
            kind,
            start,
            start + 899,
            if i % 2 == 0 { "+" } else { "-" },
            phase,
            i,
            i
        ));
    }
    doc
}

/// Benchmark raw tokenization
fn bench_tokenizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer");

    for size in [100, 1_000, 10_000].iter() {
        let doc = generate_document(*size);

        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut tokenizer = Tokenizer::new(black_box(doc.as_bytes()));
                let mut count = 0usize;
                while tokenizer.next_token().unwrap().kind != TokenKind::Eof {
                    count += 1;
                }
                count
            })
        });
    }

    group.finish();
}

/// Benchmark full parsing through the state machine
fn bench_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("reader");

    for size in [100, 1_000, 10_000].iter() {
        let doc = generate_document(*size);

        group.throughput(Throughput::Elements(*size as u64 + 2));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                GffReader::new(black_box(doc.as_bytes()))
                    .map(|element| element.unwrap())
                    .count()
            })
        });
    }

    group.finish();
}

/// Benchmark parse-then-serialize into memory
fn bench_roundtrip(c: &mut Criterion) {
    let doc = generate_document(1_000);

    c.bench_function("roundtrip_1000", |b| {
        b.iter(|| {
            let mut writer = GffWriter::from_writer(Box::new(std::io::sink()));
            writer
                .write_all(GffReader::new(black_box(doc.as_bytes())))
                .unwrap();
            writer.finish().unwrap();
        })
    });
}

criterion_group!(benches, bench_tokenizer, bench_reader, bench_roundtrip);
criterion_main!(benches);
