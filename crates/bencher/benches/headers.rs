use std::hint::black_box;
use bencher::{TestCase, TestFile};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use micro_headers::protocol::{LineLimit, MessageHeaders};

static SMALL_HEADER: TestFile = TestFile::new("http_small.txt", include_bytes!("../resources/headers/http_small.txt"));
static LARGE_HEADER: TestFile = TestFile::new("sip_large.txt", include_bytes!("../resources/headers/sip_large.txt"));

fn create_test_cases() -> Vec<TestCase> {
    vec![
        TestCase::small("small_header", SMALL_HEADER),
        TestCase::large("large_header", LARGE_HEADER),
        TestCase::large("large_header_folded", LARGE_HEADER).with_line_limit(78),
    ]
}

fn benchmark_parse(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("parse");

    // folding only matters on the generate side
    for case in create_test_cases().into_iter().filter(|case| case.line_limit() == 0) {
        group.throughput(Throughput::Bytes(case.file().content().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &case, |b, case| {
            b.iter_batched_ref(
                MessageHeaders::new,
                |headers| {
                    let body_offset = headers.parse(case.file().content()).expect("input should be a valid header block");
                    black_box(body_offset);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_generate(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("generate");

    for case in create_test_cases() {
        let mut headers = MessageHeaders::new();
        headers.parse(case.file().content()).expect("input should be a valid header block");
        headers.set_line_limit(LineLimit::new(case.line_limit()));

        group.throughput(Throughput::Bytes(case.file().content().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &headers, |b, headers| {
            b.iter(|| black_box(headers.generate().expect("headers should fold within the limit")));
        });
    }

    group.finish();
}

criterion_group!(headers, benchmark_parse, benchmark_generate);
criterion_main!(headers);
