// SPDX-License-Identifier: Apache-2.0

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flotilla_model::{PublisherKey, RecordId, RepoAnnouncement, SourceUrl};

fn bench_source_url_parse(c: &mut Criterion) {
    c.bench_function("source_url_parse", |b| {
        b.iter(|| SourceUrl::parse(black_box("wss://relay.example/")).expect("source url"))
    });
}

fn bench_content_digest(c: &mut Criterion) {
    let record = RepoAnnouncement::new(
        RecordId::parse(&"a".repeat(64)).expect("record id"),
        PublisherKey::parse(&"b".repeat(64)).expect("publisher"),
        "flotilla",
        1_700_000_000,
    )
    .with_summary("multi-source browsing for decentralized repositories");
    c.bench_function("announcement_content_digest", |b| {
        b.iter(|| black_box(&record).content_digest().expect("digest"))
    });
}

criterion_group!(benches, bench_source_url_parse, bench_content_digest);
criterion_main!(benches);
