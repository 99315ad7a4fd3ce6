//! Performance benchmarks for ferrolink
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Sample note texts of various shapes
mod samples {
    pub const PLAIN: &str = "A short note with no links in it at all, just prose. \
        Nothing here should trigger the scanner beyond a stray comma.";

    pub const LINK_HEAVY: &str = "Standup notes: see http://example.com/sprint?id=42 and \
        ping ops@example.com about www.internal.example.org (also ftp.example.com). \
        Dashboard lives at 192.168.0.1/status, backup at https://backup.example.net/daily. \
        Old thread: irc.freenode.net and mailto:oncall@example.com for escalations.";

    pub const TRIGGER_HEAVY: &str = "v1.2.3 released at 14:30: fixed a.b.c regressions, \
        bumped deps 0.9.1, 2.0.0-rc.1, and 3.11; ratio went from 1.5:1 to 2.3:1. \
        See CHANGELOG section 4.2.1 for details. e.g. i.e. etc.";

    pub fn mixed(repeats: usize) -> String {
        let mut out = String::new();
        for i in 0..repeats {
            out.push_str(PLAIN);
            out.push('\n');
            out.push_str(LINK_HEAVY);
            out.push('\n');
            out.push_str(TRIGGER_HEAVY);
            out.push('\n');
            out.push_str(&format!("item {i}: www.example{i}.com.\n"));
        }
        out
    }
}

fn bench_linkify(c: &mut Criterion) {
    let mut group = c.benchmark_group("linkify");

    for (name, text) in [
        ("plain", samples::PLAIN.to_owned()),
        ("link_heavy", samples::LINK_HEAVY.to_owned()),
        ("trigger_heavy", samples::TRIGGER_HEAVY.to_owned()),
        ("mixed_50", samples::mixed(50)),
    ] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| ferrolink::linkify(black_box(text)));
        });
    }

    group.finish();
}

fn bench_chunks(c: &mut Criterion) {
    let text = samples::mixed(50);
    let mut group = c.benchmark_group("chunks");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("mixed_50", |b| {
        b.iter(|| ferrolink::chunks(black_box(&text), &ferrolink::TrailingPunctuation::Default));
    });
    group.finish();
}

criterion_group!(benches, bench_linkify, bench_chunks);
criterion_main!(benches);
