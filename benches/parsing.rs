use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use gitrefs::git::parser::{parse_diff_stat, parse_show_ref, ref_short_name};

const SMALL_STAT: &str = " file_a.txt | 3 +--
 file_b.bin | Bin 100 -> 200 bytes
 src/lib.rs | 12 ++++++++----
 3 files changed, 9 insertions(+), 6 deletions(-)
";

fn generate_stat(num_files: usize) -> String {
    let mut output = String::new();
    for i in 0..num_files {
        if i % 10 == 0 {
            output.push_str(&format!(" assets/image_{}.png | Bin 0 -> {} bytes\n", i, i * 64));
        } else {
            output.push_str(&format!(" src/module_{}/file_{}.rs | {} ++--\n", i / 10, i, i % 40));
        }
    }
    output.push_str(&format!(" {} files changed, 1234 insertions(+), 567 deletions(-)\n", num_files));
    output
}

fn generate_show_ref(num_refs: usize) -> String {
    let mut output = String::new();
    for i in 0..num_refs {
        let kind = if i % 4 == 0 { "tags/v0." } else { "heads/branch-" };
        output.push_str(&format!("{:040x} refs/{}{}\n", i, kind, i));
    }
    output
}

fn bench_parse_diff_stat(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_diff_stat");

    group.bench_with_input(BenchmarkId::new("small", "3 files"), &SMALL_STAT, |b, input| {
        b.iter(|| parse_diff_stat(black_box(input)))
    });

    for size in [100, 1000] {
        let stat = generate_stat(size);
        group.bench_with_input(BenchmarkId::new("files", size), &stat, |b, input| {
            b.iter(|| parse_diff_stat(black_box(input)))
        });
    }

    group.finish();
}

fn bench_parse_show_ref(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_show_ref");

    for size in [10, 500, 5000] {
        let refs = generate_show_ref(size);
        group.bench_with_input(BenchmarkId::new("refs", size), &refs, |b, input| {
            b.iter(|| parse_show_ref(black_box(input)))
        });
    }

    group.finish();
}

fn bench_ref_short_name(c: &mut Criterion) {
    c.bench_function("ref_short_name", |b| {
        b.iter(|| {
            ref_short_name(black_box("refs/heads/feature/login"));
            ref_short_name(black_box("refs/tags/v1.0.0"));
            ref_short_name(black_box("refs/remotes/origin/main"));
        })
    });
}

criterion_group!(
    benches,
    bench_parse_diff_stat,
    bench_parse_show_ref,
    bench_ref_short_name
);
criterion_main!(benches);
