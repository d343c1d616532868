use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gcode_minifier::parser::{parse_line, tokenize_line};
use std::hint::black_box;

/// Generate G-code content of different patterns for benchmarking
fn generate_gcode_content(lines: usize, pattern: &str) -> String {
    let mut content = String::new();

    match pattern {
        "movement_heavy" => {
            for i in 0..lines {
                content.push_str(&format!(
                    "G1 X{:.3} Y{:.3} Z{:.3} E{:.5} F1500\n",
                    (i as f32) * 0.1,
                    (i as f32) * 0.2,
                    (i / 100) as f32 * 0.2,
                    0.02
                ));
            }
        }
        "comment_heavy" => {
            for i in 0..lines {
                content.push_str(&format!(
                    "G1 X{:.1} Y{:.1} ; Move to position {}, layer {}\n",
                    (i as f32) * 0.1,
                    (i as f32) * 0.1,
                    i,
                    i / 100
                ));
            }
        }
        _ => {
            for i in 0..lines {
                match i % 4 {
                    0 => content.push_str(&format!(
                        "G1 X{:.3} Y{:.3} F1500\n",
                        (i as f32) * 0.1,
                        (i as f32) * 0.2
                    )),
                    1 => content.push_str(&format!("; Layer {}\n", i / 4)),
                    2 => content.push_str(&format!("M104 S{}\n", 200 + (i % 50))),
                    _ => content.push_str(&format!("G0 Z{:.2}\n", (i as f32) * 0.1)),
                }
            }
        }
    }

    content
}

/// Benchmark parsing single lines with different shapes
fn bench_single_line_parsing(c: &mut Criterion) {
    let test_lines = vec![
        ("simple_move", "G1 X10 Y20"),
        ("complex_move", "G1 X123.456 Y789.012 Z0.3 E2.85714 F1500"),
        ("parameter_heavy", "M851 X1.23 Y-2.45 Z0.67 I1 J2 P3 S4 T5"),
        ("with_comment", "G1 X10 Y20 ; Move to next position"),
        (
            "comment_only",
            "; This is a comment line with some detailed information",
        ),
        ("string_params", r#"M587 S"Network_SSID" P"Network_Password""#),
    ];

    let mut group = c.benchmark_group("single_line_parsing");

    for (name, line) in test_lines {
        group.bench_with_input(BenchmarkId::new("parse_line", name), &line, |b, line| {
            b.iter(|| black_box(parse_line(black_box(line))))
        });
    }

    group.finish();
}

/// Benchmark parsing throughput (bytes per second)
fn bench_parsing_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing_throughput");

    for &size in &[1_000, 10_000, 100_000] {
        for pattern in ["movement_heavy", "comment_heavy", "mixed"] {
            let content = generate_gcode_content(size, pattern);

            group.throughput(Throughput::Bytes(content.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(pattern, size),
                &content,
                |b, content| {
                    b.iter(|| {
                        let parsed = content
                            .lines()
                            .filter_map(|line| parse_line(black_box(line)).ok())
                            .count();
                        black_box(parsed)
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark tokenization performance separately
fn bench_tokenization(c: &mut Criterion) {
    let test_lines = vec![
        ("simple", "G1 X10 Y20"),
        (
            "complex",
            "G1 X123.456 Y789.012 Z0.3 E2.85714 F1500 ; Complex move",
        ),
        (
            "many_params",
            "M851 X1.23 Y-2.45 Z0.67 I1 J2 P3 S4 T5 U6 V7 W8",
        ),
    ];

    let mut group = c.benchmark_group("tokenization");

    for (name, line) in test_lines {
        group.bench_with_input(BenchmarkId::new("tokenize", name), &line, |b, line| {
            b.iter(|| black_box(tokenize_line(black_box(line)).len()))
        });
    }

    group.finish();
}

criterion_group!(
    parsing_benches,
    bench_single_line_parsing,
    bench_parsing_throughput,
    bench_tokenization
);

criterion_main!(parsing_benches);
