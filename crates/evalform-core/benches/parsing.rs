use criterion::{black_box, criterion_group, criterion_main, Criterion};

use evalform_core::parser::{parse_action_script_str, parse_form_str, FormFormat};

fn bench_form_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("form_parsing");

    let small = generate_form_toml(4);
    let medium = generate_form_toml(40);
    let large = generate_form_toml(200);

    group.bench_function("4_questions", |b| {
        b.iter(|| {
            parse_form_str(
                black_box(&small),
                FormFormat::Toml,
                black_box("bench.toml".as_ref()),
            )
        })
    });

    group.bench_function("40_questions", |b| {
        b.iter(|| {
            parse_form_str(
                black_box(&medium),
                FormFormat::Toml,
                black_box("bench.toml".as_ref()),
            )
        })
    });

    group.bench_function("200_questions", |b| {
        b.iter(|| {
            parse_form_str(
                black_box(&large),
                FormFormat::Toml,
                black_box("bench.toml".as_ref()),
            )
        })
    });

    group.finish();
}

fn bench_script_parsing(c: &mut Criterion) {
    let script = generate_script_toml(100);
    c.bench_function("action_script_100", |b| {
        b.iter(|| parse_action_script_str(black_box(&script), black_box("bench.toml".as_ref())))
    });
}

fn generate_form_toml(n: usize) -> String {
    let mut s = String::from(
        r#"formName = "Benchmark"
categories = ["IT", "HR", "Finance", "Marketing"]
severity = "Support"
scoringBand = [40.0, 80.0]
"#,
    );
    let categories = ["IT", "HR", "Finance", "Marketing"];
    for i in 0..n {
        let category = categories[i % categories.len()];
        s.push_str(&format!(
            r#"
[[questions]]
text = "Question {i}"
category = "{category}"
categoryWeight = 10.0

[[questions.answers]]
type = "range"
answerText = "Good"
answerValue = "{i}"

[[questions.answers]]
type = "comment"
"#
        ));
    }
    s
}

fn generate_script_toml(n: usize) -> String {
    let mut s = String::from(
        r#"[[actions]]
type = "select_categories"
categories = ["IT"]
"#,
    );
    for i in 0..n {
        s.push_str(&format!(
            r#"
[[actions]]
type = "set_category_weight"
index = 0
weight = {}.0
"#,
            i % 100
        ));
    }
    s
}

criterion_group!(benches, bench_form_parsing, bench_script_parsing);
criterion_main!(benches);
