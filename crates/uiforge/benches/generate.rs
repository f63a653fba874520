//! Generation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use uiforge::{GenerateOptions, Generator};

fn login() -> Value {
    json!({
        "schema_version": "1.0",
        "screen": { "name": "login" },
        "elements": [
            { "kind": "text", "text": "Welcome back" },
            { "kind": "text_field", "hint": "email" },
            { "kind": "text_field", "hint": "password", "secure": true },
            { "kind": "button", "label": "Continue" }
        ]
    })
}

fn form(rows: usize) -> Value {
    let elements: Vec<Value> = (0..rows)
        .map(|i| {
            json!({
                "kind": "container",
                "direction": "row",
                "children": [
                    { "kind": "text", "text": format!("Field {}", i) },
                    { "kind": "text_field", "hint": format!("value {}", i) }
                ]
            })
        })
        .collect();
    json!({
        "schema_version": "1.0",
        "screen": { "name": "form" },
        "elements": elements
    })
}

fn validate_login(c: &mut Criterion) {
    let generator = Generator::with_defaults(GenerateOptions::default());
    let ir = login();
    c.bench_function("validate_login", |b| {
        b.iter(|| generator.validate(black_box(&ir)))
    });
}

fn render_targets(c: &mut Criterion) {
    let generator = Generator::with_defaults(GenerateOptions::new().verify_determinism(false));
    let model = generator.validate(&form(50)).unwrap();
    for target in ["web", "react", "flutter"] {
        c.bench_function(&format!("render_form_{}", target), |b| {
            b.iter(|| generator.render(black_box(&model), target))
        });
    }
}

criterion_group!(benches, validate_login, render_targets);
criterion_main!(benches);
