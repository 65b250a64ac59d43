use serde::Deserialize;
use std::fs;
use std::path::Path;

use mrkdwn_core::{has_markup_tokens, render};

#[derive(Debug, Deserialize)]
struct RenderCase {
    name: String,
    source: String,
    html: String,
    #[serde(default)]
    gate: Option<bool>,
}

#[test]
fn render_cases() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let cases_path = root.join("tests/cases/render.json");
    let json = fs::read_to_string(&cases_path).expect("Failed to read render.json");
    let cases: Vec<RenderCase> = serde_json::from_str(&json).expect("Failed to parse render.json");

    let mut failures = Vec::new();
    for case in &cases {
        let actual = render(&case.source);
        if actual != case.html {
            failures.push(format!(
                "{}\n  source:   {:?}\n  expected: {:?}\n  actual:   {:?}",
                case.name, case.source, case.html, actual
            ));
        }
        if let Some(gate) = case.gate {
            if has_markup_tokens(&case.source) != gate {
                failures.push(format!("{}: gate should be {}", case.name, gate));
            }
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} cases failed:\n{}",
        failures.len(),
        cases.len(),
        failures.join("\n")
    );
}
