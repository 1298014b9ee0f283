//! Internal unit-style property test (compiled to WASM) that pins the body
//! normalization invariants for arbitrary compose input.

#![cfg(test)]

use proptest::prelude::*;
use wasm_bindgen_test::*;

use crate::models::BodyType;
use crate::submission::normalize_body;

// Make wasm-bindgen execute the tests in a headless browser when available.
wasm_bindgen_test_configure!(run_in_browser);

fn runner() -> proptest::test_runner::TestRunner {
    proptest::test_runner::TestRunner::new(proptest::test_runner::Config {
        cases: 64,
        // No filesystem in the browser harness.
        failure_persistence: None,
        ..proptest::test_runner::Config::default()
    })
}

/// Multi-line text without any markup, the common compose-box input.
fn plain_body_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-zA-Z0-9 .,!?'-]{0,40}", 0..6).prop_map(|lines| lines.join("\n"))
}

#[wasm_bindgen_test]
fn normalization_invariants_fuzz() {
    runner()
        .run(&plain_body_strategy(), |body| {
            // Plain mode never rewrites anything.
            prop_assert_eq!(normalize_body(&body, BodyType::Plain), body.clone());

            // HTML mode always yields a full document with <br> line breaks.
            let wrapped = normalize_body(&body, BodyType::Html);
            prop_assert!(wrapped.starts_with("<!DOCTYPE html>"));
            prop_assert!(wrapped.contains("<meta charset=\"UTF-8\">"));
            prop_assert!(wrapped.contains(&body.replace('\n', "<br>")));
            Ok(())
        })
        .unwrap();
}

#[wasm_bindgen_test]
fn already_wrapped_documents_pass_through_fuzz() {
    let strategy = plain_body_strategy()
        .prop_map(|inner| format!("<html><body>{}</body></html>", inner.replace('\n', " ")));

    runner()
        .run(&strategy, |document| {
            prop_assert_eq!(normalize_body(&document, BodyType::Html), document.clone());
            Ok(())
        })
        .unwrap();
}
