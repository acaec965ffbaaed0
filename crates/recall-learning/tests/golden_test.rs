//! Extraction golden cases.

use serde_json::Value;

use recall_learning::{denylist, extract_learnable_terms};

fn strings(v: &Value) -> Vec<String> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn extraction_matches_golden_cases() {
    let golden = test_fixtures::load_fixture_value("golden/learning/extraction_cases.json");
    let cases = golden["cases"].as_array().unwrap();
    assert!(!cases.is_empty());

    for case in cases {
        let name = case["name"].as_str().unwrap();
        let got = extract_learnable_terms(
            &strings(&case["query_terms"]),
            &strings(&case["existing"]),
            denylist(),
        );
        assert_eq!(got, strings(&case["expected"]), "{name}");
    }
}
