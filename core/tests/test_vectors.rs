//! Verify `RequestSpec::prepare` against JSON test vectors stored in `test-vectors/`.
//!
//! Each case describes a request spec and the exact wire form expected from
//! it: method, URL, headers in send order and body.

use rest_client::{HttpMethod, RequestSpec};

const BASE_URL: &str = "http://localhost:3000";

fn headers(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

#[test]
fn prepare_test_vectors() {
    let raw = include_str!("../../test-vectors/prepare.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let expected = &case["expected_request"];

        let method: HttpMethod = serde_json::from_value(input["method"].clone()).unwrap();
        let mut spec = RequestSpec::new(method, &format!("{BASE_URL}{}", input["path"].as_str().unwrap()));
        for (k, v) in headers(&input["headers"]) {
            spec = spec.with_header(&k, &v);
        }
        if let Some(body) = input["body"].as_str() {
            spec = spec.with_body(body);
        }

        let req = spec.prepare();
        let expected_method: HttpMethod = serde_json::from_value(expected["method"].clone()).unwrap();
        assert_eq!(req.method, expected_method, "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.headers, headers(&expected["headers"]), "{name}: headers");
        assert_eq!(
            req.body.as_deref(),
            expected["body"].as_str().map(str::as_bytes),
            "{name}: body"
        );
    }
}
