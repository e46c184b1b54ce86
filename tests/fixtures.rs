#![allow(dead_code, reason = "each test binary uses a different subset")]

use mustype::TemplateParams;
use rand::Rng;
use serde_json::Value;

/// Converts a `serde_json::json!` literal into render input.
pub fn params(value: Value) -> TemplateParams {
    match value {
        Value::Null => TemplateParams::Null,
        Value::Bool(b) => TemplateParams::Bool(b),
        Value::Number(n) => TemplateParams::Number(n.as_f64().unwrap_or_default()),
        Value::String(s) => TemplateParams::String(s),
        Value::Array(items) => TemplateParams::Seq(items.into_iter().map(params).collect()),
        Value::Object(map) => map.into_iter().map(|(k, v)| (k, params(v))).collect(),
    }
}

pub fn generate_random_whitespace() -> String {
    let mut rng = rand::rng();
    let length = rng.random_range(0..10);
    (0..length).map(|_| ' ').collect()
}

pub fn generate_random_whitespace_at_least_one() -> String {
    let mut rng = rand::rng();
    let length = rng.random_range(1..10);
    (0..length).map(|_| ' ').collect()
}
