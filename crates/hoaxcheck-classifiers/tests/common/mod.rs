//! Shared fixtures: small fitted bundles written to a temp directory

#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::Path;

/// Vocabulary shared by the fixture bundles
pub const TERMS: [&str; 6] = ["free", "prize", "miracle", "minister", "report", "official"];

/// P(term | REAL) and P(term | HOAX) for each of [`TERMS`]
const REAL_PROBS: [f64; 6] = [0.04, 0.04, 0.02, 0.30, 0.30, 0.30];
const HOAX_PROBS: [f64; 6] = [0.35, 0.25, 0.30, 0.03, 0.04, 0.03];

pub fn vectorizer_artifact(version: &str) -> Value {
    let vocabulary: serde_json::Map<String, Value> = TERMS
        .iter()
        .enumerate()
        .map(|(i, t)| (t.to_string(), json!(i)))
        .collect();

    json!({
        "version": version,
        "vocabulary": vocabulary,
        "idf": [1.5, 1.7, 2.1, 1.2, 1.1, 1.3],
        "ngram_range": [1, 1],
        "norm": "l2",
        "sublinear_tf": false
    })
}

pub fn classifier_artifact(version: &str) -> Value {
    let real: Vec<f64> = REAL_PROBS.iter().map(|p| p.ln()).collect();
    let hoax: Vec<f64> = HOAX_PROBS.iter().map(|p| p.ln()).collect();
    let prior: Vec<f64> = vec![0.55f64.ln(), 0.45f64.ln()];

    json!({
        "version": version,
        "classes": [0, 1],
        "class_log_prior": prior,
        "feature_log_prob": [real, hoax]
    })
}

/// Write both artifacts for `prefix` into `dir`
pub fn write_bundle(dir: &Path, prefix: &str, version: &str) {
    std::fs::write(
        dir.join(format!("tfidf_vectorizer_{prefix}.json")),
        vectorizer_artifact(version).to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.join(format!("model_hoax_{prefix}.json")),
        classifier_artifact(version).to_string(),
    )
    .unwrap();
}

/// Config YAML registering news and social bundles under `dir`
pub fn config_yaml(dir: &Path, top_n: usize) -> String {
    format!(
        r#"
models_dir: {}
top_n: {}
bundles:
  news:
    vectorizer: tfidf_vectorizer_news.json
    classifier: model_hoax_news.json
    version: "2024.1"
  social:
    vectorizer: tfidf_vectorizer_social.json
    classifier: model_hoax_social.json
"#,
        dir.display(),
        top_n
    )
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("hoaxcheck_classifiers=debug")
        .with_test_writer()
        .try_init();
}
