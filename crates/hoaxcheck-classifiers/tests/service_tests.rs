//! End-to-end tests: config file → registry → service

mod common;

use hoaxcheck_classifiers::{
    init_registry_from_config, BundleRegistry, ClassificationService, ClassifierConfig,
    InfluentialTermExtractor,
};
use hoaxcheck_core::{Domain, Error, Label};
use std::sync::Arc;
use std::thread;

fn service_in(dir: &std::path::Path) -> ClassificationService {
    common::write_bundle(dir, "news", "2024.1");
    common::write_bundle(dir, "social", "2024.1");

    let config = ClassifierConfig::from_yaml(&common::config_yaml(dir, 3)).unwrap();
    let registry = init_registry_from_config(&config);
    ClassificationService::with_extractor(
        Arc::new(registry),
        InfluentialTermExtractor::new(config.top_n),
    )
    .unwrap()
}

#[test]
fn test_hoax_and_real_texts() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    let hoax = service
        .evaluate("MIRACLE cure!!! Claim your FREE prize at www.scam.example", Domain::Social, false)
        .unwrap();
    assert_eq!(hoax.result.label, Label::Hoax);
    assert!(hoax.result.confidence() > 0.5);

    let real = service
        .evaluate("The minister published the official report on 12 May.", Domain::News, false)
        .unwrap();
    assert_eq!(real.result.label, Label::Real);
    assert_eq!(real.rendered_text, "the minister published the official report on may");
}

#[test]
fn test_highlights_use_configured_top_n() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    let evaluation = service
        .evaluate("free free prize miracle minister", Domain::News, true)
        .unwrap();

    assert_eq!(evaluation.result.label, Label::Hoax);
    let terms: Vec<_> = evaluation
        .influential_terms
        .iter()
        .map(|t| t.term.as_str())
        .collect();
    assert_eq!(terms, vec!["free", "miracle", "prize"]);
    assert!(evaluation
        .influential_terms
        .windows(2)
        .all(|w| w[0].weight >= w[1].weight));
    assert_eq!(
        evaluation.rendered_text,
        "<span class=\"supports-hoax\">free</span> <span class=\"supports-hoax\">free</span> \
         <span class=\"supports-hoax\">prize</span> <span class=\"supports-hoax\">miracle</span> minister"
    );
}

#[test]
fn test_probabilities_are_well_formed() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    let inputs = [
        "free",
        "minister report",
        "nothing in the vocabulary",
        "!!!",
        "free free free free free free free free free free free free free free",
        "official official miracle prize report",
    ];

    for input in inputs {
        for domain in Domain::ALL {
            let r = service.evaluate(input, domain, false).unwrap().result;
            assert!((0.0..=1.0).contains(&r.probability_real), "{input}");
            assert!((0.0..=1.0).contains(&r.probability_hoax), "{input}");
            assert!((r.probability_real + r.probability_hoax - 1.0).abs() < 1e-6, "{input}");
        }
    }
}

#[test]
fn test_identical_text_gives_identical_prediction() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    let text = "Pemerintah: FREE prize for every citizen, miracle report";
    let first = service.evaluate(text, Domain::News, true).unwrap();
    let second = service.evaluate(text, Domain::News, true).unwrap();

    assert_eq!(first.result, second.result);
    assert_eq!(first.influential_terms, second.influential_terms);
    assert_eq!(first.rendered_text, second.rendered_text);
}

#[test]
fn test_errors_are_distinguishable() {
    let dir = tempfile::tempdir().unwrap();
    // Only the news artifacts exist; social is configured but broken
    common::write_bundle(dir.path(), "news", "2024.1");
    let config = ClassifierConfig::from_yaml(&common::config_yaml(dir.path(), 10)).unwrap();
    let registry = Arc::new(BundleRegistry::from_config(&config));
    assert_eq!(registry.failures().len(), 1);

    let service = ClassificationService::new(Arc::clone(&registry)).unwrap();

    let err = service.evaluate("  \n ", Domain::News, true).unwrap_err();
    assert_eq!(err.kind(), "empty_input");

    let err = service.evaluate("some text", Domain::Social, false).unwrap_err();
    assert!(matches!(err, Error::ModelUnavailable { domain: Domain::Social, .. }));

    let empty = ClassificationService::new(Arc::new(BundleRegistry::builder().build())).unwrap();
    let err = empty.evaluate("some text", Domain::News, false).unwrap_err();
    assert_eq!(err.kind(), "unknown_domain");

    // Blank input is rejected before the domain is even looked up
    let err = empty.evaluate("", Domain::News, false).unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
}

#[test]
fn test_version_mismatch_marks_bundle_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    common::write_bundle(dir.path(), "news", "2023.9");
    common::write_bundle(dir.path(), "social", "2023.9");

    let config = ClassifierConfig::from_yaml(&common::config_yaml(dir.path(), 10)).unwrap();
    let registry = BundleRegistry::from_config(&config);

    // news pins 2024.1, social has no pin
    assert!(registry.get(Domain::News).is_err());
    assert!(registry.get(Domain::Social).is_ok());
}

#[test]
fn test_concurrent_callers_share_one_registry() {
    let dir = tempfile::tempdir().unwrap();
    let service = Arc::new(service_in(dir.path()));
    let expected = service
        .evaluate("free prize official report", Domain::Social, true)
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                (0..50)
                    .map(|_| {
                        service
                            .evaluate("free prize official report", Domain::Social, true)
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for evaluation in handle.join().unwrap() {
            assert_eq!(evaluation.result, expected.result);
            assert_eq!(evaluation.influential_terms, expected.influential_terms);
        }
    }
}
