//! Classification service: the single entry point front-ends drive
//!
//! Each call normalizes once, classifies once and, when asked, derives the
//! influential terms from that same prediction.

use crate::classifier::PredictionResult;
use crate::influence::{top_influential_terms, InfluentialTerm, InfluentialTermExtractor};
use crate::normalizer::TextNormalizer;
use crate::registry::BundleRegistry;
use hoaxcheck_core::{Domain, Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Composite result of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Domain whose bundle scored the text
    pub domain: Domain,

    /// Label and both class probabilities
    pub result: PredictionResult,

    /// Normalized text, with top terms tagged when highlighting was requested
    pub rendered_text: String,

    /// Top terms for the predicted class; empty without highlighting
    pub influential_terms: Vec<InfluentialTerm>,

    /// Latency in microseconds
    pub latency_us: u64,
}

/// Orchestrates normalize → classify → highlight over a shared registry
#[derive(Debug, Clone)]
pub struct ClassificationService {
    registry: Arc<BundleRegistry>,
    normalizer: TextNormalizer,
    extractor: InfluentialTermExtractor,
}

impl ClassificationService {
    /// Create a service with the default top-N
    pub fn new(registry: Arc<BundleRegistry>) -> Result<Self> {
        Self::with_extractor(registry, InfluentialTermExtractor::default())
    }

    /// Create a service with a specific extractor configuration
    pub fn with_extractor(
        registry: Arc<BundleRegistry>,
        extractor: InfluentialTermExtractor,
    ) -> Result<Self> {
        Ok(Self {
            registry,
            normalizer: TextNormalizer::new()?,
            extractor,
        })
    }

    pub fn registry(&self) -> &Arc<BundleRegistry> {
        &self.registry
    }

    /// Classify raw text for a domain
    pub fn evaluate(&self, raw: &str, domain: Domain, include_highlights: bool) -> Result<Evaluation> {
        let top_n = include_highlights.then_some(self.extractor.top_n());
        self.evaluate_with_top_n(raw, domain, top_n)
    }

    /// Classify raw text, highlighting `top_n` terms when given
    pub fn evaluate_with_top_n(
        &self,
        raw: &str,
        domain: Domain,
        highlight_top_n: Option<usize>,
    ) -> Result<Evaluation> {
        let outcome = self.run(raw, domain, highlight_top_n);
        record_outcome(&outcome, domain.as_str());
        outcome
    }

    /// Classify raw text for a domain given by name, as front-ends receive it
    ///
    /// Blank text is rejected before the name is resolved, so it is
    /// `EmptyInput` whatever the domain says.
    pub fn evaluate_named(
        &self,
        raw: &str,
        domain: &str,
        highlight_top_n: Option<usize>,
    ) -> Result<Evaluation> {
        let outcome = check_not_blank(raw)
            .and_then(|()| domain.parse::<Domain>())
            .and_then(|domain| self.run(raw, domain, highlight_top_n));
        record_outcome(&outcome, domain.trim());
        outcome
    }

    fn run(&self, raw: &str, domain: Domain, highlight_top_n: Option<usize>) -> Result<Evaluation> {
        let start = Instant::now();

        check_not_blank(raw)?;

        let bundle = self.registry.get(domain)?;

        let normalized = self.normalizer.normalize(raw);
        let result = bundle.classify(&normalized);

        let (rendered_text, influential_terms) = match highlight_top_n {
            Some(top_n) => {
                let highlights = top_influential_terms(&normalized, &bundle, result.label, top_n);
                (highlights.rendered, highlights.terms)
            }
            None => (normalized.into_string(), Vec::new()),
        };

        Ok(Evaluation {
            domain,
            result,
            rendered_text,
            influential_terms,
            latency_us: start.elapsed().as_micros() as u64,
        })
    }
}

fn check_not_blank(raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(())
}

fn record_outcome(outcome: &Result<Evaluation>, domain: &str) {
    match outcome {
        Ok(evaluation) => {
            let domain = evaluation.domain;
            metrics::counter!(
                "hoaxcheck_evaluations_total",
                "domain" => domain.as_str(),
                "label" => evaluation.result.label.as_str()
            )
            .increment(1);
            metrics::histogram!(
                "hoaxcheck_evaluation_latency_us",
                "domain" => domain.as_str()
            )
            .record(evaluation.latency_us as f64);
            debug!(
                %domain,
                label = %evaluation.result.label,
                confidence = evaluation.result.confidence(),
                latency_us = evaluation.latency_us,
                "Evaluated text"
            );
        }
        Err(e) => {
            metrics::counter!("hoaxcheck_evaluation_errors_total", "kind" => e.kind())
                .increment(1);
            debug!(domain, kind = e.kind(), "Evaluation rejected");
        }
    }
}
