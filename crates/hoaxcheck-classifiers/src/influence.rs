//! Influential-term extraction and highlighting
//!
//! Ranks the vocabulary terms present in a text by the predicted class's
//! log-probability weight and re-renders the text with the top terms
//! wrapped for emphasis.

use crate::bundle::ClassifierBundle;
use crate::normalizer::NormalizedText;
use hoaxcheck_core::Label;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of terms reported when the caller does not choose
pub const DEFAULT_TOP_N: usize = 10;

/// A vocabulary term and its weight for the predicted class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluentialTerm {
    pub term: String,
    pub weight: f64,
}

/// Ranked terms plus the tagged rendering of the text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    /// Top terms, weight descending
    pub terms: Vec<InfluentialTerm>,

    /// Normalized text with each occurrence of a top term wrapped in
    /// `<span class="supports-real|supports-hoax">`
    pub rendered: String,
}

/// Computes the terms driving a prediction
#[derive(Debug, Clone, Copy)]
pub struct InfluentialTermExtractor {
    top_n: usize,
}

impl InfluentialTermExtractor {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Extract with the configured `top_n`
    pub fn extract(
        &self,
        text: &NormalizedText,
        bundle: &ClassifierBundle,
        predicted: Label,
    ) -> Highlights {
        top_influential_terms(text, bundle, predicted, self.top_n)
    }
}

impl Default for InfluentialTermExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

/// Rank the distinct in-vocabulary terms of `text` for `predicted`
///
/// Terms are found with the bundle's own token pattern, so every term that
/// counted toward the prediction is a candidate even when it sits inside
/// punctuation the normalizer keeps. Equal weights keep the order in which
/// terms first appear. Asking for more terms than match returns every match.
pub fn top_influential_terms(
    text: &NormalizedText,
    bundle: &ClassifierBundle,
    predicted: Label,
    top_n: usize,
) -> Highlights {
    let matches: Vec<_> = bundle.term_matches(text).collect();

    let mut seen = HashSet::new();
    let mut candidates: Vec<InfluentialTerm> = Vec::new();
    for m in &matches {
        let term = m.as_str();
        if !seen.insert(term) {
            continue;
        }
        if let Some(weight) = bundle.term_weight(term, predicted) {
            candidates.push(InfluentialTerm {
                term: term.to_string(),
                weight,
            });
        }
    }

    // Stable sort keeps first-appearance order among equal weights
    candidates.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    candidates.truncate(top_n);

    let top: HashSet<&str> = candidates.iter().map(|t| t.term.as_str()).collect();
    let tag = predicted.emphasis_tag();
    let source = text.as_str();

    // Wrap only the matched span; surrounding characters stay as they are
    let mut rendered = String::with_capacity(source.len());
    let mut cursor = 0;
    for m in matches.iter().filter(|m| top.contains(m.as_str())) {
        rendered.push_str(&source[cursor..m.start()]);
        rendered.push_str(&format!("<span class=\"{}\">{}</span>", tag, m.as_str()));
        cursor = m.end();
    }
    rendered.push_str(&source[cursor..]);

    Highlights {
        terms: candidates,
        rendered,
    }
}
