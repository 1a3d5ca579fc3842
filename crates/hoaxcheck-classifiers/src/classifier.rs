//! Prediction result shared by bundles and the service

use hoaxcheck_core::Label;
use serde::{Deserialize, Serialize};

/// Outcome of classifying one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Winning label
    pub label: Label,

    /// Posterior probability of REAL (0.0-1.0)
    pub probability_real: f64,

    /// Posterior probability of HOAX (0.0-1.0)
    pub probability_hoax: f64,
}

impl PredictionResult {
    /// Build a result from class probabilities. REAL wins exact ties.
    pub fn from_probabilities(probability_real: f64, probability_hoax: f64) -> Self {
        let label = if probability_hoax > probability_real {
            Label::Hoax
        } else {
            Label::Real
        };

        Self {
            label,
            probability_real,
            probability_hoax,
        }
    }

    /// Probability assigned to a label
    pub fn probability(&self, label: Label) -> f64 {
        match label {
            Label::Real => self.probability_real,
            Label::Hoax => self.probability_hoax,
        }
    }

    /// Probability of the predicted label
    pub fn confidence(&self) -> f64 {
        self.probability(self.label)
    }

    /// Check if the confidence reaches a threshold
    pub fn exceeds_threshold(&self, threshold: f64) -> bool {
        self.confidence() >= threshold
    }
}
