//! Multinomial naive Bayes restored from a fitted artifact

use crate::artifact::ArtifactError;
use crate::vectorizer::FeatureVector;
use hoaxcheck_core::Label;
use serde::{Deserialize, Serialize};

/// Serialized classifier state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    /// Artifact version tag
    #[serde(default)]
    pub version: Option<String>,

    /// Class names in index order, either labels or the integers 0 and 1
    #[serde(default)]
    pub classes: Option<Vec<serde_json::Value>>,

    /// Log prior per class
    pub class_log_prior: Vec<f64>,

    /// Log probability of each feature given the class, one row per class
    pub feature_log_prob: Vec<Vec<f64>>,
}

/// Fitted two-class multinomial naive Bayes model
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    version: Option<String>,
    class_log_prior: [f64; Label::COUNT],
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Validate an artifact and build the model from it
    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self, ArtifactError> {
        if let Some(classes) = &artifact.classes {
            check_classes(classes)?;
        }

        let class_log_prior: [f64; Label::COUNT] =
            artifact.class_log_prior.as_slice().try_into().map_err(|_| {
                ArtifactError::invalid(format!(
                    "expected {} class priors, found {}",
                    Label::COUNT,
                    artifact.class_log_prior.len()
                ))
            })?;
        if class_log_prior.iter().any(|v| !v.is_finite()) {
            return Err(ArtifactError::invalid("class_log_prior contains non-finite values"));
        }

        if artifact.feature_log_prob.len() != Label::COUNT {
            return Err(ArtifactError::invalid(format!(
                "expected {} rows of feature_log_prob, found {}",
                Label::COUNT,
                artifact.feature_log_prob.len()
            )));
        }
        let n_features = artifact.feature_log_prob[0].len();
        for row in &artifact.feature_log_prob {
            if row.len() != n_features {
                return Err(ArtifactError::invalid("feature_log_prob rows differ in length"));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(ArtifactError::invalid("feature_log_prob contains non-finite values"));
            }
        }

        Ok(Self {
            version: artifact.version,
            class_log_prior,
            feature_log_prob: artifact.feature_log_prob,
        })
    }

    /// Number of features every row covers
    pub fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Log probability of a feature under a class
    pub fn feature_log_prob(&self, label: Label, index: usize) -> Option<f64> {
        self.feature_log_prob[label.index()].get(index).copied()
    }

    /// Unnormalized log posterior per class
    ///
    /// Feature indices outside the model's feature space contribute nothing.
    pub fn joint_log_likelihood(&self, features: &FeatureVector) -> [f64; Label::COUNT] {
        let mut jll = self.class_log_prior;
        for (class, row) in self.feature_log_prob.iter().enumerate() {
            jll[class] += features
                .iter()
                .filter_map(|&(index, value)| row.get(index).map(|log_prob| value * log_prob))
                .sum::<f64>();
        }
        jll
    }

    /// Posterior probability per class
    pub fn predict_proba(&self, features: &FeatureVector) -> [f64; Label::COUNT] {
        let jll = self.joint_log_likelihood(features);
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + jll.iter().map(|v| (v - max).exp()).sum::<f64>().ln();
        jll.map(|v| (v - log_norm).exp().clamp(0.0, 1.0))
    }
}

fn check_classes(classes: &[serde_json::Value]) -> Result<(), ArtifactError> {
    if classes.len() != Label::COUNT {
        return Err(ArtifactError::invalid(format!(
            "expected {} classes, found {}",
            Label::COUNT,
            classes.len()
        )));
    }

    for (index, class) in classes.iter().enumerate() {
        let Some(label) = Label::from_index(index) else {
            continue;
        };
        let matches = match class {
            serde_json::Value::Number(n) => n.as_u64() == Some(index as u64),
            serde_json::Value::String(s) => {
                s.eq_ignore_ascii_case(label.as_str()) || s == &index.to_string()
            }
            _ => false,
        };
        if !matches {
            return Err(ArtifactError::invalid(format!(
                "class {} is {}, expected {} or {}",
                index, class, label, index
            )));
        }
    }

    Ok(())
}
