//! TF-IDF vectorizer restored from a fitted artifact
//!
//! Maps normalized text onto the fixed feature space the classifier was
//! trained on. Terms outside the fitted vocabulary are ignored.

use crate::artifact::ArtifactError;
use regex::{Match, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Sparse feature vector as `(feature index, value)` pairs sorted by index
pub type FeatureVector = Vec<(usize, f64)>;

/// Serialized vectorizer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Artifact version tag
    #[serde(default)]
    pub version: Option<String>,

    /// Term to feature index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per feature index
    #[serde(default)]
    pub idf: Option<Vec<f64>>,

    /// Smallest and largest word n-gram length
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Regex selecting tokens
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    /// Row normalization
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,

    /// Replace tf with 1 + ln(tf)
    #[serde(default)]
    pub sublinear_tf: bool,
}

/// Row normalization applied after weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    version: Option<String>,
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    ngram_range: (usize, usize),
    token_regex: Regex,
    norm: Option<Norm>,
    sublinear_tf: bool,
}

impl TfidfVectorizer {
    /// Validate an artifact and build the vectorizer from it
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, ArtifactError> {
        let size = artifact.vocabulary.len();
        if size == 0 {
            return Err(ArtifactError::invalid("vectorizer vocabulary is empty"));
        }

        let mut seen = vec![false; size];
        for (term, &index) in &artifact.vocabulary {
            if index >= size || seen[index] {
                return Err(ArtifactError::invalid(format!(
                    "vocabulary index {} for term '{}' is out of range or duplicated",
                    index, term
                )));
            }
            seen[index] = true;

            // Normalized text is lowercase, so an uppercase term could never match
            if term.to_lowercase() != *term {
                return Err(ArtifactError::invalid(format!(
                    "vocabulary term '{}' is not lowercase",
                    term
                )));
            }
        }

        if let Some(idf) = &artifact.idf {
            if idf.len() != size {
                return Err(ArtifactError::invalid(format!(
                    "idf has {} entries but vocabulary has {} terms",
                    idf.len(),
                    size
                )));
            }
            if idf.iter().any(|v| !v.is_finite()) {
                return Err(ArtifactError::invalid("idf contains non-finite values"));
            }
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ArtifactError::invalid(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        let token_regex = Regex::new(&artifact.token_pattern).map_err(|e| {
            ArtifactError::invalid(format!("invalid token_pattern: {}", e))
        })?;

        Ok(Self {
            version: artifact.version,
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            token_regex,
            norm: artifact.norm,
            sublinear_tf: artifact.sublinear_tf,
        })
    }

    /// Number of features (vocabulary size)
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Feature index of a term, if it is in the vocabulary
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Tokens as the fitted token pattern sees them, with their byte spans
    pub fn tokens<'t>(&'t self, text: &'t str) -> impl Iterator<Item = Match<'t>> + 't {
        self.token_regex.find_iter(text)
    }

    /// Turn text into a weighted, normalized sparse feature vector
    pub fn transform(&self, text: &str) -> FeatureVector {
        let tokens: Vec<&str> = self.tokens(text).map(|m| m.as_str()).collect();

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        let (min_n, max_n) = self.ngram_range;

        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                let index = if n == 1 {
                    self.index_of(window[0])
                } else {
                    self.index_of(&window.join(" "))
                };
                if let Some(index) = index {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut features: FeatureVector = counts
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                let weight = match &self.idf {
                    Some(idf) => tf * idf[index],
                    None => tf,
                };
                (index, weight)
            })
            .collect();

        let denominator = match self.norm {
            Some(Norm::L2) => features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => features.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if denominator > 0.0 && denominator != 1.0 {
            for (_, value) in &mut features {
                *value /= denominator;
            }
        }

        features
    }
}
