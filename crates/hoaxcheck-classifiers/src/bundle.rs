//! Fitted vectorizer and classifier pair for one domain

use crate::artifact::{read_artifact, ArtifactError};
use crate::classifier::PredictionResult;
use crate::naive_bayes::{ClassifierArtifact, MultinomialNb};
use crate::normalizer::NormalizedText;
use crate::vectorizer::{TfidfVectorizer, VectorizerArtifact};
use hoaxcheck_core::{Domain, Error, Label, Result};
use std::path::Path;
use tracing::{debug, info};

/// Vectorizer and classifier fitted on the same feature space
///
/// Immutable once built. The term index map lives in the vectorizer, so
/// vocabulary lookups are constant time and unseen terms are plain misses.
#[derive(Debug, Clone)]
pub struct ClassifierBundle {
    domain: Domain,
    vectorizer: TfidfVectorizer,
    model: MultinomialNb,
}

impl ClassifierBundle {
    /// Pair a vectorizer with a classifier, checking their shapes agree
    pub fn new(domain: Domain, vectorizer: TfidfVectorizer, model: MultinomialNb) -> Result<Self> {
        if vectorizer.len() != model.n_features() {
            return Err(Error::model_unavailable(
                domain,
                format!(
                    "vocabulary size mismatch: vectorizer has {} terms, classifier has {} features",
                    vectorizer.len(),
                    model.n_features()
                ),
            ));
        }

        if let (Some(v), Some(c)) = (vectorizer.version(), model.version()) {
            if v != c {
                return Err(Error::model_unavailable(
                    domain,
                    format!("artifact version mismatch: vectorizer {}, classifier {}", v, c),
                ));
            }
        }

        Ok(Self {
            domain,
            vectorizer,
            model,
        })
    }

    /// Build a bundle from already parsed artifacts
    pub fn from_artifacts(
        domain: Domain,
        vectorizer: VectorizerArtifact,
        classifier: ClassifierArtifact,
    ) -> Result<Self> {
        let unavailable = |e: ArtifactError| Error::model_unavailable(domain, e.to_string());

        let vectorizer = TfidfVectorizer::from_artifact(vectorizer).map_err(unavailable)?;
        let model = MultinomialNb::from_artifact(classifier).map_err(unavailable)?;

        Self::new(domain, vectorizer, model)
    }

    /// Load a bundle from its two artifact files
    ///
    /// When `expected_version` is set, both artifacts must carry it.
    pub fn load(
        domain: Domain,
        vectorizer_path: &Path,
        classifier_path: &Path,
        expected_version: Option<&str>,
    ) -> Result<Self> {
        let unavailable = |e: ArtifactError| Error::model_unavailable(domain, e.to_string());

        debug!(%domain, path = %vectorizer_path.display(), "reading vectorizer artifact");
        let vectorizer: VectorizerArtifact = read_artifact(vectorizer_path).map_err(unavailable)?;

        debug!(%domain, path = %classifier_path.display(), "reading classifier artifact");
        let classifier: ClassifierArtifact = read_artifact(classifier_path).map_err(unavailable)?;

        if let Some(expected) = expected_version {
            for (what, found) in [
                ("vectorizer", vectorizer.version.as_deref()),
                ("classifier", classifier.version.as_deref()),
            ] {
                if found != Some(expected) {
                    return Err(Error::model_unavailable(
                        domain,
                        format!(
                            "{} version is {}, expected {}",
                            what,
                            found.unwrap_or("unset"),
                            expected
                        ),
                    ));
                }
            }
        }

        let bundle = Self::from_artifacts(domain, vectorizer, classifier)?;
        info!(
            %domain,
            vocabulary = bundle.vocabulary_size(),
            version = bundle.version().unwrap_or("unversioned"),
            "Loaded classifier bundle"
        );

        Ok(bundle)
    }

    /// Score normalized text
    pub fn classify(&self, text: &NormalizedText) -> PredictionResult {
        let features = self.vectorizer.transform(text.as_str());
        let [real, hoax] = self.model.predict_proba(&features);
        PredictionResult::from_probabilities(real, hoax)
    }

    /// Tokens of `text` exactly as `classify` counts them
    pub fn term_matches<'t>(
        &'t self,
        text: &'t NormalizedText,
    ) -> impl Iterator<Item = regex::Match<'t>> + 't {
        self.vectorizer.tokens(text.as_str())
    }

    /// Class-conditional log probability of a vocabulary term
    pub fn term_weight(&self, term: &str, label: Label) -> Option<f64> {
        let index = self.vectorizer.index_of(term)?;
        self.model.feature_log_prob(label, index)
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Artifact version, if the artifacts carry one
    pub fn version(&self) -> Option<&str> {
        self.vectorizer.version().or(self.model.version())
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.len()
    }
}
