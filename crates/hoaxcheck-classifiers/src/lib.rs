//! hoaxcheck Classifiers
//!
//! Text normalization and REAL/HOAX classification over pre-trained
//! TF-IDF + multinomial naive Bayes bundles, one bundle per text domain.
//!
//! A request flows through:
//! - [`TextNormalizer`]: lowercase, strip URLs, punctuation and digits
//! - [`ClassifierBundle`]: vectorize and compute class posteriors
//! - [`InfluentialTermExtractor`]: optional top-N terms and highlighting
//! - [`ClassificationService`]: orchestration over a [`BundleRegistry`]

pub mod artifact;
pub mod bundle;
pub mod classifier;
pub mod config;
pub mod influence;
pub mod naive_bayes;
pub mod normalizer;
pub mod registry;
pub mod service;
pub mod vectorizer;

pub use artifact::ArtifactError;
pub use bundle::ClassifierBundle;
pub use classifier::PredictionResult;
pub use config::{BundleSpec, ClassifierConfig};
pub use influence::{
    top_influential_terms, Highlights, InfluentialTerm, InfluentialTermExtractor, DEFAULT_TOP_N,
};
pub use naive_bayes::{ClassifierArtifact, MultinomialNb};
pub use normalizer::{NormalizedText, TextNormalizer};
pub use registry::{
    init_registry_from_config, init_registry_from_file, load_config, BundleRegistry, BundleStatus,
    RegistryBuilder,
};
pub use service::{ClassificationService, Evaluation};
pub use vectorizer::{FeatureVector, Norm, TfidfVectorizer, VectorizerArtifact};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bundle::ClassifierBundle;
    pub use crate::classifier::PredictionResult;
    pub use crate::influence::InfluentialTerm;
    pub use crate::registry::BundleRegistry;
    pub use crate::service::{ClassificationService, Evaluation};
    pub use hoaxcheck_core::{Domain, Error, Label, Result};
}
