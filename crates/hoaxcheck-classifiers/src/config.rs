//! Configuration for classifier bundles

use crate::influence::DEFAULT_TOP_N;
use hoaxcheck_core::Domain;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for all bundles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Artifact locations by domain; a domain may appear once, aliases included
    #[serde(default, deserialize_with = "deserialize_bundles")]
    pub bundles: BTreeMap<Domain, BundleSpec>,

    /// Directory relative artifact paths resolve against
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Influential terms reported per highlighted evaluation
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

/// Artifact pair for one domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleSpec {
    /// Vectorizer state file
    pub vectorizer: PathBuf,

    /// Classifier state file
    pub classifier: PathBuf,

    /// Version both artifacts must carry
    #[serde(default)]
    pub version: Option<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            bundles: BTreeMap::new(),
            models_dir: default_models_dir(),
            top_n: default_top_n(),
        }
    }
}

impl ClassifierConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }

    /// Get all configured domains
    pub fn domains(&self) -> Vec<Domain> {
        self.bundles.keys().copied().collect()
    }

    /// Resolve a domain's artifact paths against `models_dir`
    pub fn artifact_paths(&self, domain: Domain) -> Option<(PathBuf, PathBuf)> {
        let spec = self.bundles.get(&domain)?;
        Some((
            self.models_dir.join(&spec.vectorizer),
            self.models_dir.join(&spec.classifier),
        ))
    }
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("./models")
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn deserialize_bundles<'de, D>(deserializer: D) -> Result<BTreeMap<Domain, BundleSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    struct BundlesVisitor;

    impl<'de> Visitor<'de> for BundlesVisitor {
        type Value = BTreeMap<Domain, BundleSpec>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of domain to bundle spec")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut bundles = BTreeMap::new();
            while let Some((domain, spec)) = map.next_entry::<Domain, BundleSpec>()? {
                if bundles.insert(domain, spec).is_some() {
                    return Err(de::Error::custom(format!(
                        "domain '{}' is configured more than once",
                        domain
                    )));
                }
            }
            Ok(bundles)
        }
    }

    deserializer.deserialize_map(BundlesVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_config_yaml() {
        let yaml = r#"
models_dir: ./my-models
top_n: 5
bundles:
  news:
    vectorizer: tfidf_vectorizer_news.json
    classifier: model_hoax_news.json
    version: "2024.1"
  sosmed:
    vectorizer: /abs/tfidf_vectorizer_social.json
    classifier: model_hoax_social.json
"#;

        let config = ClassifierConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.bundles.len(), 2);
        assert_eq!(config.domains(), vec![Domain::News, Domain::Social]);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.bundles[&Domain::News].version.as_deref(), Some("2024.1"));

        let (vectorizer, classifier) = config.artifact_paths(Domain::News).unwrap();
        assert_eq!(vectorizer, PathBuf::from("./my-models/tfidf_vectorizer_news.json"));
        assert_eq!(classifier, PathBuf::from("./my-models/model_hoax_news.json"));

        // Absolute paths are kept as-is by Path::join
        let (vectorizer, _) = config.artifact_paths(Domain::Social).unwrap();
        assert_eq!(vectorizer, PathBuf::from("/abs/tfidf_vectorizer_social.json"));
    }

    #[test]
    fn test_defaults() {
        let config = ClassifierConfig::from_yaml("bundles: {}").unwrap();
        assert_eq!(config.models_dir, PathBuf::from("./models"));
        assert_eq!(config.top_n, DEFAULT_TOP_N);
        assert!(config.artifact_paths(Domain::News).is_none());
    }

    #[test]
    fn test_unknown_domain_key_is_rejected() {
        let yaml = r#"
bundles:
  sports:
    vectorizer: a.json
    classifier: b.json
"#;
        assert!(ClassifierConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_domain_and_alias_together_are_rejected() {
        let yaml = r#"
bundles:
  social:
    vectorizer: a.json
    classifier: b.json
  sosmed:
    vectorizer: c.json
    classifier: d.json
"#;
        let err = ClassifierConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("configured more than once"));
    }
}
