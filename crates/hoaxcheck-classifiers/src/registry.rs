//! Bundle registry initialization and lookup
//!
//! The registry is assembled once through [`RegistryBuilder`] and is
//! immutable afterwards, so it can be shared behind an `Arc` by any number
//! of concurrent callers without locking. A bundle that fails to load stays
//! failed until the process restarts.

use crate::bundle::ClassifierBundle;
use crate::config::ClassifierConfig;
use hoaxcheck_core::{Domain, Error, Result};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Load state of one domain's bundle
#[derive(Debug, Clone)]
pub enum BundleStatus {
    /// Loaded and ready to classify
    Ready(Arc<ClassifierBundle>),

    /// Artifacts were missing or corrupt
    Failed(String),
}

impl BundleStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Read-only set of bundles keyed by domain
#[derive(Debug, Clone, Default)]
pub struct BundleRegistry {
    bundles: BTreeMap<Domain, BundleStatus>,
}

impl BundleRegistry {
    /// Start assembling a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Load every bundle named in a configuration
    pub fn from_config(config: &ClassifierConfig) -> Self {
        init_registry_from_config(config)
    }

    /// Load registry from configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        init_registry_from_file(path)
    }

    /// Bundle for a domain
    ///
    /// `UnknownDomain` when nothing is registered for it, `ModelUnavailable`
    /// when its artifacts failed to load.
    pub fn get(&self, domain: Domain) -> Result<Arc<ClassifierBundle>> {
        match self.bundles.get(&domain) {
            Some(BundleStatus::Ready(bundle)) => Ok(Arc::clone(bundle)),
            Some(BundleStatus::Failed(reason)) => {
                Err(Error::model_unavailable(domain, reason.clone()))
            }
            None => Err(Error::unknown_domain(domain.as_str())),
        }
    }

    /// Check if a domain has a bundle entry, loaded or not
    pub fn is_registered(&self, domain: Domain) -> bool {
        self.bundles.contains_key(&domain)
    }

    pub fn status(&self, domain: Domain) -> Option<&BundleStatus> {
        self.bundles.get(&domain)
    }

    /// Registered domains in order
    pub fn domains(&self) -> Vec<Domain> {
        self.bundles.keys().copied().collect()
    }

    /// Domains whose bundles failed to load, with the reason
    pub fn failures(&self) -> Vec<(Domain, &str)> {
        self.bundles
            .iter()
            .filter_map(|(domain, status)| match status {
                BundleStatus::Failed(reason) => Some((*domain, reason.as_str())),
                BundleStatus::Ready(_) => None,
            })
            .collect()
    }

    /// Get the number of loaded bundles
    pub fn ready_count(&self) -> usize {
        self.bundles.values().filter(|s| s.is_ready()).count()
    }
}

/// Collects bundles before the registry is frozen
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    bundles: BTreeMap<Domain, BundleStatus>,
}

impl RegistryBuilder {
    /// Register a loaded bundle under its own domain
    pub fn register(mut self, bundle: ClassifierBundle) -> Self {
        self.bundles
            .insert(bundle.domain(), BundleStatus::Ready(Arc::new(bundle)));
        self
    }

    /// Record the outcome of a load attempt; failures stay registered
    pub fn register_result(mut self, domain: Domain, result: Result<ClassifierBundle>) -> Self {
        let status = match result {
            Ok(bundle) => BundleStatus::Ready(Arc::new(bundle)),
            Err(Error::ModelUnavailable { reason, .. }) => BundleStatus::Failed(reason),
            Err(e) => BundleStatus::Failed(e.to_string()),
        };
        self.bundles.insert(domain, status);
        self
    }

    pub fn build(self) -> BundleRegistry {
        BundleRegistry {
            bundles: self.bundles,
        }
    }
}

/// Load every configured bundle; a failed bundle does not stop the others
pub fn init_registry_from_config(config: &ClassifierConfig) -> BundleRegistry {
    info!("Initializing bundle registry with {} domains", config.bundles.len());

    let mut builder = BundleRegistry::builder();

    for (domain, spec) in &config.bundles {
        let Some((vectorizer_path, classifier_path)) = config.artifact_paths(*domain) else {
            continue;
        };

        let result = ClassifierBundle::load(
            *domain,
            &vectorizer_path,
            &classifier_path,
            spec.version.as_deref(),
        );

        match &result {
            Ok(_) => info!("✓ Loaded bundle: {}", domain),
            Err(e) => warn!("✗ Failed to load bundle {}: {}", domain, e),
        }

        builder = builder.register_result(*domain, result);
    }

    let registry = builder.build();
    info!(
        "Bundle registry initialized with {}/{} bundles",
        registry.ready_count(),
        config.bundles.len()
    );

    registry
}

/// Load classifier configuration from file
pub fn load_config(path: impl AsRef<Path>) -> Result<ClassifierConfig> {
    ClassifierConfig::from_file(path.as_ref())
        .map_err(|e| Error::config(format!("Failed to load classifier config: {}", e)))
}

/// Initialize registry from config file
pub fn init_registry_from_file(path: impl AsRef<Path>) -> Result<BundleRegistry> {
    let config = load_config(path)?;
    Ok(init_registry_from_config(&config))
}
