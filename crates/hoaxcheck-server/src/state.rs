use hoaxcheck_classifiers::{
    init_registry_from_config, load_config, BundleRegistry, ClassificationService,
    InfluentialTermExtractor,
};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Classification entry point over the startup registry
    pub service: Arc<ClassificationService>,

    /// Influential terms reported when a request does not set `top_n`
    pub default_top_n: usize,
}

impl AppState {
    pub fn new(service: ClassificationService, default_top_n: usize) -> Self {
        Self {
            service: Arc::new(service),
            default_top_n,
        }
    }

    /// Load every configured bundle once and report the ones that failed
    pub fn from_config_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config = load_config(path)?;
        let registry = init_registry_from_config(&config);

        for (domain, reason) in registry.failures() {
            warn!("Bundle for domain '{}' is unavailable: {}", domain, reason);
        }

        let service = ClassificationService::with_extractor(
            Arc::new(registry),
            InfluentialTermExtractor::new(config.top_n),
        )?;

        Ok(Self::new(service, config.top_n))
    }

    pub fn registry(&self) -> &Arc<BundleRegistry> {
        self.service.registry()
    }
}
