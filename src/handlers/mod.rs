//! HTTP request handlers for the review front end

use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::metrics::Metrics;
use crate::resources::ResourceSampler;
use crate::upstream::{CollectorClient, ModelClient};
use crate::version;

pub mod click;
pub mod feedback;
pub mod health;
pub mod index;
pub mod metrics;
pub mod predict;

/// Application state shared across all handlers
///
/// Holds the configuration, the metrics registry, the upstream clients, and
/// the process resource sampler. Cloning is cheap: every field is behind an
/// `Arc` or is itself a handle over `Arc`'d internals.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    metrics: Metrics,
    model: Arc<ModelClient>,
    collector: Arc<CollectorClient>,
    sampler: Arc<ResourceSampler>,
    app_version: String,
}

impl AppState {
    /// Create application state from configuration
    ///
    /// Registers all metric instruments and builds the upstream HTTP
    /// clients. The release label is resolved once here and reused for
    /// every metric that carries it.
    pub fn new(config: Arc<Config>) -> AppResult<Self> {
        let metrics = Metrics::new()?;
        let model = Arc::new(ModelClient::new(&config.services)?);
        let collector = Arc::new(CollectorClient::new(&config.services)?);
        let sampler = Arc::new(ResourceSampler::new());
        let app_version = version::app_version();

        Ok(Self {
            config,
            metrics,
            model,
            collector,
            sampler,
            app_version,
        })
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get reference to the metrics registry
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Get reference to the model service client
    pub fn model(&self) -> &ModelClient {
        &self.model
    }

    /// Get reference to the data collection client
    pub fn collector(&self) -> &CollectorClient {
        &self.collector
    }

    /// Get reference to the process resource sampler
    pub fn sampler(&self) -> &ResourceSampler {
        &self.sampler
    }

    /// Release label applied to versioned metrics
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}
