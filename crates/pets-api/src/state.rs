//! Application state for the pets API

use std::sync::Arc;

use pets_core::{BackendDescriptor, PetQuery};
use pets_gateway::{Aggregator, DetailRouter, GatewaySettings};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    aggregator: Arc<Aggregator>,
    detail: Arc<DetailRouter>,
    /// Propagate trace context to backends
    tracing_enabled: bool,
}

impl AppState {
    /// Create a new AppState from prepared components
    pub fn new(aggregator: Aggregator, detail: DetailRouter, tracing_enabled: bool) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            detail: Arc::new(detail),
            tracing_enabled,
        }
    }

    /// Build the aggregator and detail router over one backend set
    pub fn from_backends(
        settings: GatewaySettings,
        backends: Vec<BackendDescriptor>,
        query: Arc<dyn PetQuery>,
        tracing_enabled: bool,
    ) -> Self {
        let backends: Arc<[BackendDescriptor]> = backends.into();
        let aggregator = Aggregator::new(settings, backends.clone(), query.clone());
        let detail = DetailRouter::new(backends, query);
        Self::new(aggregator, detail, tracing_enabled)
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn detail(&self) -> &DetailRouter {
        &self.detail
    }

    pub fn tracing_enabled(&self) -> bool {
        self.tracing_enabled
    }

    /// Route segment the gateway is mounted under
    pub fn route(&self) -> &str {
        &self.aggregator.settings().route
    }
}
