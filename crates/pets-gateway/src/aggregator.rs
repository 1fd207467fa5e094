//! Aggregator - merges the collections of all configured providers
//!
//! One aggregate is built per inbound request. Providers are queried one
//! after the other in configuration order; a provider that fails is
//! skipped for that request. Only a zero total after policy application
//! is reported to the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pets_core::routing::{self, gateway_uri};
use pets_core::{
    BackendDescriptor, GatewayError, GatewayResult, Origin, PetQuery, Pets, TraceContext,
};
use tracing::{debug, info, warn};

/// Service name of the gateway's own origin record
pub const DEFAULT_SERVICE_NAME: &str = "aggregate-service";

/// Path segment the gateway is mounted under
pub const DEFAULT_ROUTE: &str = "pets";

/// Every Nth aggregation reports a zero total regardless of the providers.
pub const FORCED_FAILURE_PERIOD: u64 = 50;

/// Message returned when the aggregate total is zero
pub const UNAVAILABLE_MESSAGE: &str = "no answer from all the pets services";

/// Identity of the gateway in aggregate responses
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Service name of the self origin record
    pub service_name: String,
    /// Route segment prefixed to item URIs
    pub route: String,
    /// Host name of the self origin record
    pub hostname: String,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            route: DEFAULT_ROUTE.to_string(),
            hostname: routing::local_hostname(),
        }
    }
}

/// Process-wide aggregation call counter
#[derive(Debug, Default)]
pub struct CallCounter(AtomicU64);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter whose next call number is `start + 1`
    pub fn starting_at(start: u64) -> Self {
        Self(AtomicU64::new(start))
    }

    /// Increment and return the new call number
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of calls counted so far
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Builds one unified collection from every configured provider
pub struct Aggregator {
    settings: GatewaySettings,
    backends: Arc<[BackendDescriptor]>,
    query: Arc<dyn PetQuery>,
    calls: CallCounter,
}

impl Aggregator {
    /// Create an aggregator over a fixed backend set
    pub fn new(
        settings: GatewaySettings,
        backends: impl Into<Arc<[BackendDescriptor]>>,
        query: Arc<dyn PetQuery>,
    ) -> Self {
        let backends = backends.into();
        for (i, backend) in backends.iter().enumerate() {
            info!(
                index = i,
                backend = %backend.name,
                url = %backend.collection_url(),
                "Managing backend"
            );
        }

        Self {
            settings,
            backends,
            query,
            calls: CallCounter::new(),
        }
    }

    /// Replace the call counter (used to seed the forced-failure cycle)
    pub fn with_counter(mut self, calls: CallCounter) -> Self {
        self.calls = calls;
        self
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    pub fn backends(&self) -> &[BackendDescriptor] {
        &self.backends
    }

    /// Number of aggregations performed so far
    pub fn calls(&self) -> u64 {
        self.calls.current()
    }

    /// Query every provider and merge the answers.
    ///
    /// Returns [`GatewayError::Unavailable`] when the final total is zero,
    /// either because no provider answered, all answered with nothing, or
    /// the forced-failure cycle hit this call.
    pub async fn aggregate(&self, trace: Option<&TraceContext>) -> GatewayResult<Pets> {
        let mut all = Pets::seeded(Origin::new(
            &self.settings.service_name,
            &self.settings.hostname,
        ));

        for (i, backend) in self.backends.iter().enumerate() {
            let url = backend.collection_url();
            debug!(index = i, backend = %backend.name, %url, "Accessing backend");

            let pets = match self.query.query_pets(&url, trace).await {
                Ok(pets) => pets,
                Err(e) => {
                    warn!(backend = %backend.name, %url, error = %e, "Error accessing backend");
                    continue;
                }
            };

            let Pets {
                total,
                hostname,
                items,
                ..
            } = pets;

            all.total += total;
            all.hostnames.push(Origin::new(&backend.name, hostname));
            all.items.extend(items.into_iter().map(|mut pet| {
                pet.type_tag = backend.name.clone();
                pet.uri = gateway_uri(&self.settings.route, &pet.uri);
                pet
            }));

            // Pacing: hold the fan-out for one millisecond per reported item
            tokio::time::sleep(Duration::from_millis(total)).await;
        }

        all.sort_by_name();

        let call = self.calls.next();
        if call % FORCED_FAILURE_PERIOD == 0 {
            debug!(call, "Forced zero total");
            all.total = 0;
        }

        if all.total == 0 {
            warn!(call, "Zero answer from all the services");
            return Err(GatewayError::Unavailable(UNAVAILABLE_MESSAGE.to_string()));
        }

        debug!(
            call,
            total = all.total,
            answered = all.hostnames.len() - 1,
            "Aggregated backends"
        );
        Ok(all)
    }
}
