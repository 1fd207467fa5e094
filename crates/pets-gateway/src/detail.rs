//! Detail router - forwards single-item lookups to the owning provider

use std::sync::Arc;

use pets_core::routing::DetailPath;
use pets_core::{BackendDescriptor, GatewayError, GatewayResult, Pet, PetQuery, TraceContext};
use tracing::{debug, warn};

/// Routes `/{route}/{backend}/{version}/{collection}/{id}` to `backend`
pub struct DetailRouter {
    backends: Arc<[BackendDescriptor]>,
    query: Arc<dyn PetQuery>,
}

impl DetailRouter {
    pub fn new(backends: impl Into<Arc<[BackendDescriptor]>>, query: Arc<dyn PetQuery>) -> Self {
        Self {
            backends: backends.into(),
            query,
        }
    }

    /// Find the backend with the given name
    pub fn find_backend(&self, name: &str) -> Option<&BackendDescriptor> {
        self.backends.iter().find(|b| b.name == name)
    }

    /// Fetch one item from the backend named `backend_name`.
    ///
    /// The returned item is tagged with the backend name.
    pub async fn fetch(
        &self,
        backend_name: &str,
        item_id: &str,
        trace: Option<&TraceContext>,
    ) -> GatewayResult<Pet> {
        let backend = self
            .find_backend(backend_name)
            .ok_or_else(|| GatewayError::BackendNotFound(backend_name.to_string()))?;

        let url = backend.item_url(item_id);
        debug!(backend = %backend.name, %url, "Accessing backend");

        let mut pet = self.query.query_pet(&url, trace).await.map_err(|source| {
            warn!(backend = %backend.name, %url, error = %source, "Error accessing backend");
            GatewayError::Query {
                backend: backend.name.clone(),
                source,
            }
        })?;

        pet.type_tag = backend.name.clone();
        Ok(pet)
    }

    /// Fetch the item addressed by a parsed detail path
    pub async fn fetch_path(
        &self,
        path: &DetailPath,
        trace: Option<&TraceContext>,
    ) -> GatewayResult<Pet> {
        self.fetch(&path.backend, &path.id, trace).await
    }
}
