//! PetQuery trait - the seam between the gateway and its transport

use async_trait::async_trait;

use crate::error::QueryResult;
use crate::models::{Pet, Pets};
use crate::trace::TraceContext;

/// Outbound reads against a single provider backend.
///
/// The aggregator and the detail router only ever talk to backends through
/// this trait. The HTTP implementation lives in `pets-client`; tests plug in
/// in-memory implementations.
///
/// Implementations must not retry. A failed call is reported to the caller,
/// which decides whether to absorb it.
#[async_trait]
pub trait PetQuery: Send + Sync {
    /// Fetch the collection served at `url`
    async fn query_pets(&self, url: &str, trace: Option<&TraceContext>) -> QueryResult<Pets>;

    /// Fetch the single item served at `url`
    async fn query_pet(&self, url: &str, trace: Option<&TraceContext>) -> QueryResult<Pet>;
}
