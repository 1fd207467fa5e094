//! pets-gateway - Aggregation across pet provider backends
//!
//! This crate provides the [`Aggregator`] that merges the collections of
//! every configured provider into one response, and the [`DetailRouter`]
//! that forwards single-item lookups to the provider owning the item.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          Pets Gateway                            │
//! │                                                                  │
//! │  ┌────────────────────────────┐   ┌─────────────────────────┐   │
//! │  │         Aggregator         │   │      DetailRouter       │   │
//! │  │  - Sequential fan-out      │   │  - Picks the backend    │   │
//! │  │  - Absorbs partial failure │   │    named in the path    │   │
//! │  │  - Sorts items by name     │   │  - Single-item query    │   │
//! │  └──────────────┬─────────────┘   └────────────┬────────────┘   │
//! │                 │          PetQuery            │                │
//! │         ┌───────┴───────────────┬──────────────┴───┐            │
//! │         ▼                       ▼                  ▼            │
//! │  ┌─────────────┐        ┌─────────────┐     ┌─────────────┐     │
//! │  │    dogs     │        │    cats     │     │   fishes    │     │
//! │  └─────────────┘        └─────────────┘     └─────────────┘     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use pets_gateway::{Aggregator, GatewaySettings};
//!
//! let client: Arc<dyn PetQuery> = Arc::new(PetClient::new()?);
//! let aggregator = Aggregator::new(GatewaySettings::default(), backends, client);
//!
//! let all = aggregator.aggregate(Some(&trace)).await?;
//! ```

mod aggregator;
mod detail;
#[cfg(test)]
mod mock;

pub use aggregator::{
    Aggregator, CallCounter, GatewaySettings, DEFAULT_ROUTE, DEFAULT_SERVICE_NAME,
    FORCED_FAILURE_PERIOD, UNAVAILABLE_MESSAGE,
};
pub use detail::DetailRouter;

// Re-export core types for convenience
pub use pets_core::{BackendDescriptor, GatewayError, GatewayResult, PetQuery, TraceContext};
