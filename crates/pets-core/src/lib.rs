//! pets-core - Core traits and types for the pets gateway
//!
//! This crate provides the data model shared by the gateway and the
//! provider backends, the error taxonomy, trace context propagation and
//! the [`PetQuery`] abstraction the aggregator is written against.

pub mod error;
pub mod models;
pub mod query;
pub mod routing;
pub mod trace;

pub use error::{GatewayError, GatewayResult, QueryError, QueryResult};
pub use models::*;
pub use query::PetQuery;
pub use trace::{TraceContext, TRACEPARENT_HEADER};
