//! pets-provider - demo provider service for the pets gateway
//!
//! Serves one collection of items from a TOML catalog, with optional
//! response trimming, sinusoidal delay and periodic failures so gateway
//! behaviour can be exercised against misbehaving backends.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration and catalog
//! - [`faults`] - Call counting, delay and failure injection
//! - [`server`] - axum router

pub mod config;
pub mod faults;
pub mod server;

pub use config::{ConfigError, DelayConfig, Mode, PetEntry, ProviderConfig};
pub use faults::{CallPlan, FaultInjector};
pub use server::{create_router, ProviderState};
