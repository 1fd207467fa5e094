//! Shared data models for the gateway and provider backends

mod backend;
mod pet;

pub use backend::*;
pub use pet::*;
