//! Pet provider client library
//!
//! Provides the HTTP implementation of [`pets_core::PetQuery`] used by the
//! gateway to reach provider backends.
//!
//! # Example
//!
//! ```rust,no_run
//! use pets_client::PetClient;
//! use pets_core::{PetQuery, TraceContext};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PetClient::new()?;
//!     let trace = TraceContext::new_root();
//!
//!     let dogs = client
//!         .query_pets("http://localhost:7002/dogs/v1/data", Some(&trace))
//!         .await?;
//!     println!("{} dogs", dogs.total);
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module runs an axum router on an ephemeral port:
//!
//! ```rust,ignore
//! use pets_client::testing::TestServer;
//!
//! let server = TestServer::start(router).await?;
//! let body = server.http.get(server.url("/pets")).send().await?;
//! ```

mod client;
mod error;
pub mod testing;

pub use client::{lookup_service, PetClient};
pub use error::{ClientError, Result};

// Re-export core types for convenience
pub use pets_core::{Pet, Pets, QueryError, TraceContext};
