//! End-to-end tests for the pets gateway
//!
//! Everything runs in-process: each provider and the gateway are real axum
//! routers bound to ephemeral ports, talking over HTTP through `PetClient`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pets-tests
//! ```
//!
//! # Test Structure
//!
//! - `gateway_e2e_test.rs` - Aggregation, partial failure and detail lookups

use std::sync::Arc;

use pets_api::{create_router, AppState};
use pets_client::testing::TestServer;
use pets_client::PetClient;
use pets_core::BackendDescriptor;
use pets_gateway::GatewaySettings;
use pets_provider::{PetEntry, ProviderConfig};

/// Host name reported by the gateway under test
pub const GATEWAY_HOSTNAME: &str = "gateway-host";

/// A provider running in-process
pub struct Provider {
    pub config: ProviderConfig,
    pub server: TestServer,
}

impl Provider {
    pub async fn start(config: ProviderConfig) -> Self {
        let server = TestServer::start(pets_provider::create_router(&config))
            .await
            .expect("provider should start");
        Self { config, server }
    }

    /// How the gateway reaches this provider
    pub fn descriptor(&self) -> BackendDescriptor {
        BackendDescriptor::new(
            self.config.name.clone(),
            "127.0.0.1",
            self.server.port(),
            self.config.context_path(),
        )
    }
}

/// Provider config serving `names` under `/{name}/v1/data`
pub fn provider_config(name: &str, names: &[&str]) -> ProviderConfig {
    ProviderConfig {
        name: name.to_string(),
        port: 0,
        context: format!("/{}/v1/data", name),
        hostname: Some(format!("{}-host", name)),
        pets: names
            .iter()
            .map(|pet| PetEntry {
                name: pet.to_string(),
                kind: format!("{} kind", name),
                age: 3,
                url: format!("https://example.org/{}.jpg", pet.to_lowercase()),
            })
            .collect(),
        ..Default::default()
    }
}

/// A backend descriptor whose port refuses connections
pub async fn refused_backend(name: &str) -> BackendDescriptor {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    BackendDescriptor::new(name, "127.0.0.1", port, format!("/{}/v1/data", name))
}

/// Start a gateway over `backends`
pub async fn start_gateway(backends: Vec<BackendDescriptor>) -> TestServer {
    let settings = GatewaySettings {
        hostname: GATEWAY_HOSTNAME.to_string(),
        ..Default::default()
    };
    let client = PetClient::new().expect("client should build");
    let state = AppState::from_backends(settings, backends, Arc::new(client), true);

    TestServer::start(create_router(state))
        .await
        .expect("gateway should start")
}
