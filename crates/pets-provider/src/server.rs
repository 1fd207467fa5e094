//! HTTP surface of a provider service

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use pets_core::Pets;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::faults::FaultInjector;

/// Shared provider state
#[derive(Clone)]
pub struct ProviderState {
    name: Arc<str>,
    catalog: Arc<Pets>,
    faults: Arc<FaultInjector>,
}

impl ProviderState {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            name: config.name.as_str().into(),
            catalog: Arc::new(config.catalog()),
            faults: Arc::new(FaultInjector::from_config(config)),
        }
    }

    pub fn faults(&self) -> &FaultInjector {
        &self.faults
    }

    fn failure_message(&self) -> String {
        format!("Unexpected Error when querying the {} repository", self.name)
    }
}

/// Build the provider router for `config`
pub fn create_router(config: &ProviderConfig) -> Router {
    let context = config.context_path();
    let state = ProviderState::new(config);

    info!(
        name = %config.name,
        %context,
        mode = ?config.mode,
        frequency_error = config.frequency_error,
        delay_period = config.delay.period,
        delay_amplitude = config.delay.amplitude,
        "Provider routes ready"
    );

    Router::new()
        .route(&context, get(list_pets))
        .route(&format!("{}/{{id}}", context), get(get_pet))
        .route("/liveness", get(health))
        .route("/readiness", get(health))
        .route(&format!("/{}/liveness", config.name), get(health))
        .route(&format!("/{}/readiness", config.name), get(health))
        .with_state(state)
}

/// GET {context}
async fn list_pets(State(state): State<ProviderState>) -> Response {
    let plan = state.faults.plan();

    let mut pets = (*state.catalog).clone();
    state.faults.trim(&mut pets, &mut rand::thread_rng());

    debug!(
        call = plan.call,
        delay_ms = plan.delay.as_millis() as u64,
        total = pets.total,
        "Serving collection"
    );

    if !plan.delay.is_zero() {
        tokio::time::sleep(plan.delay).await;
    }

    if plan.fail {
        warn!(call = plan.call, "Failing this call");
        return (StatusCode::SERVICE_UNAVAILABLE, state.failure_message()).into_response();
    }

    Json(pets).into_response()
}

/// GET {context}/{id}
async fn get_pet(State(state): State<ProviderState>, Path(id): Path<String>) -> Response {
    let found = id
        .parse::<u32>()
        .ok()
        .and_then(|index| state.catalog.items.iter().find(|p| p.index == index));

    match found {
        Some(pet) => Json(pet.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, format!("{} {} not found", state.name, id)).into_response(),
    }
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Mode, PetEntry};
    use pets_client::testing::TestServer;
    use pets_core::Pet;
    use pretty_assertions::assert_eq;

    fn config() -> ProviderConfig {
        ProviderConfig {
            name: "dogs".to_string(),
            context: "/dogs/v1/data".to_string(),
            hostname: Some("dogs-host".to_string()),
            pets: ["Rex", "Medor", "Idefix"]
                .iter()
                .map(|name| PetEntry {
                    name: name.to_string(),
                    kind: "Labrador".to_string(),
                    age: 3,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_serves_collection() {
        let server = TestServer::start(create_router(&config())).await.unwrap();

        let pets: Pets = server
            .http
            .get(server.url("/dogs/v1/data"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(pets.total, 3);
        assert_eq!(pets.hostname, "dogs-host");
        assert_eq!(pets.items[2].name, "Idefix");
        assert_eq!(pets.items[2].uri, "/dogs/v1/data/3");
    }

    #[tokio::test]
    async fn test_serves_single_item() {
        let server = TestServer::start(create_router(&config())).await.unwrap();

        let response = server.http.get(server.url("/dogs/v1/data/2")).send().await.unwrap();
        assert_eq!(response.status(), 200);
        let pet: Pet = response.json().await.unwrap();
        assert_eq!(pet.name, "Medor");

        for missing in ["/dogs/v1/data/9", "/dogs/v1/data/abc"] {
            let response = server.http.get(server.url(missing)).send().await.unwrap();
            assert_eq!(response.status(), 404, "{}", missing);
        }
    }

    #[tokio::test]
    async fn test_periodic_failure() {
        let config = ProviderConfig {
            frequency_error: 2,
            ..config()
        };
        let server = TestServer::start(create_router(&config)).await.unwrap();

        let first = server.http.get(server.url("/dogs/v1/data")).send().await.unwrap();
        assert_eq!(first.status(), 200);

        let second = server.http.get(server.url("/dogs/v1/data")).send().await.unwrap();
        assert_eq!(second.status(), 503);
        assert_eq!(
            second.text().await.unwrap(),
            "Unexpected Error when querying the dogs repository"
        );
    }

    #[tokio::test]
    async fn test_random_mode_trims() {
        let config = ProviderConfig {
            mode: Mode::RandomNumber,
            ..config()
        };
        let server = TestServer::start(create_router(&config)).await.unwrap();

        for _ in 0..10 {
            let pets: Pets = server
                .http
                .get(server.url("/dogs/v1/data"))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            assert!((1..=3).contains(&pets.items.len()));
            assert_eq!(pets.total, pets.items.len() as u64);
        }
    }

    #[tokio::test]
    async fn test_health_routes() {
        let server = TestServer::start(create_router(&config())).await.unwrap();

        for path in ["/liveness", "/readiness", "/dogs/liveness", "/dogs/readiness"] {
            let response = server.http.get(server.url(path)).send().await.unwrap();
            assert_eq!(response.status(), 200, "{}", path);
            assert_eq!(response.text().await.unwrap(), "ok");
        }
    }
}
