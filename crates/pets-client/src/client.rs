//! Pet provider HTTP client implementation

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use pets_core::{Pet, PetQuery, Pets, QueryError, QueryResult, TraceContext, TRACEPARENT_HEADER};
use reqwest::header::{ACCEPT, EXPIRES};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::Result;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for provider backends
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PetClient {
    client: Client,
}

impl PetClient {
    /// Create a client with the default timeouts
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a client with custom timeouts
    pub fn with_config(timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Get a reference to the underlying HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// GET `url` and decode the JSON body.
    ///
    /// The trace context, when given, is injected as a `traceparent` header.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        trace: Option<&TraceContext>,
    ) -> QueryResult<T> {
        let parsed =
            Url::parse(url).map_err(|e| QueryError::InvalidUrl(format!("{}: {}", url, e)))?;

        if let Some(host) = parsed.host_str() {
            lookup_service(host, parsed.port_or_known_default().unwrap_or(80)).await;
        }

        let mut request = self
            .client
            .get(parsed)
            .header(ACCEPT, "application/json")
            .header(EXPIRES, "10ms");
        if let Some(ctx) = trace {
            request = request.header(TRACEPARENT_HEADER, ctx.to_traceparent());
        }

        debug!(%url, "Connecting backend");
        let response = request.send().await.map_err(|e| {
            debug!(%url, error = %e, "Error connecting backend");
            QueryError::Connection(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| QueryError::Body(e.to_string()))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body).trim().to_string();
            let message = if text.is_empty() {
                status.to_string()
            } else {
                text
            };
            return Err(QueryError::BadStatus {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| QueryError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PetQuery for PetClient {
    #[instrument(skip(self, trace))]
    async fn query_pets(&self, url: &str, trace: Option<&TraceContext>) -> QueryResult<Pets> {
        self.get_json(url, trace).await
    }

    #[instrument(skip(self, trace))]
    async fn query_pet(&self, url: &str, trace: Option<&TraceContext>) -> QueryResult<Pet> {
        self.get_json(url, trace).await
    }
}

/// Resolve `host` for diagnostics.
///
/// Addresses are logged at debug level. A resolution failure is logged and
/// yields an empty list; it never blocks the query that follows.
pub async fn lookup_service(host: &str, port: u16) -> Vec<IpAddr> {
    match tokio::net::lookup_host((host, port)).await {
        Ok(addrs) => {
            let ips: Vec<IpAddr> = addrs.map(|a| a.ip()).collect();
            for ip in &ips {
                debug!(service = %host, %ip, "IN A");
            }
            ips
        }
        Err(e) => {
            warn!(service = %host, error = %e, "Could not resolve service");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};

    use super::*;
    use crate::testing::TestServer;

    fn sample_pets() -> Pets {
        Pets {
            total: 1,
            hostname: "cats-1".to_string(),
            hostnames: vec![],
            items: vec![Pet {
                index: 1,
                name: "Felix".to_string(),
                uri: "/cats/v1/data/1".to_string(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_client_creation() {
        tokio_test::assert_ok!(PetClient::new());
    }

    #[tokio::test]
    async fn test_query_pets_decodes_collection() {
        let router = Router::new().route("/cats/v1/data", get(|| async { Json(sample_pets()) }));
        let server = TestServer::start(router).await.unwrap();

        let pets = server
            .client
            .query_pets(&server.url("/cats/v1/data"), None)
            .await
            .unwrap();
        assert_eq!(pets, sample_pets());
    }

    #[tokio::test]
    async fn test_query_pet_decodes_item() {
        let router = Router::new().route(
            "/cats/v1/data/1",
            get(|| async { Json(sample_pets().items.remove(0)) }),
        );
        let server = TestServer::start(router).await.unwrap();

        let pet = server
            .client
            .query_pet(&server.url("/cats/v1/data/1"), None)
            .await
            .unwrap();
        assert_eq!(pet.name, "Felix");
    }

    #[tokio::test]
    async fn test_sends_accept_expires_and_traceparent() {
        let seen: Arc<Mutex<Option<HeaderMap>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let router = Router::new().route(
            "/data",
            get(move |headers: HeaderMap| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(headers);
                    Json(Pets::default())
                }
            }),
        );
        let server = TestServer::start(router).await.unwrap();
        let trace = TraceContext::new_root();

        server
            .client
            .query_pets(&server.url("/data"), Some(&trace))
            .await
            .unwrap();

        let headers = seen.lock().unwrap().take().unwrap();
        assert_eq!(headers["accept"], "application/json");
        assert_eq!(headers["expires"], "10ms");
        assert_eq!(
            headers[TRACEPARENT_HEADER].to_str().unwrap(),
            trace.to_traceparent()
        );
    }

    #[tokio::test]
    async fn test_no_traceparent_without_context() {
        let seen: Arc<Mutex<Option<HeaderMap>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let router = Router::new().route(
            "/data",
            get(move |headers: HeaderMap| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(headers);
                    Json(Pets::default())
                }
            }),
        );
        let server = TestServer::start(router).await.unwrap();

        server
            .client
            .query_pets(&server.url("/data"), None)
            .await
            .unwrap();

        let headers = seen.lock().unwrap().take().unwrap();
        assert!(headers.get(TRACEPARENT_HEADER).is_none());
    }

    #[tokio::test]
    async fn test_bad_status() {
        let router = Router::new().route(
            "/data",
            get(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Unexpected Error when querying the fishes repository",
                )
            }),
        );
        let server = TestServer::start(router).await.unwrap();

        let err = server
            .client
            .query_pets(&server.url("/data"), None)
            .await
            .unwrap_err();
        match err {
            QueryError::BadStatus { status, message } => {
                assert_eq!(status, 503);
                assert!(message.contains("fishes repository"));
            }
            other => panic!("expected BadStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_decode_error() {
        let router = Router::new().route("/data", get(|| async { "not json" }));
        let server = TestServer::start(router).await.unwrap();

        let err = server
            .client
            .query_pets(&server.url("/data"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Decode(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = PetClient::with_config(Duration::from_secs(2), Duration::from_secs(1)).unwrap();
        let err = client
            .query_pets(&format!("http://{}/data", addr), None)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Connection(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = PetClient::new().unwrap();
        let err = client.query_pets("not a url", None).await.unwrap_err();
        assert!(matches!(err, QueryError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_lookup_localhost() {
        let ips = lookup_service("localhost", 80).await;
        assert!(!ips.is_empty());
    }
}
