//! In-process HTTP servers for tests
//!
//! Gateway and provider routers are bound to an ephemeral loopback port
//! and reached over real HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::{PetClient, Result};

const TEST_TIMEOUT: Duration = Duration::from_secs(5);
const TEST_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// A router served on `127.0.0.1:<ephemeral>`; stopped on drop
pub struct TestServer {
    pub addr: SocketAddr,
    /// Typed client with short timeouts
    pub client: PetClient,
    /// Raw HTTP client for status and header assertions
    pub http: reqwest::Client,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start(router: axum::Router) -> Result<Self> {
        Self::start_with_timeout(router, TEST_TIMEOUT, TEST_CONNECT_TIMEOUT).await
    }

    /// Same as [`TestServer::start`], with the clients' timeouts given
    pub async fn start_with_timeout(
        router: axum::Router,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        // The socket is listening once bound; requests queue until serve runs
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let client = PetClient::with_config(timeout, connect_timeout)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let served = axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    stopped.await.ok();
                })
                .await;
            if let Err(e) = served {
                tracing::warn!(error = %e, "Test server stopped with error");
            }
        });

        Ok(Self {
            addr,
            client,
            http,
            stop: Some(stop),
            task: Some(task),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for `path`, which starts with `/`
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Stop serving and wait for in-flight requests
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            stop.send(()).ok();
        }
        if let Some(task) = self.task.take() {
            task.await.ok();
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop.send(()).ok();
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
