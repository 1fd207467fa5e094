//! Kubernetes-style health probes

/// GET /readiness
pub async fn readiness() -> &'static str {
    "ok"
}

/// GET /liveness
pub async fn liveness() -> &'static str {
    "ok"
}
