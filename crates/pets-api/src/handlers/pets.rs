//! Aggregate and detail handlers

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use pets_core::routing::DetailPath;
use pets_core::{GatewayError, Pet, Pets};
use tracing::Instrument;

use crate::error::ApiError;
use crate::span::{ServerSpan, GLOBAL_FAILURE_KIND, GLOBAL_FAILURE_MESSAGE};
use crate::state::AppState;

/// GET /{route}
///
/// Merged listing from every reachable backend, sorted by name.
pub async fn list_pets(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Pets>, ApiError> {
    let server = ServerSpan::start("index", &headers);
    let trace = server.outbound(state.tracing_enabled()).copied();

    let result = state
        .aggregator()
        .aggregate(trace.as_ref())
        .instrument(server.span().clone())
        .await;

    match result {
        Ok(pets) => Ok(Json(pets)),
        Err(err) => {
            if matches!(err, GatewayError::Unavailable(_)) {
                server.record_error(GLOBAL_FAILURE_KIND, GLOBAL_FAILURE_MESSAGE);
            }
            Err(err.into())
        }
    }
}

/// GET /{route}/{backend}/{version}/{collection}/{id}
pub async fn get_pet(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Pet>, ApiError> {
    let server = ServerSpan::start("detail", &headers);
    let path = DetailPath::parse(&rest)?;
    let trace = server.outbound(state.tracing_enabled()).copied();

    let pet = state
        .detail()
        .fetch_path(&path, trace.as_ref())
        .instrument(server.span().clone())
        .await?;

    Ok(Json(pet))
}
