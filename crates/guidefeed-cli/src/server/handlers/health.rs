//! Liveness handler.

use axum::Json;
use serde::Serialize;

/// Response of the root endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub mensagem: &'static str,
}

/// Tell the caller the API is up.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        mensagem: "API operando com sucesso!",
    })
}
