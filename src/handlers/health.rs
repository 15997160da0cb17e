// src/handlers/health.rs

use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::models::response::{HealthResponse, MessageResponse};

// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Servidor no ar", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running".to_string(),
    })
}

// Qualquer rota desconhecida
pub async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(MessageResponse::new("Route not found")))
}
