// src/models/response.rs

use serde::Serialize;
use utoipa::ToSchema;

// Resposta simples de operações sem corpo (ex: exclusões)
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Review deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "Server is running")]
    pub status: String,
}
