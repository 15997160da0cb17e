// src/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Company Reviews API", description = "Empresas, avaliações e a média de notas de cada empresa"),
    paths(
        // --- Health ---
        handlers::health::health,

        // --- Companies ---
        handlers::companies::list_companies,
        handlers::companies::get_company,
        handlers::companies::create_company,
        handlers::companies::update_company,
        handlers::companies::delete_company,

        // --- Reviews ---
        handlers::reviews::list_company_reviews,
        handlers::reviews::create_review,
        handlers::reviews::like_review,
        handlers::reviews::delete_review,
    ),
    components(
        schemas(
            // --- Companies ---
            models::company::Company,
            models::company::CreateCompanyForm,
            models::company::UpdateCompanyPayload,

            // --- Reviews ---
            models::review::Review,
            models::review::CreateReviewPayload,

            // --- Respostas ---
            models::response::MessageResponse,
            models::response::HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Verificação de disponibilidade"),
        (name = "Companies", description = "Cadastro, busca e logo das empresas"),
        (name = "Reviews", description = "Avaliações, curtidas e agregado de notas")
    )
)]
pub struct ApiDoc;

// GET /api/docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
