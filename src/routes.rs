// src/routes.rs

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    config::AppState,
    docs,
    handlers,
    models::response::MessageResponse,
    services::MAX_LOGO_BYTES,
};

// Folga para os campos de texto que acompanham o logo no multipart
const MAX_UPLOAD_BODY_BYTES: usize = MAX_LOGO_BYTES + 1024 * 1024;

/// Monta o router completo da aplicação.
pub fn build_router(app_state: AppState) -> Router {
    let company_routes = Router::new()
        .route(
            "/api/companies",
            get(handlers::companies::list_companies).post(handlers::companies::create_company),
        )
        .route(
            "/api/companies/{id}",
            get(handlers::companies::get_company)
                .put(handlers::companies::update_company)
                .delete(handlers::companies::delete_company),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES));

    let review_routes = Router::new()
        .route("/api/reviews", post(handlers::reviews::create_review))
        .route(
            "/api/reviews/company/{company_id}",
            get(handlers::reviews::list_company_reviews),
        )
        .route("/api/reviews/{id}/like", patch(handlers::reviews::like_review))
        .route("/api/reviews/{id}", delete(handlers::reviews::delete_review));

    // Os logos gravados ficam em <UPLOAD_DIR>/logos e são servidos em /uploads/logos
    let uploads = ServeDir::new(app_state.company_service.logos().root());

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/docs/openapi.json", get(docs::openapi_json))
        .merge(company_routes)
        .merge(review_routes)
        .nest_service("/uploads", uploads)
        .fallback(handlers::health::route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "panic sem mensagem"
    };
    tracing::error!("🔥 Panic ao processar requisição: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageResponse::new("Something went wrong!")),
    )
        .into_response()
}
