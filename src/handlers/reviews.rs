// src/handlers/reviews.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    models::{
        response::MessageResponse,
        review::{CreateReviewPayload, Review, ReviewListQuery},
    },
};

// GET /api/reviews/company/{company_id}
#[utoipa::path(
    get,
    path = "/api/reviews/company/{company_id}",
    tag = "Reviews",
    params(
        ("company_id" = String, Path, description = "ID da empresa"),
        ReviewListQuery
    ),
    responses(
        (status = 200, description = "Avaliações da empresa", body = Vec<Review>)
    )
)]
pub async fn list_company_reviews(
    State(app_state): State<AppState>,
    Path(company_id): Path<String>,
    Query(query): Query<ReviewListQuery>,
) -> Result<impl IntoResponse, ApiError> {

    let reviews = app_state.review_service
        .list_for_company(&company_id, query.sort_by.as_deref())
        .await
        .map_err(|e| e.to_api_error("Error fetching reviews", &app_state.config))?;

    Ok((StatusCode::OK, Json(reviews)))
}

// POST /api/reviews
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "Reviews",
    request_body = CreateReviewPayload,
    responses(
        (status = 201, description = "Avaliação criada", body = Review),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn create_review(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateReviewPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let review = app_state.review_service
        .create(payload)
        .await
        .map_err(|e| e.to_api_error("Error creating review", &app_state.config))?;

    Ok((StatusCode::CREATED, Json(review)))
}

// PATCH /api/reviews/{id}/like
#[utoipa::path(
    patch,
    path = "/api/reviews/{id}/like",
    tag = "Reviews",
    params(("id" = String, Path, description = "ID da avaliação")),
    responses(
        (status = 200, description = "Avaliação com a curtida somada", body = Review),
        (status = 404, description = "Avaliação não encontrada")
    )
)]
pub async fn like_review(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let review = app_state.review_service
        .like(&id)
        .await
        .map_err(|e| e.to_api_error("Error liking review", &app_state.config))?;

    Ok((StatusCode::OK, Json(review)))
}

// DELETE /api/reviews/{id}
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "Reviews",
    params(("id" = String, Path, description = "ID da avaliação")),
    responses(
        (status = 200, description = "Avaliação removida", body = MessageResponse),
        (status = 404, description = "Avaliação não encontrada")
    )
)]
pub async fn delete_review(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.review_service
        .delete(&id)
        .await
        .map_err(|e| e.to_api_error("Error deleting review", &app_state.config))?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Review deleted successfully"))))
}
