// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub company_id: Uuid,

    #[schema(example = "Jorge Silva")]
    pub full_name: String,

    #[schema(example = "Ótimo lugar para trabalhar")]
    pub subject: String,

    pub review_text: String,

    #[schema(minimum = 1, maximum = 5, example = 4)]
    pub rating: i32,
    pub likes: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O companyId chega como texto: um ID malformado responde 404, não 400.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewPayload {
    #[validate(
        required(message = "Company ID is required"),
        length(min = 1, message = "Company ID is required")
    )]
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub company_id: Option<String>,

    #[validate(
        required(message = "Full name is required"),
        length(min = 1, message = "Full name is required")
    )]
    pub full_name: Option<String>,

    #[validate(
        required(message = "Subject is required"),
        length(min = 1, message = "Subject is required")
    )]
    pub subject: Option<String>,

    #[validate(
        required(message = "Review text is required"),
        length(min = 1, message = "Review text is required")
    )]
    pub review_text: Option<String>,

    #[validate(
        required(message = "Rating is required"),
        range(min = 1, max = 5, message = "Rating must be between 1 and 5")
    )]
    #[schema(minimum = 1, maximum = 5, example = 5)]
    pub rating: Option<i32>,
}

/// Avaliação já validada, com o ID da empresa ainda em texto.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub company_id: String,
    pub full_name: String,
    pub subject: String,
    pub review_text: String,
    pub rating: i32,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub company_id: Uuid,
    pub full_name: String,
    pub subject: String,
    pub review_text: String,
    pub rating: i32,
}

impl ReviewDraft {
    pub fn for_company(self, company_id: Uuid) -> NewReview {
        NewReview {
            company_id,
            full_name: self.full_name,
            subject: self.subject,
            review_text: self.review_text,
            rating: self.rating,
        }
    }
}

impl CreateReviewPayload {
    /// ID da empresa informado, já sem espaços; `None` se ausente ou em branco.
    pub fn requested_company_id(&self) -> Option<&str> {
        self.company_id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    pub fn into_draft(self) -> Result<ReviewDraft, ValidationErrors> {
        // `reviewText` é guardado como veio, sem trim
        let payload = Self {
            company_id: self.company_id.map(|v| v.trim().to_string()),
            full_name: self.full_name.map(|v| v.trim().to_string()),
            subject: self.subject.map(|v| v.trim().to_string()),
            review_text: self.review_text,
            rating: self.rating,
        };
        payload.validate()?;

        Ok(ReviewDraft {
            company_id: payload.company_id.unwrap_or_default(),
            full_name: payload.full_name.unwrap_or_default(),
            subject: payload.subject.unwrap_or_default(),
            review_text: payload.review_text.unwrap_or_default(),
            rating: payload.rating.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReviewListQuery {
    /// `rating`, `oldest` ou vazio (mais recentes primeiro)
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSort {
    Rating,
    Oldest,
    Newest,
}

impl ReviewSort {
    pub fn from_query(sort_by: Option<&str>) -> Self {
        match sort_by {
            Some("rating") => ReviewSort::Rating,
            Some("oldest") => ReviewSort::Oldest,
            _ => ReviewSort::Newest,
        }
    }

    pub fn order_by(self) -> &'static str {
        match self {
            ReviewSort::Rating => "rating DESC, created_at DESC",
            ReviewSort::Oldest => "created_at ASC",
            ReviewSort::Newest => "created_at DESC",
        }
    }
}
