// src/db/review_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::review::{NewReview, Review, ReviewSort},
};

#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_company(&self, company_id: Uuid, sort: ReviewSort) -> Result<Vec<Review>, AppError> {
        // O ORDER BY vem de um enum, nunca da entrada do usuário
        let sql = format!(
            "SELECT * FROM reviews WHERE company_id = $1 ORDER BY {}",
            sort.order_by()
        );

        let reviews = sqlx::query_as::<_, Review>(&sql)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(reviews)
    }

    pub async fn create(&self, review: &NewReview) -> Result<Review, AppError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (company_id, full_name, subject, review_text, rating)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(review.company_id)
        .bind(&review.full_name)
        .bind(&review.subject)
        .bind(&review.review_text)
        .bind(review.rating)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_check_violation() {
                    return AppError::InvalidInput(db_err.message().to_string());
                }
            }
            AppError::DatabaseError(e)
        })?;

        Ok(review)
    }

    /// Incremento atômico de curtidas. `None` quando a avaliação não existe.
    pub async fn increment_likes(&self, id: Uuid) -> Result<Option<Review>, AppError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET likes = likes + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    /// Remove a avaliação e devolve o ID da empresa dona dela.
    pub async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, AppError> {
        let company_id = sqlx::query_scalar::<_, Uuid>("DELETE FROM reviews WHERE id = $1 RETURNING company_id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(company_id)
    }

    /// Notas de todas as avaliações atuais da empresa (fonte do agregado).
    pub async fn ratings_for_company(&self, company_id: Uuid) -> Result<Vec<i32>, AppError> {
        let ratings = sqlx::query_scalar::<_, i32>("SELECT rating FROM reviews WHERE company_id = $1")
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(ratings)
    }
}
