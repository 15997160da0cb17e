// src/services/review_service.rs

use uuid::Uuid;

use crate::{
    common::{db_utils::parse_id, error::AppError},
    db::{CompanyRepository, ReviewRepository},
    models::review::{CreateReviewPayload, Review, ReviewSort},
    services::rating_service::RatingAggregator,
};

#[derive(Clone)]
pub struct ReviewService {
    reviews: ReviewRepository,
    companies: CompanyRepository,
    aggregator: RatingAggregator,
}

impl ReviewService {
    pub fn new(reviews: ReviewRepository, companies: CompanyRepository, aggregator: RatingAggregator) -> Self {
        Self {
            reviews,
            companies,
            aggregator,
        }
    }

    /// Empresa sem avaliações (ou inexistente) devolve lista vazia.
    pub async fn list_for_company(&self, company_id: &str, sort_by: Option<&str>) -> Result<Vec<Review>, AppError> {
        let Some(company_id) = parse_id(company_id) else {
            return Ok(Vec::new());
        };

        self.reviews
            .list_for_company(company_id, ReviewSort::from_query(sort_by))
            .await
    }

    /// A existência da empresa é checada antes do resto do payload: um ID
    /// inexistente responde 404 mesmo com outros campos inválidos.
    pub async fn create(&self, payload: CreateReviewPayload) -> Result<Review, AppError> {
        // 1. A empresa precisa existir
        let company_id = match payload.requested_company_id() {
            Some(raw_id) => Some(self.existing_company(raw_id).await?),
            None => None,
        };

        // 2. Valida os campos (sem companyId cai aqui com 400)
        let draft = payload.into_draft()?;
        let company_id = company_id.ok_or(AppError::CompanyNotFound)?;

        // 3. Salva
        let review = self.reviews.create(&draft.for_company(company_id)).await?;

        // 4. Recalcula média e total da empresa
        self.aggregator.recompute(company_id).await?;

        tracing::info!(review_id = %review.id, %company_id, rating = review.rating, "Avaliação criada");
        Ok(review)
    }

    async fn existing_company(&self, raw_id: &str) -> Result<Uuid, AppError> {
        let company_id = parse_id(raw_id).ok_or(AppError::CompanyNotFound)?;
        if self.companies.find_by_id(company_id).await?.is_none() {
            return Err(AppError::CompanyNotFound);
        }
        Ok(company_id)
    }

    /// Curtir não mexe no agregado.
    pub async fn like(&self, id: &str) -> Result<Review, AppError> {
        let id = parse_id(id).ok_or(AppError::ReviewNotFound)?;

        self.reviews
            .increment_likes(id)
            .await?
            .ok_or(AppError::ReviewNotFound)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = parse_id(id).ok_or(AppError::ReviewNotFound)?;

        let company_id = self
            .reviews
            .delete(id)
            .await?
            .ok_or(AppError::ReviewNotFound)?;

        self.aggregator.recompute(company_id).await?;

        tracing::info!(review_id = %id, %company_id, "Avaliação removida");
        Ok(())
    }
}
