// src/services/rating_service.rs

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, ReviewRepository},
};

/// Agregado guardado na empresa: média (1 casa decimal) e total de avaliações.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingSummary {
    pub average_rating: Decimal,
    pub total_reviews: i32,
}

impl RatingSummary {
    pub fn empty() -> Self {
        Self {
            average_rating: Decimal::ZERO,
            total_reviews: 0,
        }
    }

    /// Média arredondada para uma casa, com empate para cima (4.25 -> 4.3).
    pub fn from_ratings(ratings: &[i32]) -> Self {
        if ratings.is_empty() {
            return Self::empty();
        }

        let total: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
        let count = ratings.len() as i64;
        let mean = Decimal::from(total) / Decimal::from(count);

        Self {
            average_rating: mean.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            total_reviews: ratings.len() as i32,
        }
    }
}

// Recalcula o agregado relendo todas as avaliações da empresa.
// Não roda em transação com a escrita que o disparou.
#[derive(Clone)]
pub struct RatingAggregator {
    companies: CompanyRepository,
    reviews: ReviewRepository,
}

impl RatingAggregator {
    pub fn new(companies: CompanyRepository, reviews: ReviewRepository) -> Self {
        Self { companies, reviews }
    }

    pub async fn recompute(&self, company_id: Uuid) -> Result<RatingSummary, AppError> {
        let ratings = self.reviews.ratings_for_company(company_id).await?;
        let summary = RatingSummary::from_ratings(&ratings);

        self.companies.update_rating(company_id, &summary).await?;

        tracing::debug!(
            %company_id,
            average_rating = %summary.average_rating,
            total_reviews = summary.total_reviews,
            "Agregado de avaliações recalculado"
        );

        Ok(summary)
    }
}
