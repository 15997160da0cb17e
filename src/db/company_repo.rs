// src/db/company_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{db_utils::like_pattern, error::AppError},
    models::company::{Company, CompanyChanges, CompanyFilter, CompanySort, NewCompany},
    services::rating_service::RatingSummary,
};

// O repositório de empresas, responsável por todas as interações com a tabela 'companies'
#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lista empresas aplicando busca, filtro de cidade e ordenação.
    pub async fn list(&self, filter: &CompanyFilter, sort: CompanySort) -> Result<Vec<Company>, AppError> {
        let mut query = build_list_query(filter, sort);

        let companies = query
            .build_query_as::<Company>()
            .fetch_all(&self.pool)
            .await?;

        Ok(companies)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(company)
    }

    pub async fn create(&self, company: &NewCompany) -> Result<Company, AppError> {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, location, city, founded_on, logo, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&company.name)
        .bind(&company.location)
        .bind(&company.city)
        .bind(company.founded_on)
        .bind(&company.logo)
        .bind(&company.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)
    }

    /// Atualiza só os campos presentes. `None` quando a empresa não existe.
    pub async fn update(&self, id: Uuid, changes: &CompanyChanges) -> Result<Option<Company>, AppError> {
        sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET
                name = COALESCE($2, name),
                location = COALESCE($3, location),
                city = COALESCE($4, city),
                founded_on = COALESCE($5, founded_on),
                logo = COALESCE($6, logo),
                description = COALESCE($7, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.location.as_deref())
        .bind(changes.city.as_deref())
        .bind(changes.founded_on)
        .bind(changes.logo.as_deref())
        .bind(changes.description.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint_error)
    }

    /// Remove a empresa. As avaliações dela ficam no banco.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Grava o agregado recalculado. Não falha se a empresa sumiu nesse meio tempo.
    pub async fn update_rating(&self, id: Uuid, summary: &RatingSummary) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE companies
            SET average_rating = $2, total_reviews = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(summary.average_rating)
        .bind(summary.total_reviews)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Monta o SELECT de listagem. A busca é um OR de "contém" nos três campos;
/// a cidade é igualdade exata sem diferenciar maiúsculas.
pub(crate) fn build_list_query(filter: &CompanyFilter, sort: CompanySort) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT * FROM companies");
    let mut has_where = false;

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        query
            .push(" WHERE (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR location ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR city ILIKE ")
            .push_bind(pattern)
            .push(")");
        has_where = true;
    }

    if let Some(city) = &filter.city {
        query
            .push(if has_where { " AND " } else { " WHERE " })
            .push("LOWER(city) = LOWER(")
            .push_bind(city.clone())
            .push(")");
    }

    query.push(" ORDER BY ").push(sort.order_by());
    query
}

// Violação de CHECK (ex: campo obrigatório vazio) é erro do cliente
fn map_constraint_error(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_check_violation() {
            return AppError::InvalidInput(db_err.message().to_string());
        }
    }
    AppError::DatabaseError(e)
}
