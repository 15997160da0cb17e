// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, path::PathBuf, sync::Arc, time::Duration};

use crate::{
    db::{CompanyRepository, ReviewRepository},
    services::{CompanyService, LogoStorage, RatingAggregator, ReviewService},
};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// Configuração lida das variáveis de ambiente (e do .env, se existir)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub environment: String,
    pub max_db_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de qualquer fonte chave -> valor.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT inválida: {}", raw))?,
            None => DEFAULT_PORT,
        };

        let max_db_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválida: {}", raw))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            port,
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            environment: lookup("APP_ENV").unwrap_or_else(|| "production".to_string()),
            max_db_connections,
        })
    }

    /// Em desenvolvimento os erros 500 levam o detalhe no campo `error`.
    pub fn expose_error_details(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub company_service: CompanyService,
    pub review_service: ReviewService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_db_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(config, db_pool))
    }

    /// Monta o gráfico de dependências sobre uma pool já criada.
    pub fn with_pool(config: Config, db_pool: PgPool) -> Self {
        let company_repo = CompanyRepository::new(db_pool.clone());
        let review_repo = ReviewRepository::new(db_pool.clone());

        let logos = LogoStorage::new(config.upload_dir.clone());
        let aggregator = RatingAggregator::new(company_repo.clone(), review_repo.clone());

        let company_service = CompanyService::new(company_repo.clone(), logos);
        let review_service = ReviewService::new(review_repo, company_repo, aggregator);

        Self {
            db_pool,
            config: Arc::new(config),
            company_service,
            review_service,
        }
    }
}
