// src/services/company_service.rs

use crate::{
    common::{db_utils::parse_id, error::AppError},
    db::CompanyRepository,
    models::company::{
        Company, CompanyFilter, CompanyListQuery, CompanySort, CreateCompanyForm, UpdateCompanyPayload,
    },
    services::logo_storage::{LogoStorage, LogoUpload},
};

#[derive(Clone)]
pub struct CompanyService {
    repo: CompanyRepository,
    logos: LogoStorage,
}

impl CompanyService {
    pub fn new(repo: CompanyRepository, logos: LogoStorage) -> Self {
        Self { repo, logos }
    }

    pub fn logos(&self) -> &LogoStorage {
        &self.logos
    }

    pub async fn list(&self, query: &CompanyListQuery) -> Result<Vec<Company>, AppError> {
        let filter = CompanyFilter::from_query(query);
        let sort = CompanySort::from_query(query.sort_by.as_deref());

        self.repo.list(&filter, sort).await
    }

    pub async fn get(&self, id: &str) -> Result<Company, AppError> {
        let id = parse_id(id).ok_or(AppError::CompanyNotFound)?;

        self.repo.find_by_id(id).await?.ok_or(AppError::CompanyNotFound)
    }

    /// Cria a empresa com o logo enviado.
    ///
    /// Tudo é validado antes de gravar qualquer coisa. Se o INSERT falhar depois
    /// do arquivo salvo, o arquivo é apagado (best-effort).
    pub async fn create(&self, form: CreateCompanyForm, logo: Option<LogoUpload>) -> Result<Company, AppError> {
        let logo = logo.ok_or(AppError::LogoRequired)?;
        logo.validate()?;

        // Valida os campos com um caminho provisório; o definitivo só existe após gravar
        let mut new_company = form.into_new_company(String::new())?;

        let stored = self.logos.store(&logo).await?;
        new_company.logo = stored.public_path.clone();

        match self.repo.create(&new_company).await {
            Ok(company) => {
                tracing::info!(company_id = %company.id, name = %company.name, "Empresa criada");
                Ok(company)
            }
            Err(e) => {
                self.logos.remove(&stored).await;
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: &str, payload: UpdateCompanyPayload) -> Result<Company, AppError> {
        let id = parse_id(id).ok_or(AppError::CompanyNotFound)?;
        let changes = payload.into_changes()?;

        self.repo
            .update(id, &changes)
            .await?
            .ok_or(AppError::CompanyNotFound)
    }

    /// Sem cascata: as avaliações e o arquivo de logo continuam existindo.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = parse_id(id).ok_or(AppError::CompanyNotFound)?;

        if !self.repo.delete(id).await? {
            return Err(AppError::CompanyNotFound);
        }

        tracing::info!(company_id = %id, "Empresa removida");
        Ok(())
    }
}
