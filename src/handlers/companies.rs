// src/handlers/companies.rs

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    models::{
        company::{Company, CompanyListQuery, CreateCompanyForm, UpdateCompanyPayload},
        response::MessageResponse,
    },
    services::{LogoUpload, MAX_LOGO_BYTES},
};

// GET /api/companies
#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Companies",
    params(CompanyListQuery),
    responses(
        (status = 200, description = "Empresas filtradas e ordenadas", body = Vec<Company>),
        (status = 500, description = "Erro no banco")
    )
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
    Query(query): Query<CompanyListQuery>,
) -> Result<impl IntoResponse, ApiError> {

    let companies = app_state.company_service
        .list(&query)
        .await
        .map_err(|e| e.to_api_error("Error fetching companies", &app_state.config))?;

    Ok((StatusCode::OK, Json(companies)))
}

// GET /api/companies/{id}
#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(("id" = String, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa", body = Company),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let company = app_state.company_service
        .get(&id)
        .await
        .map_err(|e| e.to_api_error("Error fetching company", &app_state.config))?;

    Ok((StatusCode::OK, Json(company)))
}

// POST /api/companies (multipart/form-data)
#[utoipa::path(
    post,
    path = "/api/companies",
    tag = "Companies",
    request_body(
        content = CreateCompanyForm,
        content_type = "multipart/form-data",
        description = "Campos da empresa mais o arquivo `logo` (jpeg, jpg, png, gif ou svg, até 5 MiB)"
    ),
    responses(
        (status = 201, description = "Empresa criada", body = Company),
        (status = 400, description = "Logo ausente ou inválido, ou campos inválidos")
    )
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    WithRejection(multipart, _): WithRejection<Multipart, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let (form, logo) = read_company_form(multipart)
        .await
        .map_err(|e| e.to_api_error("Error creating company", &app_state.config))?;

    let company = app_state.company_service
        .create(form, logo)
        .await
        .map_err(|e| e.to_api_error("Error creating company", &app_state.config))?;

    Ok((StatusCode::CREATED, Json(company)))
}

// PUT /api/companies/{id}
#[utoipa::path(
    put,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(("id" = String, Path, description = "ID da empresa")),
    request_body = UpdateCompanyPayload,
    responses(
        (status = 200, description = "Empresa atualizada", body = Company),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateCompanyPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let company = app_state.company_service
        .update(&id, payload)
        .await
        .map_err(|e| e.to_api_error("Error updating company", &app_state.config))?;

    Ok((StatusCode::OK, Json(company)))
}

// DELETE /api/companies/{id}
#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(("id" = String, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa removida", body = MessageResponse),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn delete_company(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.company_service
        .delete(&id)
        .await
        .map_err(|e| e.to_api_error("Error deleting company", &app_state.config))?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Company deleted successfully"))))
}

// Lê o multipart inteiro: campos de texto no formulário e o arquivo `logo` à parte.
// Um campo `logo` vazio (navegador sem arquivo escolhido) conta como ausente.
async fn read_company_form(mut multipart: Multipart) -> Result<(CreateCompanyForm, Option<LogoUpload>), AppError> {
    let mut form = CreateCompanyForm::default();
    let mut logo: Option<LogoUpload> = None;

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "logo" => {
                let mut upload = LogoUpload {
                    file_name: field.file_name().unwrap_or_default().to_string(),
                    content_type: field.content_type().map(str::to_string),
                    bytes: Vec::new(),
                };

                // Com nome de arquivo: duplicado e tipo são checados antes de ler o corpo
                let has_file_name = !upload.file_name.is_empty();
                if has_file_name {
                    if logo.is_some() {
                        return Err(AppError::InvalidInput("Only one logo file is allowed".to_string()));
                    }
                    upload.check_type()?;
                }

                while let Some(chunk) = field.chunk().await? {
                    if upload.bytes.len() + chunk.len() > MAX_LOGO_BYTES {
                        return Err(AppError::LogoTooLarge(MAX_LOGO_BYTES));
                    }
                    upload.bytes.extend_from_slice(&chunk);
                }

                if !has_file_name {
                    if upload.bytes.is_empty() {
                        continue;
                    }
                    if logo.is_some() {
                        return Err(AppError::InvalidInput("Only one logo file is allowed".to_string()));
                    }
                    upload.check_type()?;
                }

                logo = Some(upload);
            }
            "name" => form.name = field.text().await?,
            "location" => form.location = field.text().await?,
            "city" => form.city = field.text().await?,
            "foundedOn" => form.founded_on = field.text().await?,
            "description" => form.description = field.text().await?,
            other => {
                tracing::debug!(field = other, "Campo multipart ignorado");
            }
        }
    }

    Ok((form, logo))
}
