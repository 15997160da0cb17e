// src/common/error.rs

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;

// Erros da aplicação. Os handlers convertem para `ApiError` com o contexto da operação.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", describe_validation_errors(.0))]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Logo file is required")]
    LogoRequired,

    #[error("Only image files are allowed!")]
    UnsupportedLogoType,

    #[error("Logo file must not exceed {0} bytes")]
    LogoTooLarge(usize),

    #[error("Company not found")]
    CompanyNotFound,

    #[error("Review not found")]
    ReviewNotFound,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// Junta as mensagens do `validator` em uma linha, ordenadas pelo nome do campo.
/// Os campos saem no formato do JSON (`foundedOn`, não `founded_on`).
fn describe_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = wire_field_name(&field);
            field_errors.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.clone(), message)
            })
        })
        .collect();
    messages.sort();

    messages
        .into_iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join(", ")
}

fn wire_field_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            name.extend(c.to_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::LogoRequired
            | AppError::UnsupportedLogoType
            | AppError::LogoTooLarge(_) => StatusCode::BAD_REQUEST,
            AppError::CompanyNotFound | AppError::ReviewNotFound => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::IoError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converte o erro na resposta HTTP de uma operação.
    ///
    /// `context` vira a `message` do corpo (ex: "Error creating review"). Os erros
    /// "não encontrado" e a falta de logo respondem só com a própria mensagem.
    /// O detalhe de erros 5xx só é exposto quando `config.expose_error_details()`.
    pub fn to_api_error(self, context: &str, config: &Config) -> ApiError {
        let status = self.status_code();

        match self {
            AppError::CompanyNotFound | AppError::ReviewNotFound | AppError::LogoRequired => {
                ApiError::new(status, self.to_string(), None)
            }
            ref e if status.is_server_error() => {
                tracing::error!("{}: {}", context, e);
                let detail = config.expose_error_details().then(|| e.to_string());
                ApiError::new(status, context, detail)
            }
            e => ApiError::new(status, context, Some(e.to_string())),
        }
    }
}

// Rejeições dos extratores (JSON malformado, multipart inválido) viram 400.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::InvalidInput(format!("Invalid multipart body: {}", err.body_text()))
    }
}

// Usado quando o erro sai direto de um extrator, sem contexto de operação.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
            return ApiError::new(status, "Something went wrong!", None).into_response();
        }
        ApiError::new(status, self.to_string(), None).into_response()
    }
}

/// Resposta de erro enviada ao cliente: `{ "message": ..., "error": ... }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            message: &self.message,
            error: self.error.as_deref(),
        });
        (self.status, body).into_response()
    }
}
