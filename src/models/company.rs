// src/models/company.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

// Representa uma empresa vinda do banco de dados
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,

    #[schema(example = "Graffersid Web and App Development")]
    pub name: String,

    #[schema(example = "816, Shekhar Central, Manorama Ganj, AB road, New Palasia")]
    pub location: String,

    #[schema(example = "Indore")]
    pub city: String,

    #[schema(value_type = String, format = Date, example = "2016-01-01")]
    pub founded_on: NaiveDate,

    // Caminho público do logo (ex: /uploads/logos/logo-1700000000000-123.png)
    pub logo: String,
    pub description: String,

    // Agregado das avaliações: nunca vem do cliente
    #[schema(value_type = f64, example = 4.5)]
    pub average_rating: Decimal,
    pub total_reviews: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Campos de texto do formulário multipart de criação (o arquivo `logo` vem à parte).
#[derive(Debug, Default, Clone, Validate, ToSchema)]
pub struct CreateCompanyForm {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(custom(function = "validate_founded_on"))]
    #[schema(example = "2016-01-01")]
    pub founded_on: String,

    pub description: String,
}

impl CreateCompanyForm {
    /// Aplica o `trim` dos campos obrigatórios antes da validação.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            city: self.city.trim().to_string(),
            founded_on: self.founded_on.trim().to_string(),
            description: self.description,
        }
    }

    /// Valida e converte no registro a ser inserido.
    pub fn into_new_company(self, logo: String) -> Result<NewCompany, ValidationErrors> {
        let form = self.normalized();
        form.validate()?;

        let founded_on = parse_founded_on(&form.founded_on)
            .ok_or_else(|| single_error("founded_on", "invalid_date", "Founded date must be a valid date"))?;

        Ok(NewCompany {
            name: form.name,
            location: form.location,
            city: form.city,
            founded_on,
            logo,
            description: form.description,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub location: String,
    pub city: String,
    pub founded_on: NaiveDate,
    pub logo: String,
    pub description: String,
}

// PUT /api/companies/{id}: qualquer subconjunto dos campos editáveis.
// `averageRating` e `totalReviews` são ignorados se vierem no corpo.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyPayload {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: Option<String>,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: Option<String>,

    #[schema(example = "2016-01-01")]
    pub founded_on: Option<String>,

    pub logo: Option<String>,
    pub description: Option<String>,
}

impl UpdateCompanyPayload {
    pub fn into_changes(self) -> Result<CompanyChanges, ValidationErrors> {
        let trimmed = |value: Option<String>| value.map(|v| v.trim().to_string());

        let payload = Self {
            name: trimmed(self.name),
            location: trimmed(self.location),
            city: trimmed(self.city),
            founded_on: trimmed(self.founded_on),
            logo: self.logo,
            description: self.description,
        };
        payload.validate()?;

        let founded_on = match payload.founded_on.as_deref() {
            Some(raw) => Some(parse_founded_on(raw).ok_or_else(|| {
                single_error("founded_on", "invalid_date", "Founded date must be a valid date")
            })?),
            None => None,
        };

        Ok(CompanyChanges {
            name: payload.name,
            location: payload.location,
            city: payload.city,
            founded_on,
            logo: payload.logo,
            description: payload.description,
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub founded_on: Option<NaiveDate>,
    pub logo: Option<String>,
    pub description: Option<String>,
}

// GET /api/companies?search=&city=&sortBy=
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CompanyListQuery {
    /// Substring buscada em nome, endereço e cidade
    pub search: Option<String>,
    /// Cidade exata (sem diferenciar maiúsculas)
    pub city: Option<String>,
    /// `name`, `rating` ou vazio (mais recentes primeiro)
    pub sort_by: Option<String>,
}

/// Filtro normalizado: strings vazias contam como ausentes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompanyFilter {
    pub search: Option<String>,
    pub city: Option<String>,
}

impl CompanyFilter {
    pub fn from_query(query: &CompanyListQuery) -> Self {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            search: non_empty(&query.search),
            city: non_empty(&query.city),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySort {
    Name,
    Rating,
    Newest,
}

impl CompanySort {
    pub fn from_query(sort_by: Option<&str>) -> Self {
        match sort_by {
            Some("name") => CompanySort::Name,
            Some("rating") => CompanySort::Rating,
            _ => CompanySort::Newest,
        }
    }

    pub fn order_by(self) -> &'static str {
        match self {
            CompanySort::Name => "name ASC, created_at DESC",
            CompanySort::Rating => "average_rating DESC, created_at DESC",
            CompanySort::Newest => "created_at DESC",
        }
    }
}

/// Aceita `YYYY-MM-DD` ou um timestamp RFC 3339 (o que o `<input type=date>` e o JS mandam).
pub fn parse_founded_on(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn validate_founded_on(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Founded date is required".into());
        return Err(err);
    }
    if parse_founded_on(value).is_none() {
        let mut err = ValidationError::new("invalid_date");
        err.message = Some("Founded date must be a valid date".into());
        return Err(err);
    }
    Ok(())
}

fn single_error(field: &'static str, code: &'static str, message: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    errors.add(field, err);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CreateCompanyForm {
        CreateCompanyForm {
            name: "  Acme Corp ".into(),
            location: " 5th Avenue ".into(),
            city: " New York".into(),
            founded_on: "2016-01-01".into(),
            description: String::new(),
        }
    }

    #[test]
    fn sort_keys_fall_back_to_newest() {
        assert_eq!(CompanySort::from_query(Some("name")), CompanySort::Name);
        assert_eq!(CompanySort::from_query(Some("rating")), CompanySort::Rating);
        assert_eq!(CompanySort::from_query(Some("oldest")), CompanySort::Newest);
        assert_eq!(CompanySort::from_query(None), CompanySort::Newest);
        assert!(CompanySort::Rating.order_by().starts_with("average_rating DESC"));
    }

    #[test]
    fn empty_filters_are_ignored() {
        let query = CompanyListQuery {
            search: Some("  ".into()),
            city: Some(" Indore ".into()),
            sort_by: None,
        };
        assert_eq!(
            CompanyFilter::from_query(&query),
            CompanyFilter {
                search: None,
                city: Some("Indore".into())
            }
        );
    }

    #[test]
    fn founded_on_accepts_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2016, 1, 1);
        assert_eq!(parse_founded_on("2016-01-01"), expected);
        assert_eq!(parse_founded_on("2016-01-01T00:00:00.000Z"), expected);
        assert_eq!(parse_founded_on("01/01/2016"), None);
    }

    #[test]
    fn create_form_trims_and_converts() {
        let company = form().into_new_company("/uploads/logos/a.png".into()).unwrap();
        assert_eq!(company.name, "Acme Corp");
        assert_eq!(company.location, "5th Avenue");
        assert_eq!(company.city, "New York");
        assert_eq!(company.logo, "/uploads/logos/a.png");
    }

    #[test]
    fn create_form_requires_fields() {
        let mut missing = form();
        missing.name = "   ".into();
        missing.founded_on = String::new();

        let errors = missing.into_new_company(String::new()).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("founded_on"));
        assert!(!fields.contains_key("city"));
    }

    #[test]
    fn update_rejects_blank_required_fields() {
        let payload = UpdateCompanyPayload {
            city: Some("   ".into()),
            ..Default::default()
        };
        assert!(payload.into_changes().is_err());
    }

    #[test]
    fn update_parses_dates_and_keeps_absent_fields_empty() {
        let payload = UpdateCompanyPayload {
            description: Some("Updated".into()),
            founded_on: Some("2020-05-17".into()),
            ..Default::default()
        };
        let changes = payload.into_changes().unwrap();
        assert_eq!(changes.description.as_deref(), Some("Updated"));
        assert_eq!(changes.founded_on, NaiveDate::from_ymd_opt(2020, 5, 17));
        assert!(changes.name.is_none());

        let invalid = UpdateCompanyPayload {
            founded_on: Some("not a date".into()),
            ..Default::default()
        };
        assert!(invalid.into_changes().is_err());
    }
}
