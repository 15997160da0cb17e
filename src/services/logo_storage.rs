// src/services/logo_storage.rs

use chrono::Utc;
use rand::Rng;
use std::path::{Path, PathBuf};

use crate::common::error::AppError;

/// Tamanho máximo do arquivo de logo (5 MiB).
pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_IMAGE_TYPES: [&str; 5] = ["jpeg", "jpg", "png", "gif", "svg"];

// Subpasta dentro do diretório de uploads e prefixo público correspondente
const LOGO_DIR: &str = "logos";
const PUBLIC_PREFIX: &str = "/uploads/logos";

/// Arquivo recebido no campo `logo` do multipart.
#[derive(Debug, Clone)]
pub struct LogoUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl LogoUpload {
    /// Tipo primeiro, depois o tamanho.
    pub fn validate(&self) -> Result<(), AppError> {
        self.check_type()?;
        if self.bytes.len() > MAX_LOGO_BYTES {
            return Err(AppError::LogoTooLarge(MAX_LOGO_BYTES));
        }
        Ok(())
    }

    /// Extensão e content-type precisam apontar para uma imagem permitida.
    /// Só olha os cabeçalhos, então roda antes de ler o corpo do arquivo.
    pub fn check_type(&self) -> Result<(), AppError> {
        let extension = self
            .extension()
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let extension_ok = ALLOWED_IMAGE_TYPES.contains(&extension.as_str());

        let mime = self
            .content_type
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let mime_ok = ALLOWED_IMAGE_TYPES.iter().any(|t| mime.contains(t));

        if !(extension_ok && mime_ok) {
            return Err(AppError::UnsupportedLogoType);
        }
        Ok(())
    }

    fn extension(&self) -> Option<&str> {
        Path::new(&self.file_name).extension().and_then(|ext| ext.to_str())
    }
}

#[derive(Debug, Clone)]
pub struct StoredLogo {
    pub file_name: String,
    pub path: PathBuf,
    /// Caminho servido pela rota estática, gravado em `Company::logo`
    pub public_path: String,
}

#[derive(Debug, Clone)]
pub struct LogoStorage {
    root: PathBuf,
}

impl LogoStorage {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: upload_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Grava o arquivo com nome único, mantendo a extensão original.
    pub async fn store(&self, upload: &LogoUpload) -> Result<StoredLogo, AppError> {
        let dir = self.root.join(LOGO_DIR);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = generate_file_name(upload.extension());
        let path = dir.join(&file_name);
        tokio::fs::write(&path, &upload.bytes).await?;

        tracing::info!(file = %path.display(), size = upload.bytes.len(), "Logo gravado");

        Ok(StoredLogo {
            public_path: format!("{}/{}", PUBLIC_PREFIX, file_name),
            file_name,
            path,
        })
    }

    /// Remoção best-effort: a falha só é registrada no log.
    pub async fn remove(&self, logo: &StoredLogo) {
        if let Err(e) = tokio::fs::remove_file(&logo.path).await {
            tracing::error!(file = %logo.path.display(), "Erro ao apagar o logo: {}", e);
        }
    }
}

/// `logo-<millis>-<0..1e9>.<ext>`
fn generate_file_name(extension: Option<&str>) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);

    match extension {
        Some(ext) => format!("logo-{}-{}.{}", millis, suffix, ext),
        None => format!("logo-{}-{}", millis, suffix),
    }
}
