// ==========================================
// КТП конфигуратор - ошибки импорта
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Ошибки импорта прайс-листов и справочников
#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("файл не прочитан: {0}")]
    Io(#[from] std::io::Error),

    #[error("ошибка разбора CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ImporterResult<T> = Result<T, ImporterError>;
