// ==========================================
// КТП конфигуратор - ошибки слоя хранения
// ==========================================
// Инструмент: thiserror
// ==========================================

use thiserror::Error;

/// Ошибки слоя хранения каталогов
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Ошибки базы данных =====
    #[error("запись не найдена: {entity} с id={id}")]
    NotFound { entity: String, id: String },

    #[error("не удалось открыть базу данных: {0}")]
    DatabaseConnectionError(String),

    #[error("не удалось захватить блокировку соединения: {0}")]
    LockError(String),

    #[error("ошибка запроса к базе данных: {0}")]
    DatabaseQueryError(String),

    #[error("нарушение уникальности: {0}")]
    UniqueConstraintViolation(String),

    // ===== Ошибки качества данных =====
    #[error("повреждённое поле (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== Общие =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Псевдоним Result слоя хранения
pub type RepositoryResult<T> = Result<T, RepositoryError>;
