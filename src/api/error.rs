// ==========================================
// КТП конфигуратор - ошибки слоя API
// ==========================================

use crate::domain::types::AssemblyKind;
use crate::engine::cost::CostError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Ошибки фасада расчёта
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Cost(#[from] CostError),

    #[error("нет шаблона себестоимости для типа сборки {kind}")]
    TemplateMissing { kind: AssemblyKind },
}

pub type ApiResult<T> = Result<T, ApiError>;
