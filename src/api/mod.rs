// ==========================================
// КТП конфигуратор - слой API
// ==========================================
// Ответственность: бизнес-интерфейс для UI/экспорта
// ==========================================

pub mod costing_api;
pub mod error;

pub use costing_api::{CostingApi, ProjectEstimate, DEFAULT_LV_VOLTAGE_V};
pub use error::{ApiError, ApiResult};
