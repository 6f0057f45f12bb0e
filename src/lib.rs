// ==========================================
// КТП конфигуратор - ядро библиотеки
// ==========================================
// Назначение: подбор комплектующих по каталогу и расчёт
// отпускной стоимости секций КТП
// Технологии: Rust + SQLite
// ==========================================

// ==========================================
// Объявление модулей
// ==========================================

// Доменный слой - сущности и типы
pub mod domain;

// Слой хранения - доступ к каталогам
pub mod repository;

// Расчётный движок - правила подбора и калькуляции
pub mod engine;

// Слой импорта - внешние данные
pub mod importer;

// Слой конфигурации - политики расчёта
pub mod config;

// Инфраструктура БД (инициализация соединений/схемы)
pub mod db;

// Логирование
pub mod logging;

// Слой API - бизнес-интерфейс
pub mod api;

// ==========================================
// Реэкспорт ядра
// ==========================================

// Доменные типы
pub use domain::types::{AssemblyKind, CellPurpose, ConductorMaterial, MaterialGroup};

// Доменные сущности
pub use domain::{
    BreakdownLine, BridgeSegment, Cell, ComponentCandidate, CostResult, CostSummary,
    CostTemplate, ProjectSelection, SelectedComponents, SwitchgearReference,
};

// Движок
pub use engine::{
    compute_cost, required_current_amps, ConfigurationResolver, CostAggregator, CostError,
    LineItem, ParallelOption, ParameterMatcher, PricingPolicy, RatingExtractor, WeightCalculator,
};

// Фасад
pub use api::{ApiError, CostingApi, ProjectEstimate};

/// Версия системы
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
