// ==========================================
// КТП конфигуратор - расчётный движок
// ==========================================
// Ответственность: чистые правила подбора и расчёта
// Красная линия: движок без SQL и ввода-вывода, детерминирован,
// повторный прогон по тем же входам даёт побитово тот же результат
// ==========================================

pub mod aggregator;
pub mod cost;
pub mod matcher;
pub mod rating;
pub mod resolver;
pub mod weight;

// Реэкспорт ядра движка
pub use aggregator::{CostAggregator, LineItem, PricedLine};
pub use cost::{compute_cost, CostCalcResult, CostError};
pub use matcher::{
    required_current_amps, ParallelOption, ParameterMatcher, DEFAULT_MAX_SUPPORTED_RATING,
    PARALLEL_TABLE,
};
pub use rating::{RatingExtractor, RatingPattern};
pub use resolver::ConfigurationResolver;
pub use weight::{BusbarSystemCost, PricedBridgeSegment, PricingPolicy, WeightCalculator};
