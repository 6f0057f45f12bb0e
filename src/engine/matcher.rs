// ==========================================
// КТП конфигуратор - подбор параллельных конфигураций
// ==========================================
// Инженерное правило: выключатели меньшего номинала собираются
// в параллель, чтобы обеспечить ту же пропускную способность.
// Таблица "номинал -> количество аппаратов" фиксирована.
// ==========================================

use crate::domain::component::ComponentCandidate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Стандартные номиналы и требуемое количество аппаратов в параллель,
/// по убыванию номинала
pub const PARALLEL_TABLE: &[(u32, u32)] = &[
    (1000, 1),
    (630, 2),
    (400, 4),
    (250, 4),
    (160, 4),
    (100, 6),
    (80, 6),
    (63, 6),
];

/// Предельный номинал корпусных выключателей по умолчанию (А)
pub const DEFAULT_MAX_SUPPORTED_RATING: u32 = 1600;

// ==========================================
// ParallelOption - один вариант комплектации
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelOption {
    pub rating: u32,     // номинал одного аппарата, А
    pub unit_count: u32, // сколько аппаратов ставится в параллель
    pub candidates: Vec<ComponentCandidate>, // подходящие позиции каталога
}

// ==========================================
// ParameterMatcher - группировка пула по номиналу
// ==========================================
pub struct ParameterMatcher {
    max_supported_rating: u32,
}

impl ParameterMatcher {
    pub fn new(max_supported_rating: u32) -> Self {
        Self { max_supported_rating }
    }

    /// Варианты комплектации из пула позиций каталога
    ///
    /// Пул предварительно сужается до позиций с распознанным током
    /// не выше предельного номинала. Вариант выдаётся только для тех
    /// строк таблицы, чей номинал реально присутствует в пуле.
    /// Пустой список - штатный ответ ("вариантов нет").
    #[instrument(skip(self, pool), fields(pool_size = pool.len()))]
    pub fn parallel_options(&self, pool: &[ComponentCandidate]) -> Vec<ParallelOption> {
        let mut by_rating: BTreeMap<u32, Vec<ComponentCandidate>> = BTreeMap::new();
        for candidate in pool {
            let Some(rating) = candidate.derived_rating else {
                continue; // нераспознанный ток - позиция вне подбора
            };
            if rating > self.max_supported_rating {
                continue;
            }
            by_rating.entry(rating).or_default().push(candidate.clone());
        }

        let options: Vec<ParallelOption> = PARALLEL_TABLE
            .iter()
            .filter_map(|&(rating, unit_count)| {
                by_rating.get(&rating).map(|candidates| ParallelOption {
                    rating,
                    unit_count,
                    candidates: candidates.clone(),
                })
            })
            .collect();

        debug!(option_count = options.len(), "варианты комплектации собраны");
        options
    }

    /// Автоматическая рекомендация компонента под требуемый ток
    ///
    /// Берётся самая дешёвая позиция среди аппаратов, чей номинал
    /// покрывает требуемый ток (минимально достаточный номинал
    /// предпочтительнее - лишний запас стоит денег).
    pub fn recommend<'a>(
        &self,
        pool: &'a [ComponentCandidate],
        required_amps: u32,
    ) -> Option<&'a ComponentCandidate> {
        pool.iter()
            .filter(|c| {
                c.derived_rating
                    .map(|r| r >= required_amps && r <= self.max_supported_rating)
                    .unwrap_or(false)
            })
            .min_by(|a, b| {
                let key_a = (a.derived_rating.unwrap_or(u32::MAX), a.unit_price);
                let key_b = (b.derived_rating.unwrap_or(u32::MAX), b.unit_price);
                key_a
                    .0
                    .cmp(&key_b.0)
                    .then(key_a.1.total_cmp(&key_b.1))
            })
    }
}

impl Default for ParameterMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SUPPORTED_RATING)
    }
}

/// Требуемый длительный ток по мощности трансформатора
///
/// I = S / (√3 · U), мощность в кВА, напряжение в В, результат в А
/// (округление вверх - ток должен быть покрыт с запасом)
pub fn required_current_amps(power_kva: f64, voltage_v: f64) -> u32 {
    let amps = power_kva * 1000.0 / (3.0_f64.sqrt() * voltage_v);
    amps.ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, rating: Option<u32>, price: f64) -> ComponentCandidate {
        ComponentCandidate {
            id: id.to_string(),
            name: format!("Выключатель {} А", rating.unwrap_or(0)),
            unit_price: price,
            derived_rating: rating,
        }
    }

    // ==========================================
    // Тест 1: таблица параллельности
    // ==========================================

    #[test]
    fn test_parallel_table_counts() {
        let expected = [
            (1000, 1),
            (630, 2),
            (400, 4),
            (250, 4),
            (160, 4),
            (100, 6),
            (80, 6),
            (63, 6),
        ];
        assert_eq!(PARALLEL_TABLE, &expected);
    }

    #[test]
    fn test_options_only_for_present_ratings() {
        let pool = vec![
            candidate("c1", Some(630), 52_000.0),
            candidate("c2", Some(100), 4_100.0),
            candidate("c3", Some(100), 3_900.0),
        ];
        let options = ParameterMatcher::default().parallel_options(&pool);

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].rating, 630);
        assert_eq!(options[0].unit_count, 2);
        assert_eq!(options[1].rating, 100);
        assert_eq!(options[1].unit_count, 6);
        assert_eq!(options[1].candidates.len(), 2);
    }

    // Порядок выдачи: по убыванию номинала
    #[test]
    fn test_options_ordered_highest_first() {
        let pool = vec![
            candidate("c1", Some(63), 2_000.0),
            candidate("c2", Some(1000), 190_000.0),
            candidate("c3", Some(250), 11_000.0),
        ];
        let options = ParameterMatcher::default().parallel_options(&pool);
        let ratings: Vec<u32> = options.iter().map(|o| o.rating).collect();
        assert_eq!(ratings, vec![1000, 250, 63]);
    }

    // ==========================================
    // Тест 2: фильтрация пула
    // ==========================================

    #[test]
    fn test_unratable_and_oversized_excluded() {
        let pool = vec![
            candidate("c1", None, 1_000.0),
            candidate("c2", Some(2500), 400_000.0), // выше предельного номинала
            candidate("c3", Some(400), 18_000.0),
        ];
        let options = ParameterMatcher::default().parallel_options(&pool);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].rating, 400);
    }

    #[test]
    fn test_empty_pool_gives_empty_options() {
        let options = ParameterMatcher::default().parallel_options(&[]);
        assert!(options.is_empty());
    }

    // Нестандартный номинал в таблицу не попадает
    #[test]
    fn test_nonstandard_rating_not_emitted() {
        let pool = vec![candidate("c1", Some(320), 9_000.0)];
        let options = ParameterMatcher::default().parallel_options(&pool);
        assert!(options.is_empty());
    }

    // ==========================================
    // Тест 3: рекомендация под требуемый ток
    // ==========================================

    #[test]
    fn test_recommend_smallest_sufficient_rating() {
        let pool = vec![
            candidate("c1", Some(1000), 190_000.0),
            candidate("c2", Some(630), 52_000.0),
            candidate("c3", Some(250), 11_000.0),
        ];
        let matcher = ParameterMatcher::default();
        let pick = matcher.recommend(&pool, 500).expect("должна быть рекомендация");
        assert_eq!(pick.id, "c2");
    }

    #[test]
    fn test_recommend_cheapest_within_rating() {
        let pool = vec![
            candidate("c1", Some(250), 12_500.0),
            candidate("c2", Some(250), 11_000.0),
        ];
        let matcher = ParameterMatcher::default();
        let pick = matcher.recommend(&pool, 200).expect("должна быть рекомендация");
        assert_eq!(pick.id, "c2");
    }

    #[test]
    fn test_recommend_none_when_nothing_covers() {
        let pool = vec![candidate("c1", Some(100), 4_000.0)];
        assert!(ParameterMatcher::default().recommend(&pool, 800).is_none());
    }

    // ==========================================
    // Тест 4: ток по мощности трансформатора
    // ==========================================

    #[test]
    fn test_required_current_for_transformer() {
        // 400 кВА на стороне 0.4 кВ: 400000 / (1.732 * 400) ≈ 577.4 А
        assert_eq!(required_current_amps(400.0, 400.0), 578);
    }
}
