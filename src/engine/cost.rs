// ==========================================
// КТП конфигуратор - конвейер наценок
// ==========================================
// Девять шагов в жёстком порядке: каждый шаг потребляет предыдущий.
// Красная линия: административные расходы считаются от материальной
// части, а не от производственной себестоимости - так ведётся
// действующая калькуляция, менять только по решению экономиста
// ==========================================

use crate::domain::costing::{CostResult, CostTemplate};
use thiserror::Error;

// ==========================================
// Ошибки калькуляции
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CostError {
    #[error("недопустимое значение калькуляции: {field} = {value}")]
    InvalidCostInput { field: &'static str, value: f64 },
}

pub type CostCalcResult<T> = Result<T, CostError>;

/// Значение обязано быть конечным и неотрицательным
fn validate(field: &'static str, value: f64) -> CostCalcResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CostError::InvalidCostInput { field, value });
    }
    Ok(value)
}

/// Полная раскладка цены сборки из материальной части и шаблона
///
/// Порядок шагов фиксирован:
/// 1. оплата труда = ставка x часы
/// 2. общепроизводственные = материалы x overhead_pct / 100
/// 3. производственная себестоимость = материалы + труд + общепроизводственные
/// 4. административные = материалы x admin_pct / 100
/// 5. полная себестоимость = производственная + административные
/// 6. плановая прибыль = полная x profit_pct / 100
/// 7. оптовая цена = полная + прибыль
/// 8. НДС = оптовая x vat_pct / 100
/// 9. отпускная цена = оптовая + НДС
///
/// Без округления; все промежуточные величины возвращаются.
/// Отрицательное или неконечное значение на входе - жёсткая ошибка,
/// молчаливого подрезания нет.
pub fn compute_cost(materials_total: f64, template: &CostTemplate) -> CostCalcResult<CostResult> {
    let materials_total = validate("materials_total", materials_total)?;
    let hourly_rate = validate("hourly_rate", template.hourly_rate)?;
    let manufacturing_hours = validate("manufacturing_hours", template.manufacturing_hours)?;
    let overhead_pct = validate("overhead_pct", template.overhead_pct)?;
    let admin_pct = validate("admin_pct", template.admin_pct)?;
    let profit_pct = validate("profit_pct", template.profit_pct)?;
    let vat_pct = validate("vat_pct", template.vat_pct)?;

    let labor_cost = hourly_rate * manufacturing_hours;
    let overhead_cost = materials_total * overhead_pct / 100.0;
    let production_cost = materials_total + labor_cost + overhead_cost;
    let admin_cost = materials_total * admin_pct / 100.0;
    let full_cost = production_cost + admin_cost;
    let planned_profit = full_cost * profit_pct / 100.0;
    let wholesale_price = full_cost + planned_profit;
    let vat_amount = wholesale_price * vat_pct / 100.0;
    let final_price = wholesale_price + vat_amount;

    Ok(CostResult {
        materials_total,
        labor_cost,
        overhead_cost,
        production_cost,
        admin_cost,
        full_cost,
        planned_profit,
        wholesale_price,
        vat_amount,
        final_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> CostTemplate {
        CostTemplate {
            hourly_rate: 2_000.0,
            manufacturing_hours: 1.0,
            overhead_pct: 10.0,
            admin_pct: 15.0,
            profit_pct: 10.0,
            vat_pct: 12.0,
        }
    }

    // ==========================================
    // Тест 1: контрольная калькуляция
    // ==========================================

    #[test]
    fn test_reference_calculation() {
        let result = compute_cost(100_000.0, &template()).expect("входы корректны");

        assert_eq!(result.materials_total, 100_000.0);
        assert_eq!(result.labor_cost, 2_000.0);
        assert_eq!(result.overhead_cost, 10_000.0);
        assert_eq!(result.production_cost, 112_000.0);
        assert_eq!(result.admin_cost, 15_000.0);
        assert_eq!(result.full_cost, 127_000.0);
        assert_eq!(result.planned_profit, 12_700.0);
        assert_eq!(result.wholesale_price, 139_700.0);
        assert_eq!(result.vat_amount, 16_764.0);
        assert_eq!(result.final_price, 156_464.0);
    }

    // ==========================================
    // Тест 2: административные расходы от материалов
    // ==========================================

    // Изменение overhead_pct не должно менять admin_cost
    #[test]
    fn test_admin_cost_independent_of_overhead() {
        let mut low = template();
        low.overhead_pct = 5.0;
        let mut high = template();
        high.overhead_pct = 50.0;

        let result_low = compute_cost(100_000.0, &low).unwrap();
        let result_high = compute_cost(100_000.0, &high).unwrap();
        assert_eq!(result_low.admin_cost, result_high.admin_cost);
        assert_ne!(result_low.production_cost, result_high.production_cost);
    }

    // ==========================================
    // Тест 3: инварианты
    // ==========================================

    #[test]
    fn test_final_price_not_below_materials() {
        let cases = [
            (0.0, template()),
            (1.0, template()),
            (
                50_000.0,
                CostTemplate {
                    hourly_rate: 0.0,
                    manufacturing_hours: 0.0,
                    overhead_pct: 0.0,
                    admin_pct: 0.0,
                    profit_pct: 0.0,
                    vat_pct: 0.0,
                },
            ),
            (999_999.5, template()),
        ];
        for (materials, tpl) in cases {
            let result = compute_cost(materials, &tpl).unwrap();
            assert!(
                result.final_price >= result.materials_total,
                "отпускная цена {} ниже материалов {}",
                result.final_price,
                result.materials_total
            );
        }
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        let a = compute_cost(73_250.5, &template()).unwrap();
        let b = compute_cost(73_250.5, &template()).unwrap();
        assert_eq!(a, b);
    }

    // ==========================================
    // Тест 4: защита от некорректных входов
    // ==========================================

    #[test]
    fn test_negative_materials_rejected() {
        let err = compute_cost(-1.0, &template()).unwrap_err();
        assert_eq!(
            err,
            CostError::InvalidCostInput { field: "materials_total", value: -1.0 }
        );
    }

    #[test]
    fn test_negative_percentage_rejected() {
        let mut tpl = template();
        tpl.profit_pct = -10.0;
        assert!(matches!(
            compute_cost(1_000.0, &tpl),
            Err(CostError::InvalidCostInput { field: "profit_pct", .. })
        ));
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        let mut tpl = template();
        tpl.hourly_rate = f64::NAN;
        assert!(compute_cost(1_000.0, &tpl).is_err());

        let mut tpl = template();
        tpl.vat_pct = f64::INFINITY;
        assert!(compute_cost(1_000.0, &tpl).is_err());

        assert!(compute_cost(f64::NEG_INFINITY, &template()).is_err());
    }
}
