// ==========================================
// КТП конфигуратор - свод сметы
// ==========================================
// Один прогон конвейера наценок на каждую расцениваемую строку,
// итог - точная сумма строк, без промежуточных округлений
// ==========================================

use crate::domain::costing::{BreakdownLine, CostResult, CostSummary, CostTemplate};
use crate::engine::cost::{compute_cost, CostCalcResult};
use tracing::{debug, instrument};

// ==========================================
// LineItem - строка к расценке
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,        // внешнее количество (ячеек, участков)
    pub materials_total: f64, // материальная часть одной единицы
    pub template: CostTemplate,
}

// ==========================================
// PricedLine - строка после конвейера
// ==========================================
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PricedLine {
    pub line: BreakdownLine,
    pub cost: CostResult, // полная раскладка для аудита
}

// ==========================================
// CostAggregator
// ==========================================
pub struct CostAggregator;

impl CostAggregator {
    /// Расценить строки и свести смету
    ///
    /// Ошибка калькуляции любой строки прерывает свод целиком:
    /// частичная смета хуже отсутствующей.
    #[instrument(skip(items), fields(item_count = items.len()))]
    pub fn aggregate(items: &[LineItem]) -> CostCalcResult<(CostSummary, Vec<PricedLine>)> {
        let mut priced = Vec::with_capacity(items.len());
        for item in items {
            let cost = compute_cost(item.materials_total, &item.template)?;
            let unit_price = cost.final_price;
            let line_total = unit_price * item.quantity as f64;
            priced.push(PricedLine {
                line: BreakdownLine {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price,
                    line_total,
                },
                cost,
            });
        }

        let grand_total: f64 = priced.iter().map(|p| p.line.line_total).sum();
        let summary = CostSummary {
            grand_total,
            breakdown: priced.iter().map(|p| p.line.clone()).collect(),
        };
        debug!(grand_total, lines = summary.breakdown.len(), "смета сведена");
        Ok((summary, priced))
    }
}
