// ==========================================
// КТП конфигуратор - типы калькуляции
// ==========================================
// Красная линия: CostResult хранит все промежуточные величины
// конвейера наценок - результат должен быть проверяем по шагам
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CostTemplate - шаблон себестоимости типа сборки
// ==========================================
// Источник: таблица cost_template, ведётся экономистом
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostTemplate {
    pub hourly_rate: f64,         // часовая ставка, руб/ч
    pub manufacturing_hours: f64, // трудоёмкость изготовления, ч
    pub overhead_pct: f64,        // общепроизводственные расходы, %
    pub admin_pct: f64,           // административные расходы, %
    pub profit_pct: f64,          // плановая прибыль, %
    pub vat_pct: f64,             // НДС, %
}

// ==========================================
// CostResult - полная раскладка цены одной сборки
// ==========================================
// Все десять величин сохраняются для аудита и печатных форм
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub materials_total: f64, // материальная часть
    pub labor_cost: f64,      // оплата труда
    pub overhead_cost: f64,   // общепроизводственные расходы
    pub production_cost: f64, // производственная себестоимость
    pub admin_cost: f64,      // административные расходы
    pub full_cost: f64,       // полная себестоимость
    pub planned_profit: f64,  // плановая прибыль
    pub wholesale_price: f64, // оптовая цена
    pub vat_amount: f64,      // сумма НДС
    pub final_price: f64,     // отпускная цена
}

// ==========================================
// BreakdownLine - строка итоговой сметы
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64, // отпускная цена за единицу
    pub line_total: f64, // unit_price * quantity
}

// ==========================================
// CostSummary - смета проекта целиком
// ==========================================
// Передаётся слою печати/экспорта как есть, без перерасчёта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub grand_total: f64,
    pub breakdown: Vec<BreakdownLine>,
}
