// ==========================================
// КТП конфигуратор - компонент каталога
// ==========================================
// Красная линия: derived_rating - производное поле,
// пересчитывается из наименования при загрузке, в БД не хранится
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ComponentCandidate - позиция каталога комплектующих
// ==========================================
// Источник: прайс-лист поставщика (свободный текст наименования)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCandidate {
    pub id: String,                  // идентификатор позиции каталога
    pub name: String,                // наименование как в прайс-листе
    pub unit_price: f64,             // цена за единицу
    pub derived_rating: Option<u32>, // номинальный ток, извлечённый из наименования (А)
}

impl ComponentCandidate {
    /// Позиция пригодна для подбора по току
    pub fn is_ratable(&self) -> bool {
        self.derived_rating.is_some()
    }
}
