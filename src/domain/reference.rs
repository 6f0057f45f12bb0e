// ==========================================
// КТП конфигуратор - справочная конфигурация КРУ
// ==========================================
// Неизменяемая запись каталога: метка тока + группа материала
// + весовая таблица "назначение ячейки -> кг ошиновки"
// ==========================================

use crate::domain::types::{CellPurpose, MaterialGroup};
use serde::{Deserialize, Serialize};

// ==========================================
// SwitchgearReference - запись справочника типовых секций
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchgearReference {
    pub id: String,             // идентификатор записи справочника
    pub rating_label: String,   // метка тока как в каталоге, напр. "1000А"
    pub material_group: MaterialGroup,
    pub busbar_profile: String, // профиль шины, напр. "АД31Т 60x6"
    // Вес ошиновки на одну ячейку данного назначения (кг)
    pub cell_weights_kg: Vec<(CellPurpose, f64)>,
}

impl SwitchgearReference {
    /// Вес ошиновки для ячейки указанного назначения
    ///
    /// Назначения без строки в таблице дают None - вызывающая
    /// сторона трактует это как нулевой вклад в массу.
    pub fn weight_for(&self, purpose: CellPurpose) -> Option<f64> {
        self.cell_weights_kg
            .iter()
            .find(|(p, _)| *p == purpose)
            .map(|(_, kg)| *kg)
    }
}
