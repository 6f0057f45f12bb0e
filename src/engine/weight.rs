// ==========================================
// КТП конфигуратор - расчёт массы и материальной стоимости
// ==========================================
// Шинные мосты: масса по длине участка, цена по массе.
// Ошиновка ячеек: весовая таблица типовой секции x количество ячеек.
// Красная линия: цены за кг и вес погонного метра - политика
// (config_kv), а не литералы в коде
// ==========================================

use crate::domain::assembly::{BridgeSegment, Cell};
use crate::domain::reference::SwitchgearReference;
use crate::domain::types::{CellPurpose, MaterialGroup};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

// ==========================================
// PricingPolicy - ценовые константы политики
// ==========================================
// Загружается ConfigManager'ом; значения по умолчанию соответствуют
// действующему прайсу на шинный прокат
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub aluminum_price_per_kg: f64,
    pub copper_price_per_kg: f64,
    pub aluminum_bridge_kg_per_m: f64, // вес погонного метра моста, алюминий
    pub copper_bridge_kg_per_m: f64,   // вес погонного метра моста, медь
}

impl PricingPolicy {
    pub fn price_per_kg(&self, group: MaterialGroup) -> f64 {
        match group {
            MaterialGroup::Aluminum => self.aluminum_price_per_kg,
            MaterialGroup::Copper => self.copper_price_per_kg,
        }
    }

    pub fn bridge_kg_per_m(&self, group: MaterialGroup) -> f64 {
        match group {
            MaterialGroup::Aluminum => self.aluminum_bridge_kg_per_m,
            MaterialGroup::Copper => self.copper_bridge_kg_per_m,
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            aluminum_price_per_kg: 2_800.0,
            copper_price_per_kg: 9_500.0,
            aluminum_bridge_kg_per_m: 5.0,
            copper_bridge_kg_per_m: 8.9,
        }
    }
}

// ==========================================
// PricedBridgeSegment - расценённый участок моста
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricedBridgeSegment {
    pub length_m: f64,
    pub quantity: u32,
    pub mass_kg: f64,       // масса одного участка
    pub unit_price: f64,    // материальная цена одного участка
    pub segment_total: f64, // unit_price * quantity
}

// ==========================================
// BusbarSystemCost - ошиновка ячеек целиком
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusbarSystemCost {
    pub mass_kg: f64,        // суммарная масса ошиновки
    pub materials_cost: f64, // mass_kg * цена за кг
}

// ==========================================
// WeightCalculator
// ==========================================
pub struct WeightCalculator {
    policy: PricingPolicy,
}

impl WeightCalculator {
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Расценить один участок шинного моста
    pub fn price_bridge_segment(
        &self,
        segment: &BridgeSegment,
        group: MaterialGroup,
    ) -> PricedBridgeSegment {
        let mass_kg = self.policy.bridge_kg_per_m(group) * segment.length_m;
        let unit_price = mass_kg * self.policy.price_per_kg(group);
        PricedBridgeSegment {
            length_m: segment.length_m,
            quantity: segment.quantity,
            mass_kg,
            unit_price,
            segment_total: unit_price * segment.quantity as f64,
        }
    }

    /// Расценить все участки моста
    pub fn price_bridge_segments(
        &self,
        segments: &[BridgeSegment],
        group: MaterialGroup,
    ) -> Vec<PricedBridgeSegment> {
        segments
            .iter()
            .map(|s| self.price_bridge_segment(s, group))
            .collect()
    }

    /// Материальная стоимость ошиновки набранных ячеек
    ///
    /// По каждой строке весовой таблицы типовой секции (кроме
    /// псевдо-строки моста) считается количество ячеек этого
    /// назначения с учётом их собственного количества. Назначения
    /// ячеек, отсутствующие в таблице, дают нулевой вес.
    #[instrument(skip(self, reference, cells), fields(reference_id = %reference.id))]
    pub fn busbar_system_cost(
        &self,
        reference: &SwitchgearReference,
        cells: &[Cell],
        group: MaterialGroup,
    ) -> BusbarSystemCost {
        let mut mass_kg = 0.0;
        for &(purpose, unit_weight_kg) in &reference.cell_weights_kg {
            if purpose == CellPurpose::Bridge {
                continue; // мост расценивается по длине, не по таблице
            }
            let cell_count: u32 = cells
                .iter()
                .filter(|c| c.purpose == purpose)
                .map(|c| c.quantity)
                .sum();
            if cell_count > 0 {
                mass_kg += unit_weight_kg * cell_count as f64;
            }
        }

        for cell in cells {
            if reference.weight_for(cell.purpose).is_none() && cell.purpose != CellPurpose::Bridge {
                // Назначение без строки в таблице: нулевой вклад + диагностика
                debug!(purpose = %cell.purpose, cell = %cell.name, "назначение ячейки не покрыто весовой таблицей");
            }
        }

        let materials_cost = mass_kg * self.policy.price_per_kg(group);
        BusbarSystemCost { mass_kg, materials_cost }
    }
}

impl Default for WeightCalculator {
    fn default() -> Self {
        Self::new(PricingPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assembly::SelectedComponents;
    use crate::domain::types::AssemblyKind;

    fn cell(purpose: CellPurpose, quantity: u32) -> Cell {
        Cell {
            name: format!("Ячейка {}", purpose),
            purpose,
            assembly_kind: AssemblyKind::RunnSection,
            selected: SelectedComponents::default(),
            quantity,
        }
    }

    fn reference() -> SwitchgearReference {
        SwitchgearReference {
            id: "r1".to_string(),
            rating_label: "630 А".to_string(),
            material_group: MaterialGroup::Aluminum,
            busbar_profile: "АД31Т 60x6".to_string(),
            cell_weights_kg: vec![
                (CellPurpose::Input, 28.0),
                (CellPurpose::Sectional, 22.0),
                (CellPurpose::Outgoing, 16.0),
                (CellPurpose::Bridge, 5.0),
            ],
        }
    }

    // ==========================================
    // Тест 1: участок моста (контрольный пример)
    // ==========================================

    // 2 м x 5 кг/м = 10 кг; 10 кг x 2800 = 28000; x3 шт = 84000
    #[test]
    fn test_bridge_segment_reference_example() {
        let calc = WeightCalculator::default();
        let priced = calc.price_bridge_segment(
            &BridgeSegment { length_m: 2.0, quantity: 3 },
            MaterialGroup::Aluminum,
        );

        assert_eq!(priced.mass_kg, 10.0);
        assert_eq!(priced.unit_price, 28_000.0);
        assert_eq!(priced.segment_total, 84_000.0);
    }

    #[test]
    fn test_all_segments_priced_independently() {
        let calc = WeightCalculator::default();
        let segments = [
            BridgeSegment { length_m: 1.0, quantity: 2 },
            BridgeSegment { length_m: 2.5, quantity: 1 },
        ];
        let priced = calc.price_bridge_segments(&segments, MaterialGroup::Aluminum);

        assert_eq!(priced.len(), 2);
        assert_eq!(priced[0].segment_total, 5.0 * 2_800.0 * 2.0);
        assert_eq!(priced[1].segment_total, 12.5 * 2_800.0);
    }

    #[test]
    fn test_bridge_price_depends_on_material_group() {
        let calc = WeightCalculator::default();
        let segment = BridgeSegment { length_m: 1.0, quantity: 1 };

        let al = calc.price_bridge_segment(&segment, MaterialGroup::Aluminum);
        let cu = calc.price_bridge_segment(&segment, MaterialGroup::Copper);
        assert!(cu.unit_price > al.unit_price);
    }

    // ==========================================
    // Тест 2: ошиновка ячеек
    // ==========================================

    #[test]
    fn test_busbar_mass_counts_cell_quantities() {
        let calc = WeightCalculator::default();
        let cells = vec![
            cell(CellPurpose::Input, 2),
            cell(CellPurpose::Outgoing, 4),
            cell(CellPurpose::Outgoing, 1), // вторая группа того же назначения
        ];

        let cost = calc.busbar_system_cost(&reference(), &cells, MaterialGroup::Aluminum);
        // 2*28 + 5*16 = 136 кг
        assert_eq!(cost.mass_kg, 136.0);
        assert_eq!(cost.materials_cost, 136.0 * 2_800.0);
    }

    // Псевдо-строка моста не входит в массу ошиновки
    #[test]
    fn test_bridge_row_excluded_from_busbar_mass() {
        let calc = WeightCalculator::default();
        let cells = vec![cell(CellPurpose::Input, 1)];
        let cost = calc.busbar_system_cost(&reference(), &cells, MaterialGroup::Aluminum);
        assert_eq!(cost.mass_kg, 28.0);
    }

    // Назначение без строки таблицы - нулевой вклад, не ошибка
    #[test]
    fn test_unmapped_purpose_contributes_zero() {
        let calc = WeightCalculator::default();
        let cells = vec![cell(CellPurpose::Metering, 3)];
        let cost = calc.busbar_system_cost(&reference(), &cells, MaterialGroup::Aluminum);
        assert_eq!(cost.mass_kg, 0.0);
        assert_eq!(cost.materials_cost, 0.0);
    }

    #[test]
    fn test_no_cells_zero_mass() {
        let calc = WeightCalculator::default();
        let cost = calc.busbar_system_cost(&reference(), &[], MaterialGroup::Copper);
        assert_eq!(cost.mass_kg, 0.0);
    }
}
