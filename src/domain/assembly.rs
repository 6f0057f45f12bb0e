// ==========================================
// КТП конфигуратор - сборки и контекст выбора
// ==========================================
// Красная линия: состояние выбора передаётся явным контекстом
// в чистые функции движка, глобального изменяемого стора нет
// ==========================================

use crate::domain::component::ComponentCandidate;
use crate::domain::types::{AssemblyKind, CellPurpose, ConductorMaterial};
use serde::{Deserialize, Serialize};

// ==========================================
// SelectedComponents - комплектация одной ячейки
// ==========================================
// Все позиции опциональны: ячейка конфигурируется постепенно
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedComponents {
    pub breaker: Option<ComponentCandidate>,             // автоматический выключатель
    pub relay: Option<ComponentCandidate>,               // реле защиты
    pub meter: Option<ComponentCandidate>,               // счётчик
    pub current_transformer: Option<ComponentCandidate>, // трансформатор тока
    pub voltage_transformer: Option<ComponentCandidate>, // трансформатор напряжения
}

impl SelectedComponents {
    /// Сумма цен выбранных компонентов (материальная часть ячейки)
    pub fn materials_total(&self) -> f64 {
        [
            &self.breaker,
            &self.relay,
            &self.meter,
            &self.current_transformer,
            &self.voltage_transformer,
        ]
        .iter()
        .filter_map(|slot| slot.as_ref())
        .map(|c| c.unit_price)
        .sum()
    }
}

// ==========================================
// Cell - сконфигурированная ячейка секции
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub name: String,             // отображаемое имя строки сметы
    pub purpose: CellPurpose,     // назначение (ввод/секционная/отходящая/...)
    pub assembly_kind: AssemblyKind, // какой шаблон себестоимости применять
    pub selected: SelectedComponents,
    pub quantity: u32,            // количество одинаковых ячеек
}

// ==========================================
// BridgeSegment - участок шинного моста
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BridgeSegment {
    pub length_m: f64, // длина участка, м
    pub quantity: u32, // количество одинаковых участков
}

// ==========================================
// ProjectSelection - сеансовый контекст выбора
// ==========================================
// Снимок всех пользовательских выборов; расчёт всегда выполняется
// заново по полному снимку, инкрементальных правок нет
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSelection {
    pub project_name: String,
    pub transformer_power_kva: Option<f64>, // мощность выбранного трансформатора
    pub conductor_material: ConductorMaterial,
    pub chosen_breaker: Option<ComponentCandidate>, // вводной выключатель (определяет типовую секцию)
    pub cells: Vec<Cell>,
    pub bridge_segments: Vec<BridgeSegment>,
}

impl ProjectSelection {
    pub fn new(project_name: impl Into<String>, conductor_material: ConductorMaterial) -> Self {
        Self {
            project_name: project_name.into(),
            transformer_power_kva: None,
            conductor_material,
            chosen_breaker: None,
            cells: Vec::new(),
            bridge_segments: Vec::new(),
        }
    }
}
