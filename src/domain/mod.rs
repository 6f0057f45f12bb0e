// ==========================================
// КТП конфигуратор - доменный слой
// ==========================================
// Сущности и типы без ввода-вывода
// ==========================================

pub mod assembly;
pub mod component;
pub mod costing;
pub mod reference;
pub mod types;

pub use assembly::{BridgeSegment, Cell, ProjectSelection, SelectedComponents};
pub use component::ComponentCandidate;
pub use costing::{BreakdownLine, CostResult, CostSummary, CostTemplate};
pub use reference::SwitchgearReference;
pub use types::{AssemblyKind, CellPurpose, ConductorMaterial, MaterialGroup};
