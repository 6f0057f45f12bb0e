// ==========================================
// КТП конфигуратор - доменные типы
// ==========================================
// Красная линия: группа материала и назначение ячейки -
// закрытые перечисления, а не строки из каталога
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Марка проводника (как выбирает пользователь)
// ==========================================
// AD/AD2 - алюминиевые шины, MT/MT2 - медные
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConductorMaterial {
    Ad,
    Ad2,
    Mt,
    Mt2,
}

impl ConductorMaterial {
    /// Разбор обозначения марки из каталога/файла выбора
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "AD" | "АД" => Some(ConductorMaterial::Ad),
            "AD2" | "АД2" => Some(ConductorMaterial::Ad2),
            "MT" | "МТ" => Some(ConductorMaterial::Mt),
            "MT2" | "МТ2" => Some(ConductorMaterial::Mt2),
            _ => None,
        }
    }

    /// Свёртка марки в группу материала
    pub fn group(self) -> MaterialGroup {
        match self {
            ConductorMaterial::Ad | ConductorMaterial::Ad2 => MaterialGroup::Aluminum,
            ConductorMaterial::Mt | ConductorMaterial::Mt2 => MaterialGroup::Copper,
        }
    }
}

impl fmt::Display for ConductorMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConductorMaterial::Ad => write!(f, "AD"),
            ConductorMaterial::Ad2 => write!(f, "AD2"),
            ConductorMaterial::Mt => write!(f, "MT"),
            ConductorMaterial::Mt2 => write!(f, "MT2"),
        }
    }
}

// ==========================================
// Группа материала (определяет вес и цену за кг)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialGroup {
    Aluminum, // алюминиевая группа (AD, AD2)
    Copper,   // медная группа (MT, MT2)
}

impl MaterialGroup {
    /// Разбор группы из строкового поля каталога
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "ALUMINUM" | "AL" | "АЛЮМИНИЙ" => Some(MaterialGroup::Aluminum),
            "COPPER" | "CU" | "МЕДЬ" => Some(MaterialGroup::Copper),
            other => ConductorMaterial::parse(other).map(ConductorMaterial::group),
        }
    }
}

impl fmt::Display for MaterialGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialGroup::Aluminum => write!(f, "ALUMINUM"),
            MaterialGroup::Copper => write!(f, "COPPER"),
        }
    }
}

// ==========================================
// Назначение ячейки
// ==========================================
// Красная линия: неизвестная метка каталога -> None + диагностика,
// молчаливого проваливания в "ноль веса" без лога быть не должно
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellPurpose {
    Input,          // вводная
    Sectional,      // секционная
    Outgoing,       // отходящая линия
    Metering,       // учёт
    AuxTransformer, // ТСН
    Bridge,         // шинный мост (псевдо-строка весовой таблицы)
}

impl CellPurpose {
    /// Разбор назначения из свободной метки весовой таблицы каталога
    ///
    /// Метки в каталоге русскоязычные и неоднородные ("Ввод", "вводная",
    /// "секционный выключатель" и т.п.), поэтому сравнение по вхождению
    /// ключевого фрагмента в нижнем регистре.
    pub fn parse_label(label: &str) -> Option<Self> {
        let norm = label.trim().to_lowercase().replace('ё', "е");
        if norm.is_empty() {
            return None;
        }
        if norm.contains("мост") || norm.contains("bridge") {
            return Some(CellPurpose::Bridge);
        }
        if norm.contains("ввод") || norm.contains("input") {
            return Some(CellPurpose::Input);
        }
        if norm.contains("секци") || norm.contains("section") {
            return Some(CellPurpose::Sectional);
        }
        if norm.contains("отход") || norm.contains("лини") || norm.contains("outgoing") {
            return Some(CellPurpose::Outgoing);
        }
        if norm.contains("учет") || norm.contains("metering") {
            return Some(CellPurpose::Metering);
        }
        if norm.contains("тсн") || norm.contains("aux") {
            return Some(CellPurpose::AuxTransformer);
        }
        None
    }
}

impl fmt::Display for CellPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellPurpose::Input => write!(f, "INPUT"),
            CellPurpose::Sectional => write!(f, "SECTIONAL"),
            CellPurpose::Outgoing => write!(f, "OUTGOING"),
            CellPurpose::Metering => write!(f, "METERING"),
            CellPurpose::AuxTransformer => write!(f, "AUX_TRANSFORMER"),
            CellPurpose::Bridge => write!(f, "BRIDGE"),
        }
    }
}

// ==========================================
// Тип сборки (ключ шаблона себестоимости)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssemblyKind {
    RusnSection,  // секция РУСН
    RunnSection,  // секция РУНН
    BusBridge,    // шинный мост
    BusbarSystem, // ошиновка ячеек
}

impl AssemblyKind {
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "RUSN_SECTION" | "RUSN" => Some(AssemblyKind::RusnSection),
            "RUNN_SECTION" | "RUNN" => Some(AssemblyKind::RunnSection),
            "BUS_BRIDGE" | "BRIDGE" => Some(AssemblyKind::BusBridge),
            "BUSBAR_SYSTEM" | "BUSBAR" => Some(AssemblyKind::BusbarSystem),
            _ => None,
        }
    }
}

impl fmt::Display for AssemblyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyKind::RusnSection => write!(f, "RUSN_SECTION"),
            AssemblyKind::RunnSection => write!(f, "RUNN_SECTION"),
            AssemblyKind::BusBridge => write!(f, "BUS_BRIDGE"),
            AssemblyKind::BusbarSystem => write!(f, "BUSBAR_SYSTEM"),
        }
    }
}
