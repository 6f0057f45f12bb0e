// ==========================================
// КТП конфигуратор - импорт каталогов
// ==========================================
// Источник: CSV с разделителем ';' (выгрузки прайс-листов)
// Красная линия: битая строка не валит партию - она попадает
// в отчёт об импорте, годные строки записываются
// ==========================================

use crate::domain::types::MaterialGroup;
use crate::importer::error::ImporterResult;
use crate::repository::{ComponentRepository, ReferenceRepository};
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ImportReport - итог одной партии импорта
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub batch_id: Uuid,
    pub imported: usize,
    pub rejected: usize,
    pub row_errors: Vec<String>, // построчные замечания, не исключения
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

impl ImportReport {
    fn new(batch_id: Uuid, imported: usize, row_errors: Vec<String>) -> Self {
        Self {
            batch_id,
            imported,
            rejected: row_errors.len(),
            row_errors,
            finished_at: chrono::Utc::now(),
        }
    }
}

// ==========================================
// CatalogImporter
// ==========================================
pub struct CatalogImporter<'a> {
    components: &'a ComponentRepository,
    references: &'a ReferenceRepository,
}

impl<'a> CatalogImporter<'a> {
    pub fn new(components: &'a ComponentRepository, references: &'a ReferenceRepository) -> Self {
        Self { components, references }
    }

    /// Импорт прайс-листа комплектующих
    ///
    /// Формат: `id;name;unit_price`, первая строка - заголовок.
    /// Позиции без распознаваемого тока импортируются как есть -
    /// непригодность для подбора выяснится при загрузке пула.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn import_components(&self, path: impl AsRef<Path>) -> ImporterResult<ImportReport> {
        let batch_id = Uuid::new_v4();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;

        let mut imported = 0usize;
        let mut row_errors = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let row_no = idx + 2; // после заголовка
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    row_errors.push(format!("строка {}: {}", row_no, e));
                    continue;
                }
            };

            match parse_component_row(&record) {
                Ok((id, name, unit_price)) => {
                    self.components.upsert(&id, &name, unit_price)?;
                    imported += 1;
                }
                Err(message) => {
                    warn!(row_no, %message, "строка прайс-листа отклонена");
                    row_errors.push(format!("строка {}: {}", row_no, message));
                }
            }
        }

        let report = ImportReport::new(batch_id, imported, row_errors);
        info!(
            batch_id = %report.batch_id,
            imported = report.imported,
            rejected = report.rejected,
            "импорт прайс-листа завершён"
        );
        Ok(report)
    }

    /// Импорт справочника типовых секций
    ///
    /// Формат: `id;rating_label;material_group;busbar_profile;cell_weights_json`.
    /// Порядок строк файла становится порядком каталога (sort_order).
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn import_references(&self, path: impl AsRef<Path>) -> ImporterResult<ImportReport> {
        let batch_id = Uuid::new_v4();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;

        let mut imported = 0usize;
        let mut row_errors = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let row_no = idx + 2;
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    row_errors.push(format!("строка {}: {}", row_no, e));
                    continue;
                }
            };

            match parse_reference_row(&record) {
                Ok((id, label, group, profile, weights)) => {
                    self.references
                        .upsert(&id, &label, group, &profile, &weights, idx as i64)?;
                    imported += 1;
                }
                Err(message) => {
                    warn!(row_no, %message, "строка справочника отклонена");
                    row_errors.push(format!("строка {}: {}", row_no, message));
                }
            }
        }

        let report = ImportReport::new(batch_id, imported, row_errors);
        info!(
            batch_id = %report.batch_id,
            imported = report.imported,
            rejected = report.rejected,
            "импорт справочника завершён"
        );
        Ok(report)
    }
}

fn parse_component_row(record: &csv::StringRecord) -> Result<(String, String, f64), String> {
    let id = record.get(0).unwrap_or_default().to_string();
    let name = record.get(1).unwrap_or_default().to_string();
    let price_raw = record.get(2).unwrap_or_default();

    if id.is_empty() {
        return Err("пустой идентификатор".to_string());
    }
    if name.is_empty() {
        return Err("пустое наименование".to_string());
    }
    let unit_price: f64 = price_raw
        .replace(',', ".")
        .parse()
        .map_err(|_| format!("цена не число: '{}'", price_raw))?;
    if !unit_price.is_finite() || unit_price < 0.0 {
        return Err(format!("недопустимая цена: {}", unit_price));
    }
    Ok((id, name, unit_price))
}

type ReferenceRow = (
    String,
    String,
    MaterialGroup,
    String,
    serde_json::Map<String, serde_json::Value>,
);

fn parse_reference_row(record: &csv::StringRecord) -> Result<ReferenceRow, String> {
    let id = record.get(0).unwrap_or_default().to_string();
    let label = record.get(1).unwrap_or_default().to_string();
    let group_raw = record.get(2).unwrap_or_default();
    let profile = record.get(3).unwrap_or_default().to_string();
    let weights_raw = record.get(4).unwrap_or_default();

    if id.is_empty() {
        return Err("пустой идентификатор".to_string());
    }
    if label.is_empty() {
        return Err("пустая метка тока".to_string());
    }
    let group = MaterialGroup::parse(group_raw)
        .ok_or_else(|| format!("неизвестная группа материала: '{}'", group_raw))?;
    let weights: serde_json::Map<String, serde_json::Value> = serde_json::from_str(weights_raw)
        .map_err(|e| format!("весовая таблица не JSON-объект: {}", e))?;
    Ok((id, label, group, profile, weights))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_component_row_with_comma_decimal() {
        let record = csv::StringRecord::from(vec!["c1", "Выключатель 250 А", "11500,50"]);
        let (id, name, price) = parse_component_row(&record).unwrap();
        assert_eq!(id, "c1");
        assert_eq!(name, "Выключатель 250 А");
        assert_eq!(price, 11_500.5);
    }

    #[test]
    fn test_parse_component_row_rejects_bad_price() {
        let record = csv::StringRecord::from(vec!["c1", "Выключатель", "дорого"]);
        assert!(parse_component_row(&record).is_err());

        let record = csv::StringRecord::from(vec!["c1", "Выключатель", "-5"]);
        assert!(parse_component_row(&record).is_err());
    }

    #[test]
    fn test_parse_reference_row() {
        let record = csv::StringRecord::from(vec![
            "r1",
            "630 А",
            "AD",
            "АД31Т 60x6",
            r#"{"Ввод": 28.0}"#,
        ]);
        let (id, label, group, profile, weights) = parse_reference_row(&record).unwrap();
        assert_eq!(id, "r1");
        assert_eq!(label, "630 А");
        assert_eq!(group, MaterialGroup::Aluminum);
        assert_eq!(profile, "АД31Т 60x6");
        assert_eq!(weights.len(), 1);
    }

    #[test]
    fn test_parse_reference_row_rejects_unknown_group() {
        let record =
            csv::StringRecord::from(vec!["r1", "630 А", "titanium", "проф", r#"{}"#]);
        assert!(parse_reference_row(&record).is_err());
    }
}
