// ==========================================
// КТП конфигуратор - хранилище справочника типовых секций
// ==========================================
// Весовая таблица хранится JSON-объектом "метка -> кг";
// метки разбираются в CellPurpose при загрузке, нераспознанные
// метки пропускаются с диагностикой
// ==========================================

use crate::domain::reference::SwitchgearReference;
use crate::domain::types::{CellPurpose, MaterialGroup};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

// ==========================================
// ReferenceRepository
// ==========================================
pub struct ReferenceRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ReferenceRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Вставить или заменить запись справочника
    ///
    /// sort_order задаёт порядок каталога - он же порядок разрешения
    /// неоднозначностей при подборе типовой секции.
    pub fn upsert(
        &self,
        id: &str,
        rating_label: &str,
        material_group: MaterialGroup,
        busbar_profile: &str,
        cell_weights: &serde_json::Map<String, serde_json::Value>,
        sort_order: i64,
    ) -> RepositoryResult<()> {
        let weights_json = serde_json::Value::Object(cell_weights.clone()).to_string();
        let conn = self.lock()?;
        conn.execute(
            r#"INSERT INTO switchgear_reference
                   (id, rating_label, material_group, busbar_profile, cell_weights_json, sort_order)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)
               ON CONFLICT(id) DO UPDATE SET
                   rating_label = ?2, material_group = ?3, busbar_profile = ?4,
                   cell_weights_json = ?5, sort_order = ?6"#,
            params![id, rating_label, material_group.to_string(), busbar_profile, weights_json, sort_order],
        )?;
        Ok(())
    }

    /// Загрузить справочник в порядке каталога
    pub fn load_all(&self) -> RepositoryResult<Vec<SwitchgearReference>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            r#"SELECT id, rating_label, material_group, busbar_profile, cell_weights_json
               FROM switchgear_reference
               ORDER BY sort_order, id"#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut references = Vec::new();
        for row in rows {
            let (id, rating_label, group_raw, busbar_profile, weights_json) = row?;
            let material_group = MaterialGroup::parse(&group_raw).ok_or_else(|| {
                RepositoryError::FieldValueError {
                    field: "material_group".to_string(),
                    message: format!("неизвестная группа материала '{}' (id={})", group_raw, id),
                }
            })?;
            let cell_weights_kg = parse_weights(&id, &weights_json)?;
            references.push(SwitchgearReference {
                id,
                rating_label,
                material_group,
                busbar_profile,
                cell_weights_kg,
            });
        }
        debug!(count = references.len(), "справочник типовых секций загружен");
        Ok(references)
    }
}

/// Разбор весовой таблицы из JSON-объекта "метка -> кг"
///
/// Порядок строк детерминирован (по ключу); нераспознанная метка
/// даёт предупреждение и пропускается, отрицательный вес - ошибка.
fn parse_weights(
    reference_id: &str,
    weights_json: &str,
) -> RepositoryResult<Vec<(CellPurpose, f64)>> {
    let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(weights_json)
        .map_err(|e| RepositoryError::FieldValueError {
            field: "cell_weights_json".to_string(),
            message: format!("не JSON-объект (id={}): {}", reference_id, e),
        })?;

    let mut weights = Vec::with_capacity(raw.len());
    for (label, value) in &raw {
        let Some(purpose) = CellPurpose::parse_label(label) else {
            warn!(reference_id, %label, "метка весовой таблицы не распознана, строка пропущена");
            continue;
        };
        let kg = value.as_f64().ok_or_else(|| RepositoryError::FieldValueError {
            field: "cell_weights_json".to_string(),
            message: format!("вес не число: '{}' (id={})", label, reference_id),
        })?;
        if !kg.is_finite() || kg < 0.0 {
            return Err(RepositoryError::FieldValueError {
                field: "cell_weights_json".to_string(),
                message: format!("недопустимый вес {} для '{}' (id={})", kg, label, reference_id),
            });
        }
        weights.push((purpose, kg));
    }
    Ok(weights)
}
