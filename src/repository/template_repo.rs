// ==========================================
// КТП конфигуратор - хранилище шаблонов себестоимости
// ==========================================
// Шаблон ведётся экономистом по типу сборки; движок получает
// только снимок значений
// ==========================================

use crate::domain::costing::CostTemplate;
use crate::domain::types::AssemblyKind;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

// ==========================================
// TemplateRepository
// ==========================================
pub struct TemplateRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TemplateRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Вставить или заменить шаблон типа сборки
    pub fn upsert(&self, kind: AssemblyKind, template: &CostTemplate) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"INSERT INTO cost_template
                   (assembly_kind, hourly_rate, manufacturing_hours,
                    overhead_pct, admin_pct, profit_pct, vat_pct)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
               ON CONFLICT(assembly_kind) DO UPDATE SET
                   hourly_rate = ?2, manufacturing_hours = ?3, overhead_pct = ?4,
                   admin_pct = ?5, profit_pct = ?6, vat_pct = ?7"#,
            params![
                kind.to_string(),
                template.hourly_rate,
                template.manufacturing_hours,
                template.overhead_pct,
                template.admin_pct,
                template.profit_pct,
                template.vat_pct
            ],
        )?;
        Ok(())
    }

    /// Шаблон одного типа сборки
    pub fn get(&self, kind: AssemblyKind) -> RepositoryResult<CostTemplate> {
        let conn = self.lock()?;
        conn.query_row(
            r#"SELECT hourly_rate, manufacturing_hours, overhead_pct,
                      admin_pct, profit_pct, vat_pct
               FROM cost_template WHERE assembly_kind = ?1"#,
            params![kind.to_string()],
            |row| {
                Ok(CostTemplate {
                    hourly_rate: row.get(0)?,
                    manufacturing_hours: row.get(1)?,
                    overhead_pct: row.get(2)?,
                    admin_pct: row.get(3)?,
                    profit_pct: row.get(4)?,
                    vat_pct: row.get(5)?,
                })
            },
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "CostTemplate".to_string(),
                id: kind.to_string(),
            },
            other => other.into(),
        })
    }

    /// Снимок всех шаблонов
    pub fn load_all(&self) -> RepositoryResult<HashMap<AssemblyKind, CostTemplate>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            r#"SELECT assembly_kind, hourly_rate, manufacturing_hours,
                      overhead_pct, admin_pct, profit_pct, vat_pct
               FROM cost_template"#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                CostTemplate {
                    hourly_rate: row.get(1)?,
                    manufacturing_hours: row.get(2)?,
                    overhead_pct: row.get(3)?,
                    admin_pct: row.get(4)?,
                    profit_pct: row.get(5)?,
                    vat_pct: row.get(6)?,
                },
            ))
        })?;

        let mut templates = HashMap::new();
        for row in rows {
            let (kind_raw, template) = row?;
            let kind = AssemblyKind::parse(&kind_raw).ok_or_else(|| {
                RepositoryError::FieldValueError {
                    field: "assembly_kind".to_string(),
                    message: format!("неизвестный тип сборки '{}'", kind_raw),
                }
            })?;
            templates.insert(kind, template);
        }
        debug!(count = templates.len(), "шаблоны себестоимости загружены");
        Ok(templates)
    }
}
