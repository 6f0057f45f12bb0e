// ==========================================
// КТП конфигуратор - хранилище каталога комплектующих
// ==========================================
// Красная линия: распознанный ток не хранится в БД,
// пересчитывается экстрактором при каждой загрузке
// ==========================================

use crate::domain::component::ComponentCandidate;
use crate::engine::rating::RatingExtractor;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::debug;

// ==========================================
// ComponentRepository
// ==========================================
pub struct ComponentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ComponentRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Вставить или заменить позицию каталога
    pub fn upsert(&self, id: &str, name: &str, unit_price: f64) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"INSERT INTO component_catalog (id, name, unit_price)
               VALUES (?1, ?2, ?3)
               ON CONFLICT(id) DO UPDATE SET name = ?2, unit_price = ?3"#,
            params![id, name, unit_price],
        )?;
        Ok(())
    }

    /// Загрузить снимок каталога
    ///
    /// Ток каждой позиции выводится из наименования переданным
    /// экстрактором. Пустая таблица - пустой снимок, не ошибка
    /// (каталог мог ещё не импортироваться).
    pub fn load_all(&self, extractor: &RatingExtractor) -> RepositoryResult<Vec<ComponentCandidate>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, unit_price FROM component_catalog ORDER BY name, id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        let mut candidates = Vec::new();
        for row in rows {
            let (id, name, unit_price) = row?;
            let derived_rating = extractor.extract(&name);
            candidates.push(ComponentCandidate { id, name, unit_price, derived_rating });
        }
        debug!(count = candidates.len(), "каталог комплектующих загружен");
        Ok(candidates)
    }

    /// Одна позиция по идентификатору
    pub fn get(&self, id: &str, extractor: &RatingExtractor) -> RepositoryResult<ComponentCandidate> {
        let conn = self.lock()?;
        let (name, unit_price): (String, f64) = conn
            .query_row(
                "SELECT name, unit_price FROM component_catalog WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                    entity: "ComponentCandidate".to_string(),
                    id: id.to_string(),
                },
                other => other.into(),
            })?;

        let derived_rating = extractor.extract(&name);
        Ok(ComponentCandidate { id: id.to_string(), name, unit_price, derived_rating })
    }

    pub fn count(&self) -> RepositoryResult<u64> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM component_catalog", [], |r| r.get(0))?;
        Ok(n as u64)
    }
}
