// ==========================================
// КТП конфигуратор - менеджер конфигурации
// ==========================================
// Ответственность: загрузка и переопределение политик расчёта
// Хранение: таблица config_kv (key-value, scope_id='global')
// Отсутствующий ключ -> значение по умолчанию, не ошибка
// ==========================================

use crate::engine::matcher::DEFAULT_MAX_SUPPORTED_RATING;
use crate::engine::weight::PricingPolicy;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::warn;

// ===== Ключи конфигурации =====
pub const KEY_ALUMINUM_PRICE_PER_KG: &str = "pricing/aluminum_price_per_kg";
pub const KEY_COPPER_PRICE_PER_KG: &str = "pricing/copper_price_per_kg";
pub const KEY_ALUMINUM_BRIDGE_KG_PER_M: &str = "pricing/aluminum_bridge_kg_per_m";
pub const KEY_COPPER_BRIDGE_KG_PER_M: &str = "pricing/copper_bridge_kg_per_m";
pub const KEY_MAX_SUPPORTED_RATING: &str = "matcher/max_supported_rating";

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Значение ключа из config_kv (scope_id='global')
    fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.lock()?;
        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Записать значение ключа (scope_id='global')
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
               ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2"#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Числовое значение ключа с умолчанием
    ///
    /// Неразбираемое значение трактуется как отсутствующее
    /// (с предупреждением), чтобы кривой ключ не валил расчёт.
    fn get_f64_or(&self, key: &str, default: f64) -> RepositoryResult<f64> {
        match self.get_config_value(key)? {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(v) => Ok(v),
                Err(_) => {
                    warn!(key, %raw, "значение конфигурации не число, взято умолчание");
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }

    /// Ценовая политика для расчёта массы и стоимости шин
    pub fn pricing_policy(&self) -> RepositoryResult<PricingPolicy> {
        let defaults = PricingPolicy::default();
        Ok(PricingPolicy {
            aluminum_price_per_kg: self
                .get_f64_or(KEY_ALUMINUM_PRICE_PER_KG, defaults.aluminum_price_per_kg)?,
            copper_price_per_kg: self
                .get_f64_or(KEY_COPPER_PRICE_PER_KG, defaults.copper_price_per_kg)?,
            aluminum_bridge_kg_per_m: self
                .get_f64_or(KEY_ALUMINUM_BRIDGE_KG_PER_M, defaults.aluminum_bridge_kg_per_m)?,
            copper_bridge_kg_per_m: self
                .get_f64_or(KEY_COPPER_BRIDGE_KG_PER_M, defaults.copper_bridge_kg_per_m)?,
        })
    }

    /// Предельный номинал аппаратов для подбора (А)
    pub fn max_supported_rating(&self) -> RepositoryResult<u32> {
        let v = self.get_f64_or(KEY_MAX_SUPPORTED_RATING, DEFAULT_MAX_SUPPORTED_RATING as f64)?;
        Ok(v as u32)
    }
}
