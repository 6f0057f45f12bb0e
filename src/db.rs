// ==========================================
// КТП конфигуратор - инициализация SQLite
// ==========================================
// Цель:
// - единые PRAGMA для всех Connection::open (внешние ключи, busy_timeout)
// - встроенная схема каталогов, создание идемпотентно
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout по умолчанию (мс)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Встроенная схема каталогов
///
/// Каталоги - справочные данные, derived-поля (распознанный ток)
/// в схеме отсутствуют и пересчитываются при загрузке.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS component_catalog (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    unit_price  REAL NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS switchgear_reference (
    id                TEXT PRIMARY KEY,
    rating_label      TEXT NOT NULL,
    material_group    TEXT NOT NULL,
    busbar_profile    TEXT NOT NULL,
    cell_weights_json TEXT NOT NULL,
    sort_order        INTEGER NOT NULL DEFAULT 0,
    created_at        TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS cost_template (
    assembly_kind       TEXT PRIMARY KEY,
    hourly_rate         REAL NOT NULL,
    manufacturing_hours REAL NOT NULL,
    overhead_pct        REAL NOT NULL,
    admin_pct           REAL NOT NULL,
    profit_pct          REAL NOT NULL,
    vat_pct             REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id TEXT NOT NULL,
    key      TEXT NOT NULL,
    value    TEXT NOT NULL,
    PRIMARY KEY (scope_id, key)
);
"#;

/// Единые PRAGMA для соединения
///
/// foreign_keys и busy_timeout настраиваются на каждом соединении
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Открыть соединение и применить единые настройки
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Создать таблицы каталогов (идемпотентно)
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
