// ==========================================
// Вспомогательные функции интеграционных тестов
// ==========================================
// Временная SQLite-база со схемой каталогов и типовым наполнением
// ==========================================

#![allow(dead_code)]

use ktp_costing::domain::costing::CostTemplate;
use ktp_costing::domain::types::AssemblyKind;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Создать временную базу каталогов
pub fn create_test_db() -> (NamedTempFile, Arc<Mutex<Connection>>) {
    let temp_file = NamedTempFile::new().expect("не удалось создать временный файл");
    let path = temp_file.path().to_str().expect("путь не в UTF-8").to_string();
    let conn = ktp_costing::db::open_sqlite_connection(&path).expect("не удалось открыть БД");
    ktp_costing::db::init_schema(&conn).expect("не удалось создать схему");
    (temp_file, Arc::new(Mutex::new(conn)))
}

/// Вставить позицию каталога комплектующих
pub fn insert_component(conn: &Arc<Mutex<Connection>>, id: &str, name: &str, price: f64) {
    let conn = conn.lock().unwrap();
    conn.execute(
        "INSERT INTO component_catalog (id, name, unit_price) VALUES (?1, ?2, ?3)",
        params![id, name, price],
    )
    .expect("не удалось вставить компонент");
}

/// Вставить запись справочника типовых секций
pub fn insert_reference(
    conn: &Arc<Mutex<Connection>>,
    id: &str,
    rating_label: &str,
    material_group: &str,
    weights_json: &str,
    sort_order: i64,
) {
    let conn = conn.lock().unwrap();
    conn.execute(
        r#"INSERT INTO switchgear_reference
               (id, rating_label, material_group, busbar_profile, cell_weights_json, sort_order)
           VALUES (?1, ?2, ?3, 'АД31Т 60x6', ?4, ?5)"#,
        params![id, rating_label, material_group, weights_json, sort_order],
    )
    .expect("не удалось вставить запись справочника");
}

/// Шаблон себестоимости контрольного примера
pub fn reference_template() -> CostTemplate {
    CostTemplate {
        hourly_rate: 2_000.0,
        manufacturing_hours: 1.0,
        overhead_pct: 10.0,
        admin_pct: 15.0,
        profit_pct: 10.0,
        vat_pct: 12.0,
    }
}

/// Вставить шаблон себестоимости
pub fn insert_template(conn: &Arc<Mutex<Connection>>, kind: AssemblyKind, template: &CostTemplate) {
    let conn = conn.lock().unwrap();
    conn.execute(
        r#"INSERT INTO cost_template
               (assembly_kind, hourly_rate, manufacturing_hours,
                overhead_pct, admin_pct, profit_pct, vat_pct)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
        params![
            kind.to_string(),
            template.hourly_rate,
            template.manufacturing_hours,
            template.overhead_pct,
            template.admin_pct,
            template.profit_pct,
            template.vat_pct
        ],
    )
    .expect("не удалось вставить шаблон");
}

/// Вставить контрольный шаблон для всех типов сборки
pub fn insert_all_templates(conn: &Arc<Mutex<Connection>>) {
    let template = reference_template();
    for kind in [
        AssemblyKind::RusnSection,
        AssemblyKind::RunnSection,
        AssemblyKind::BusBridge,
        AssemblyKind::BusbarSystem,
    ] {
        insert_template(conn, kind, &template);
    }
}

/// Типовое наполнение справочника: алюминий и медь на 630 А
pub fn insert_standard_references(conn: &Arc<Mutex<Connection>>) {
    let weights = r#"{"Ввод": 28.0, "Секционная": 22.0, "Отходящая линия": 16.0, "Шинный мост": 5.0}"#;
    insert_reference(conn, "ref-630-al", "Секция 630 А", "ALUMINUM", weights, 0);
    insert_reference(conn, "ref-630-cu", "Секция 630 А", "COPPER", weights, 1);
    insert_reference(conn, "ref-1000-al", "Секция 1000 А", "ALUMINUM", weights, 2);
}
