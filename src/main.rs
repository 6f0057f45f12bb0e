// ==========================================
// КТП конфигуратор - консольный вход
// ==========================================
// Команды: импорт каталогов, варианты комплектации,
// расчёт сметы по файлу контекста выбора
// ==========================================

use anyhow::Context;
use ktp_costing::api::CostingApi;
use ktp_costing::config::ConfigManager;
use ktp_costing::domain::ProjectSelection;
use ktp_costing::importer::CatalogImporter;
use ktp_costing::repository::{ComponentRepository, ReferenceRepository, TemplateRepository};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Путь к базе каталогов: KTP_DB или каталог данных пользователя
fn default_db_path() -> PathBuf {
    if let Ok(path) = std::env::var("KTP_DB") {
        return PathBuf::from(path);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ktp-costing")
        .join("catalog.db")
}

fn open_db(path: &PathBuf) -> anyhow::Result<Arc<Mutex<Connection>>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("не удалось создать каталог {}", parent.display()))?;
    }
    let conn = ktp_costing::db::open_sqlite_connection(
        path.to_str().context("путь к БД не в UTF-8")?,
    )?;
    ktp_costing::db::init_schema(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn build_api(conn: Arc<Mutex<Connection>>) -> CostingApi {
    CostingApi::new(
        ComponentRepository::new(conn.clone()),
        ReferenceRepository::new(conn.clone()),
        TemplateRepository::new(conn.clone()),
        ConfigManager::from_connection(conn),
    )
}

fn usage() -> ! {
    eprintln!("Использование: ktp-costing <команда> [аргументы]");
    eprintln!("Команды:");
    eprintln!("  import-components <файл.csv>   импорт прайс-листа комплектующих");
    eprintln!("  import-references <файл.csv>   импорт справочника типовых секций");
    eprintln!("  options                        варианты комплектации из каталога");
    eprintln!("  price <выбор.json>             расчёт сметы по контексту выбора");
    eprintln!();
    eprintln!("База каталогов: переменная KTP_DB или каталог данных пользователя");
    std::process::exit(2);
}

fn main() -> anyhow::Result<()> {
    ktp_costing::logging::init();

    tracing::info!("==================================================");
    tracing::info!("КТП конфигуратор - расчёт стоимости изготовления");
    tracing::info!("Версия: {}", ktp_costing::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else { usage() };

    let db_path = default_db_path();
    tracing::info!("База каталогов: {}", db_path.display());
    let conn = open_db(&db_path)?;

    match command.as_str() {
        "import-components" | "import-references" => {
            let Some(file) = args.get(1) else { usage() };
            let components = ComponentRepository::new(conn.clone());
            let references = ReferenceRepository::new(conn.clone());
            let importer = CatalogImporter::new(&components, &references);
            let report = if command == "import-components" {
                importer.import_components(file)?
            } else {
                importer.import_references(file)?
            };
            println!(
                "Партия {}: импортировано {}, отклонено {}",
                report.batch_id, report.imported, report.rejected
            );
            for error in &report.row_errors {
                println!("  {}", error);
            }
        }
        "options" => {
            let api = build_api(conn);
            let options = api.parallel_options()?;
            if options.is_empty() {
                println!("Вариантов комплектации нет (каталог пуст или без распознанных токов)");
            }
            for option in options {
                println!(
                    "{} А x {} шт: {} позиций каталога",
                    option.rating,
                    option.unit_count,
                    option.candidates.len()
                );
            }
        }
        "price" => {
            let Some(file) = args.get(1) else { usage() };
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("не удалось прочитать {}", file))?;
            let selection: ProjectSelection =
                serde_json::from_str(&raw).context("файл контекста выбора не разобран")?;

            let api = build_api(conn);
            let estimate = api.price_project(&selection)?;

            println!("Проект: {}", estimate.project_name);
            if let Some(reference_id) = &estimate.resolved_reference_id {
                println!("Типовая секция: {}", reference_id);
            } else {
                println!("Типовая секция: не подобрана");
            }
            for line in &estimate.summary.breakdown {
                println!(
                    "  {:<40} {:>3} шт x {:>14.2} = {:>16.2}",
                    line.name, line.quantity, line.unit_price, line.line_total
                );
            }
            println!("ИТОГО: {:.2}", estimate.summary.grand_total);
        }
        _ => usage(),
    }

    Ok(())
}
