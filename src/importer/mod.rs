// ==========================================
// КТП конфигуратор - слой импорта
// ==========================================
// Ответственность: загрузка внешних каталогов в БД;
// движок с файлами не работает
// ==========================================

pub mod catalog_importer;
pub mod error;

pub use catalog_importer::{CatalogImporter, ImportReport};
pub use error::{ImporterError, ImporterResult};
