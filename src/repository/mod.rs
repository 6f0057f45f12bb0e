// ==========================================
// КТП конфигуратор - слой хранения каталогов
// ==========================================
// Ответственность: доступ к SQLite; движку отдаются только
// неизменяемые снимки каталогов
// ==========================================

pub mod component_repo;
pub mod error;
pub mod reference_repo;
pub mod template_repo;

pub use component_repo::ComponentRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use reference_repo::ReferenceRepository;
pub use template_repo::TemplateRepository;
