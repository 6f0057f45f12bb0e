// ==========================================
// КТП конфигуратор - подбор типовой секции
// ==========================================
// Чистая функция от (ток, группа материала, каталог):
// сканирование справочника, берётся первая подходящая запись.
// Отсутствие записи - штатное состояние "исполнение недоступно".
// ==========================================

use crate::domain::reference::SwitchgearReference;
use crate::domain::types::{ConductorMaterial, MaterialGroup};
use crate::engine::rating::RatingExtractor;
use tracing::{debug, instrument, warn};

// ==========================================
// ConfigurationResolver - поиск по справочнику
// ==========================================
pub struct ConfigurationResolver {
    extractor: RatingExtractor,
}

impl ConfigurationResolver {
    pub fn new(extractor: RatingExtractor) -> Self {
        Self { extractor }
    }

    /// Найти типовую секцию под номинал выключателя и материал шин
    ///
    /// Совпадение: метка тока записи разбирается тем же экстрактором
    /// и равна номиналу, группа материала совпадает со свёрнутой
    /// группой выбранной марки. При нескольких совпадениях берётся
    /// первая в порядке каталога (перекрытые записи пишутся в лог).
    #[instrument(skip(self, catalog), fields(catalog_size = catalog.len()))]
    pub fn resolve<'a>(
        &self,
        catalog: &'a [SwitchgearReference],
        breaker_rating: u32,
        material: ConductorMaterial,
    ) -> Option<&'a SwitchgearReference> {
        self.resolve_by_group(catalog, breaker_rating, material.group())
    }

    /// Вариант с уже свёрнутой группой материала
    pub fn resolve_by_group<'a>(
        &self,
        catalog: &'a [SwitchgearReference],
        breaker_rating: u32,
        group: MaterialGroup,
    ) -> Option<&'a SwitchgearReference> {
        let mut matches = catalog.iter().filter(|entry| {
            entry.material_group == group
                && self.extractor.extract(&entry.rating_label) == Some(breaker_rating)
        });

        let chosen = matches.next();
        match chosen {
            Some(entry) => {
                let shadowed: Vec<&str> = matches.map(|e| e.id.as_str()).collect();
                if !shadowed.is_empty() {
                    // Неоднозначность каталога: побеждает порядок записей
                    warn!(
                        chosen = %entry.id,
                        ?shadowed,
                        breaker_rating,
                        %group,
                        "несколько записей справочника подходят, взята первая по порядку"
                    );
                }
                debug!(reference_id = %entry.id, breaker_rating, %group, "типовая секция найдена");
            }
            None => {
                debug!(breaker_rating, %group, "типовая секция недоступна");
            }
        }
        chosen
    }
}

impl Default for ConfigurationResolver {
    fn default() -> Self {
        Self::new(RatingExtractor::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CellPurpose;

    fn reference(id: &str, label: &str, group: MaterialGroup) -> SwitchgearReference {
        SwitchgearReference {
            id: id.to_string(),
            rating_label: label.to_string(),
            material_group: group,
            busbar_profile: "АД31Т 60x6".to_string(),
            cell_weights_kg: vec![
                (CellPurpose::Input, 28.0),
                (CellPurpose::Sectional, 22.0),
                (CellPurpose::Outgoing, 16.5),
                (CellPurpose::Bridge, 5.0),
            ],
        }
    }

    #[test]
    fn test_resolves_rating_and_material_group() {
        let catalog = vec![
            reference("r1", "Секция 400 А", MaterialGroup::Aluminum),
            reference("r2", "Секция 630 А", MaterialGroup::Copper),
            reference("r3", "Секция 630 А", MaterialGroup::Aluminum),
        ];
        let resolver = ConfigurationResolver::default();

        let found = resolver
            .resolve(&catalog, 630, ConductorMaterial::Ad)
            .expect("запись должна найтись");
        assert_eq!(found.id, "r3");
    }

    #[test]
    fn test_ad2_collapses_to_aluminum_family() {
        let catalog = vec![reference("r1", "Секция 630 А", MaterialGroup::Aluminum)];
        let resolver = ConfigurationResolver::default();

        assert!(resolver.resolve(&catalog, 630, ConductorMaterial::Ad2).is_some());
        assert!(resolver.resolve(&catalog, 630, ConductorMaterial::Mt).is_none());
    }

    #[test]
    fn test_no_match_is_none_not_error() {
        let catalog = vec![reference("r1", "Секция 1000 А", MaterialGroup::Copper)];
        let resolver = ConfigurationResolver::default();
        assert!(resolver.resolve(&catalog, 250, ConductorMaterial::Mt2).is_none());
        assert!(resolver.resolve(&[], 250, ConductorMaterial::Mt2).is_none());
    }

    // Неоднозначность: повторные вызовы детерминированно дают первую запись
    #[test]
    fn test_tie_broken_by_catalog_order() {
        let catalog = vec![
            reference("first", "630 А", MaterialGroup::Aluminum),
            reference("second", "Секция 630 А", MaterialGroup::Aluminum),
        ];
        let resolver = ConfigurationResolver::default();

        for _ in 0..3 {
            let found = resolver
                .resolve(&catalog, 630, ConductorMaterial::Ad)
                .expect("запись должна найтись");
            assert_eq!(found.id, "first");
        }
    }

    // Метка без распознаваемого тока просто не участвует в поиске
    #[test]
    fn test_unparsable_label_is_skipped() {
        let catalog = vec![
            reference("bad", "Секция без тока", MaterialGroup::Aluminum),
            reference("good", "Секция 630 А", MaterialGroup::Aluminum),
        ];
        let resolver = ConfigurationResolver::default();
        let found = resolver
            .resolve(&catalog, 630, ConductorMaterial::Ad)
            .expect("запись должна найтись");
        assert_eq!(found.id, "good");
    }
}
