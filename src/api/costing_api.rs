// ==========================================
// КТП конфигуратор - фасад расчёта
// ==========================================
// Ответственность: собрать снимки каталогов, прогнать движок,
// отдать смету. Каждый вызов считает с нуля по полному контексту
// выбора - инкрементальных правок и скрытого состояния нет.
// ==========================================

use crate::config::ConfigManager;
use crate::domain::assembly::ProjectSelection;
use crate::domain::component::ComponentCandidate;
use crate::domain::costing::CostSummary;
use crate::domain::reference::SwitchgearReference;
use crate::domain::types::{AssemblyKind, ConductorMaterial};
use crate::engine::aggregator::{CostAggregator, LineItem, PricedLine};
use crate::engine::matcher::{required_current_amps, ParallelOption, ParameterMatcher};
use crate::engine::rating::RatingExtractor;
use crate::engine::resolver::ConfigurationResolver;
use crate::engine::weight::{BusbarSystemCost, WeightCalculator};
use crate::api::error::{ApiError, ApiResult};
use crate::repository::{ComponentRepository, ReferenceRepository, TemplateRepository};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Линейное напряжение стороны РУНН по умолчанию (В)
pub const DEFAULT_LV_VOLTAGE_V: f64 = 400.0;

// ==========================================
// ProjectEstimate - результат полного расчёта
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct ProjectEstimate {
    pub project_name: String,
    pub summary: CostSummary,
    pub lines: Vec<PricedLine>, // раскладка каждой строки для аудита
    pub resolved_reference_id: Option<String>, // типовая секция, если подобрана
    pub busbar: Option<BusbarSystemCost>,
}

// ==========================================
// CostingApi
// ==========================================
pub struct CostingApi {
    components: ComponentRepository,
    references: ReferenceRepository,
    templates: TemplateRepository,
    config: ConfigManager,
    extractor: RatingExtractor,
    resolver: ConfigurationResolver,
}

impl CostingApi {
    pub fn new(
        components: ComponentRepository,
        references: ReferenceRepository,
        templates: TemplateRepository,
        config: ConfigManager,
    ) -> Self {
        Self {
            components,
            references,
            templates,
            config,
            extractor: RatingExtractor::standard(),
            resolver: ConfigurationResolver::default(),
        }
    }

    fn matcher(&self) -> ApiResult<ParameterMatcher> {
        Ok(ParameterMatcher::new(self.config.max_supported_rating()?))
    }

    /// Варианты комплектации выключателями из текущего каталога
    #[instrument(skip(self))]
    pub fn parallel_options(&self) -> ApiResult<Vec<ParallelOption>> {
        let pool = self.components.load_all(&self.extractor)?;
        Ok(self.matcher()?.parallel_options(&pool))
    }

    /// Рекомендованный компонент под требуемый ток (для предзаполнения)
    #[instrument(skip(self))]
    pub fn recommend_component(&self, required_amps: u32) -> ApiResult<Option<ComponentCandidate>> {
        let pool = self.components.load_all(&self.extractor)?;
        Ok(self.matcher()?.recommend(&pool, required_amps).cloned())
    }

    /// Рекомендация по мощности выбранного трансформатора
    pub fn recommend_for_transformer(
        &self,
        power_kva: f64,
    ) -> ApiResult<Option<ComponentCandidate>> {
        let required = required_current_amps(power_kva, DEFAULT_LV_VOLTAGE_V);
        self.recommend_component(required)
    }

    /// Подбор типовой секции под выбранный выключатель и материал
    ///
    /// Ok(None) - штатное "исполнение недоступно": либо ток
    /// выключателя не распознан, либо в справочнике нет записи.
    #[instrument(skip(self, breaker), fields(breaker_id = %breaker.id))]
    pub fn resolve_reference(
        &self,
        breaker: &ComponentCandidate,
        material: ConductorMaterial,
    ) -> ApiResult<Option<SwitchgearReference>> {
        let Some(rating) = breaker.derived_rating else {
            debug!("ток выключателя не распознан, типовая секция не подбирается");
            return Ok(None);
        };
        let catalog = self.references.load_all()?;
        Ok(self.resolver.resolve(&catalog, rating, material).cloned())
    }

    /// Полный расчёт сметы по контексту выбора
    ///
    /// Строки сметы: каждая ячейка (свой шаблон по типу сборки),
    /// каждый участок шинного моста (цена зависит от длины),
    /// ошиновка ячеек одной строкой - если типовая секция подобрана.
    #[instrument(skip(self, selection), fields(project = %selection.project_name))]
    pub fn price_project(&self, selection: &ProjectSelection) -> ApiResult<ProjectEstimate> {
        let policy = self.config.pricing_policy()?;
        let calculator = WeightCalculator::new(policy);
        let templates = self.templates.load_all()?;
        let template_for = |kind: AssemblyKind| {
            templates
                .get(&kind)
                .copied()
                .ok_or(ApiError::TemplateMissing { kind })
        };
        let group = selection.conductor_material.group();

        let mut items = Vec::new();

        // Ячейки: материальная часть - сумма цен выбранных компонентов
        for cell in &selection.cells {
            items.push(LineItem {
                name: cell.name.clone(),
                quantity: cell.quantity,
                materials_total: cell.selected.materials_total(),
                template: template_for(cell.assembly_kind)?,
            });
        }

        // Участки шинного моста: расцениваются поштучно
        for segment in &selection.bridge_segments {
            let priced = calculator.price_bridge_segment(segment, group);
            items.push(LineItem {
                name: format!("Шинный мост {} м", priced.length_m),
                quantity: priced.quantity,
                materials_total: priced.unit_price,
                template: template_for(AssemblyKind::BusBridge)?,
            });
        }

        // Ошиновка ячеек: только при подобранной типовой секции
        let mut resolved_reference_id = None;
        let mut busbar = None;
        if let Some(breaker) = &selection.chosen_breaker {
            if let Some(reference) = self.resolve_reference(breaker, selection.conductor_material)? {
                let cost = calculator.busbar_system_cost(&reference, &selection.cells, group);
                items.push(LineItem {
                    name: format!("Ошиновка ячеек ({})", reference.busbar_profile),
                    quantity: 1,
                    materials_total: cost.materials_cost,
                    template: template_for(AssemblyKind::BusbarSystem)?,
                });
                resolved_reference_id = Some(reference.id.clone());
                busbar = Some(cost);
            }
        }

        let (summary, lines) = CostAggregator::aggregate(&items)?;
        info!(
            grand_total = summary.grand_total,
            line_count = summary.breakdown.len(),
            "смета проекта рассчитана"
        );
        Ok(ProjectEstimate {
            project_name: selection.project_name.clone(),
            summary,
            lines,
            resolved_reference_id,
            busbar,
        })
    }
}
