// ==========================================
// 单品盈利分析 - 分析编排器
// ==========================================
// 职责: 按固定顺序串联测算步骤，产出完整分析报告
// 流程: 单位成本 → 保本点 → 收入投影 → 目标利润 → 利润曲面 → 财务比率
// 输出: ProfitabilityReport + 收支序列 + 利润曲面（同时推送给图表消费者）
// ==========================================

use crate::config::scenario::{ConfigError, ScenarioConfig};
use crate::domain::projection::{ProfitSeries, ProfitabilitySurface};
use crate::domain::report::{
    BreakevenOutcome, FinancialRatios, ProfitabilityReport, TargetProfitOutcome,
};
use crate::engine::cost_aggregator::CostAggregator;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::projector::ProfitabilityProjector;
use crate::engine::ratios;
use crate::report::chart_sink::{ChartSink, OptionalChartSink};
use crate::report::error::ReportError;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// 编排器错误类型
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("场景配置无效: {0}")]
    Config(#[from] ConfigError),

    #[error("测算失败: {0}")]
    Engine(#[from] EngineError),

    #[error("图表输出失败 ({sink}): {source}")]
    Chart {
        sink: String,
        #[source]
        source: ReportError,
    },
}

/// 一次完整分析的产物
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: ProfitabilityReport,
    pub series: ProfitSeries,
    pub surface: ProfitabilitySurface,
}

/// 比率计算失败时记录原因并返回 None
fn ratio_or_warn(name: &str, result: EngineResult<f64>) -> Option<f64> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(ratio = name, error = %e, "财务比率不可用");
            None
        }
    }
}

// ==========================================
// ProfitabilityAnalysis - 分析编排器
// ==========================================
#[derive(Clone, Default)]
pub struct ProfitabilityAnalysis {
    chart_sink: OptionalChartSink,
}

impl ProfitabilityAnalysis {
    /// 不输出图表
    pub fn new() -> Self {
        Self::default()
    }

    /// 挂接图表消费者
    pub fn with_chart_sink(sink: Arc<dyn ChartSink>) -> Self {
        Self {
            chart_sink: OptionalChartSink::new(sink),
        }
    }

    /// 执行完整分析
    ///
    /// # 参数
    /// - `aggregator`: 物料成本汇总（构造测算器时快照）
    /// - `scenario`: 场景输入
    ///
    /// # 返回
    /// - Ok(AnalysisOutcome)
    /// - Err: 配置无效 / 测算前置条件不满足 / 图表输出失败
    ///
    /// 保本点与目标利润的 "不盈利" 不视为失败，记录在报告中
    #[instrument(skip(self, aggregator, scenario), fields(
        line_items = aggregator.len(),
        chart_sink = self.chart_sink.name()
    ))]
    pub fn run(
        &self,
        aggregator: &CostAggregator,
        scenario: &ScenarioConfig,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        scenario.validate()?;

        // 1. 单位成本
        let mut projector = ProfitabilityProjector::new(aggregator, scenario.fixed_overheads)?;
        let unit_costs = projector.compute_unit_costs(
            scenario.hourly_labor_cost,
            scenario.hours_per_unit,
            scenario.total_items,
        )?;

        // 2. 保本点
        let breakeven = match projector.breakeven_point(scenario.sale_price_per_unit) {
            Ok(point) => BreakevenOutcome::Reached(point),
            Err(EngineError::NotProfitable(_)) => BreakevenOutcome::NotProfitable {
                sale_price_per_unit: scenario.sale_price_per_unit,
                variable_cost_per_unit: unit_costs.variable_cost_per_unit(),
            },
            Err(e) => return Err(e.into()),
        };

        // 3. 收入投影 + 折线序列
        projector.project_income(scenario.sale_price_per_unit)?;
        let series = projector.profit_series()?;
        self.publish(|sink| sink.publish_profit_series(&series))?;

        // 4. 目标利润所需件数
        let net_profit_per_unit = projector.net_profit_per_unit()?;
        let target_profit = match projector.units_for_target_profit(scenario.target_net_profit) {
            Ok(units) => TargetProfitOutcome::Reachable { units },
            Err(EngineError::NotProfitable(_)) => {
                TargetProfitOutcome::NotProfitable { net_profit_per_unit }
            }
            Err(e) => return Err(e.into()),
        };

        // 5. 利润曲面
        let surface = projector.profitability_surface(
            &scenario.wage_sweep.values(),
            &scenario.sale_price_sweep.values(),
            scenario.hours_per_unit,
            scenario.total_items,
        )?;
        self.publish(|sink| sink.publish_profitability_surface(&surface))?;
        debug!(
            profitable_cells = surface.profitable_cell_count(),
            "利润曲面已生成"
        );

        // 6. 财务比率（以满产点为准）
        let ratios = self.compute_ratios(&projector, &series, scenario);

        let report = ProfitabilityReport {
            report_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            inputs: scenario.inputs(),
            line_item_count: aggregator.len(),
            total_material_cost: projector.total_material_cost(),
            unit_costs,
            net_profit_per_unit,
            breakeven,
            target_profit,
            profitable_at_capacity: series.is_profitable_at_capacity(),
            ratios,
        };

        info!(
            report_id = %report.report_id,
            total_cost_per_unit = unit_costs.total_cost_per_unit,
            net_profit_per_unit,
            "盈利分析完成"
        );

        Ok(AnalysisOutcome {
            report,
            series,
            surface,
        })
    }

    fn compute_ratios(
        &self,
        projector: &ProfitabilityProjector,
        series: &ProfitSeries,
        scenario: &ScenarioConfig,
    ) -> FinancialRatios {
        let net_profit = series.net_profit.last().copied().unwrap_or(0.0);
        let total_income = series.total_income.last().copied().unwrap_or(0.0);
        let total_investment = scenario.fixed_overheads
            + projector.total_material_cost() * f64::from(scenario.total_items);

        FinancialRatios {
            gross_profit_margin: ratio_or_warn(
                "gross_profit_margin",
                projector.gross_profit_margin(scenario.sale_price_per_unit, scenario.total_items),
            ),
            net_profit_margin: ratio_or_warn(
                "net_profit_margin",
                ratios::net_profit_margin(net_profit, total_income),
            ),
            roi_pct: ratio_or_warn(
                "roi",
                ratios::return_on_investment(net_profit, total_investment),
            ),
            operating_margin: ratio_or_warn(
                "operating_margin",
                ratios::operating_margin(net_profit, total_income),
            ),
            revenue_growth_rate_pct: ratio_or_warn(
                "revenue_growth_rate",
                ratios::revenue_growth_rate(total_income, scenario.previous_revenue),
            ),
        }
    }

    fn publish<F>(&self, action: F) -> Result<(), AnalysisError>
    where
        F: FnOnce(&dyn ChartSink) -> Result<(), ReportError>,
    {
        action(&self.chart_sink).map_err(|source| AnalysisError::Chart {
            sink: self.chart_sink.name().to_string(),
            source,
        })
    }
}
