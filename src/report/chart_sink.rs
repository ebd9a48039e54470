// ==========================================
// 单品盈利分析 - 图表输出适配
// ==========================================
// 职责: 定义图表消费 trait，计算层只产出数值序列
// 说明: 渲染是下游消费者，测算不依赖任何绘图实现
// ==========================================

use crate::domain::projection::{ProfitSeries, ProfitabilitySurface};
use crate::report::error::ReportResult;
use std::sync::Arc;

// ==========================================
// ChartSink Trait
// ==========================================

/// 图表消费者
///
/// 接收完成计算的纯数值序列（折线图 / 等高线图输入）
pub trait ChartSink {
    /// 支出 / 收入 / 净利润 折线序列
    fn publish_profit_series(&self, series: &ProfitSeries) -> ReportResult<()>;

    /// 时薪 × 售价 利润曲面
    fn publish_profitability_surface(&self, surface: &ProfitabilitySurface) -> ReportResult<()>;

    /// 消费者名称（日志用）
    fn name(&self) -> &str;
}

// ==========================================
// NoOpChartSink - 空实现
// ==========================================

/// 不输出任何图表
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpChartSink;

impl ChartSink for NoOpChartSink {
    fn publish_profit_series(&self, _series: &ProfitSeries) -> ReportResult<()> {
        Ok(())
    }

    fn publish_profitability_surface(&self, _surface: &ProfitabilitySurface) -> ReportResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

// ==========================================
// OptionalChartSink - 可选消费者包装
// ==========================================

/// 未配置消费者时静默跳过
#[derive(Clone, Default)]
pub struct OptionalChartSink {
    inner: Option<Arc<dyn ChartSink>>,
}

impl OptionalChartSink {
    pub fn new(sink: Arc<dyn ChartSink>) -> Self {
        Self { inner: Some(sink) }
    }
}

impl ChartSink for OptionalChartSink {
    fn publish_profit_series(&self, series: &ProfitSeries) -> ReportResult<()> {
        match &self.inner {
            Some(sink) => sink.publish_profit_series(series),
            None => Ok(()),
        }
    }

    fn publish_profitability_surface(&self, surface: &ProfitabilitySurface) -> ReportResult<()> {
        match &self.inner {
            Some(sink) => sink.publish_profitability_surface(surface),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        match &self.inner {
            Some(sink) => sink.name(),
            None => "none",
        }
    }
}
