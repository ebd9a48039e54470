// ==========================================
// 单品盈利分析 - 核心库
// ==========================================
// 系统定位: 单次运行的计算与报表工具
// 流程: 物料成本汇总 → 盈利测算 → 报告 / 图表序列
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与值对象
pub mod domain;

// 引擎层 - 成本与盈利测算
pub mod engine;

// 导入层 - 物料清单文件
pub mod importer;

// 配置层 - 分析场景
pub mod config;

// 报表层 - 图表序列与报告输出
pub mod report;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    BreakevenOutcome, BreakevenPoint, FinancialRatios, LineItem, LineItemInput,
    ProfitSeries, ProfitabilityReport, ProfitabilitySurface, ProjectorState,
    TargetProfitOutcome, UnitCosts,
};

pub use engine::{
    AnalysisError, AnalysisOutcome, CostAggregator, EngineError, EngineResult,
    ProfitabilityAnalysis, ProfitabilityProjector,
};

pub use config::{ScenarioConfig, SweepRange};

pub use report::{ChartSink, CsvChartExporter, NoOpChartSink};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "单品盈利分析";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
