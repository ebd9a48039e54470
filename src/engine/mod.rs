// ==========================================
// 单品盈利分析 - 引擎层
// ==========================================
// 职责: 成本汇总与盈利测算，纯内存计算
// 流程: CostAggregator → ProfitabilityProjector → 报告
// 红线: 引擎不做渲染/打印，所有失败必须输出原因
// ==========================================

pub mod cost_aggregator;
pub mod error;
pub mod orchestrator;
pub mod projector;
pub mod ratios;

// 重导出核心引擎
pub use cost_aggregator::CostAggregator;
pub use error::{EngineError, EngineResult};
pub use orchestrator::{AnalysisError, AnalysisOutcome, ProfitabilityAnalysis};
pub use projector::ProfitabilityProjector;
