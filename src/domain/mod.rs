// ==========================================
// 单品盈利分析 - 领域层
// ==========================================
// 职责: 实体与值对象，不包含计算流程
// ==========================================

pub mod line_item;
pub mod projection;
pub mod report;
pub mod types;

// 重导出核心领域类型
pub use line_item::{LineItem, LineItemInput, GRAMS_TO_OUNCES};
pub use projection::{BreakevenPoint, ProfitSeries, ProfitabilitySurface, UnitCosts};
pub use report::{
    BreakevenOutcome, FinancialRatios, ProfitabilityReport, ScenarioInputs, TargetProfitOutcome,
};
pub use types::ProjectorState;
