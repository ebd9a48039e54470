// ==========================================
// 单品盈利分析 - 分析报告领域模型
// ==========================================
// 职责: 一次完整分析的输出汇总（可序列化为 JSON）
// 红线: "不盈利" 必须是可区分的结果，不得以数值 0 代替
// ==========================================

use crate::domain::projection::{BreakevenPoint, UnitCosts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// 场景输入快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    pub hourly_labor_cost: f64,
    pub hours_per_unit: f64,
    pub total_items: u32,
    pub sale_price_per_unit: f64,
    pub target_net_profit: f64,
    pub fixed_overheads: f64,
    pub previous_revenue: f64,
}

// ==========================================
// 保本分析结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakevenOutcome {
    Reached(BreakevenPoint),
    /// 售价不覆盖单位变动成本
    NotProfitable {
        sale_price_per_unit: f64,
        variable_cost_per_unit: f64,
    },
}

// ==========================================
// 目标利润所需件数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetProfitOutcome {
    Reachable { units: u64 },
    /// 单位净利润 <= 0，不存在满足目标的件数
    NotProfitable { net_profit_per_unit: f64 },
}

impl TargetProfitOutcome {
    pub fn units(&self) -> Option<u64> {
        match self {
            TargetProfitOutcome::Reachable { units } => Some(*units),
            TargetProfitOutcome::NotProfitable { .. } => None,
        }
    }
}

// ==========================================
// 财务比率
// ==========================================
// None 表示分母为零，比率不可用
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialRatios {
    pub gross_profit_margin: Option<f64>,     // 比例 (0~1)
    pub net_profit_margin: Option<f64>,       // 比例 (0~1)
    pub roi_pct: Option<f64>,                 // 百分比
    pub operating_margin: Option<f64>,        // 比例 (0~1)
    pub revenue_growth_rate_pct: Option<f64>, // 百分比
}

// ==========================================
// ProfitabilityReport - 分析报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityReport {
    pub report_id: String,
    pub generated_at: DateTime<Utc>,

    // ===== 输入 =====
    pub inputs: ScenarioInputs,
    pub line_item_count: usize,

    // ===== 成本 =====
    pub total_material_cost: f64,
    pub unit_costs: UnitCosts,

    // ===== 盈利 =====
    pub net_profit_per_unit: f64,
    pub breakeven: BreakevenOutcome,
    pub target_profit: TargetProfitOutcome,
    pub profitable_at_capacity: bool,

    // ===== 比率 =====
    pub ratios: FinancialRatios,
}
