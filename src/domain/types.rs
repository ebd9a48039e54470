// ==========================================
// 单品盈利分析 - 领域类型定义
// ==========================================
// 职责: 盈利测算器状态机标签
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 测算状态 (Projector State)
// ==========================================
// 顺序: Initialized → CostsReady → IncomeReady
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectorState {
    Initialized, // 已构造，尚未计算单位成本
    CostsReady,  // 单位成本与支出序列已就绪
    IncomeReady, // 收入与净利润序列已就绪
}

impl fmt::Display for ProjectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectorState::Initialized => write!(f, "INITIALIZED"),
            ProjectorState::CostsReady => write!(f, "COSTS_READY"),
            ProjectorState::IncomeReady => write!(f, "INCOME_READY"),
        }
    }
}
