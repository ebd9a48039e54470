// ==========================================
// 单品盈利分析 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 不返回 inf/NaN，所有失败必须携带显式原因
// ==========================================

use crate::domain::types::ProjectorState;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 公式分母为零（包装重量、总件数、比率分母等）
    #[error("除数为零: {0}")]
    DivisionByZero(String),

    /// 售价不覆盖变动成本，或单位净利润 <= 0
    #[error("不盈利: {0}")]
    NotProfitable(String),

    /// 调用顺序违反状态机约束
    #[error("状态未就绪: 需要 {required}，当前 {actual}")]
    NotReady {
        required: ProjectorState,
        actual: ProjectorState,
    },

    /// 非有限数值等输入错误
    #[error("无效输入: {0}")]
    InvalidInput(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

/// 校验数值有限（拒绝 NaN / inf）
pub(crate) fn ensure_finite(field: &str, value: f64) -> EngineResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidInput(format!(
            "{} 必须为有限数值，实际 {}",
            field, value
        )))
    }
}

/// 校验分母非零
pub(crate) fn ensure_nonzero(field: &str, value: f64) -> EngineResult<()> {
    if value == 0.0 {
        Err(EngineError::DivisionByZero(format!("{} 为 0", field)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_message() {
        let err = EngineError::NotReady {
            required: ProjectorState::IncomeReady,
            actual: ProjectorState::CostsReady,
        };
        assert_eq!(err.to_string(), "状态未就绪: 需要 INCOME_READY，当前 COSTS_READY");
    }

    #[test]
    fn test_guards() {
        assert!(ensure_finite("unit_price", 1.0).is_ok());
        assert!(matches!(
            ensure_finite("unit_price", f64::NAN),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            ensure_nonzero("package_weight", 0.0),
            Err(EngineError::DivisionByZero(_))
        ));
        assert!(ensure_nonzero("package_weight", -1.0).is_ok());
    }
}
